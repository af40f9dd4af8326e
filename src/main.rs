use coursecatalog_api::{
    constants::{
        api::{ALLOWED_HOSTS, BIND_ADDRESS, DEBUG},
        redis::REDIS_URL,
    },
    db,
    middleware::hosts::check_allowed_hosts,
    routes,
    services::sessions,
    state::AppState,
};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let default_level = if *DEBUG { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("coursecatalog_api={default_level},tower_http={default_level}").into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
    check_allowed_hosts(&ALLOWED_HOSTS);

    let db_conn = db::connect()
        .await
        .expect("Failed to connect to the database");
    db::migrate(&db_conn)
        .await
        .expect("Failed to apply database migrations");
    tracing::info!("Database connection pool ready");

    let session_store = sessions::store::Connection::open(&REDIS_URL)
        .expect("Invalid session store URL");

    let app = routes::create_router(AppState {
        db_conn,
        session_store,
    });
    let listener = tokio::net::TcpListener::bind(BIND_ADDRESS.as_str())
        .await
        .expect("Failed to bind listener");
    tracing::info!(address = %*BIND_ADDRESS, "Course catalog service listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to init Axum service");
}

/// Resolve once the process is asked to stop (Ctrl-C, or SIGTERM on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        }
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(error = %err, "Failed to listen for SIGTERM"),
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutting down");
}
