//! Tests running the catalog's SQL against a migrated Postgres database.
//! `DATABASE_URL` must point at a server where test databases can be created.
use assert_matches::assert_matches;
use coursecatalog_api::{
    db::models::favorite::{FavoriteInsert, FavoriteTarget},
    services::{
        favorites::{self, errors::FavoriteError, FavoriteForm, FavoriteToggle},
        organizations::{self, errors::OrgDetailError, OrgTab},
        sessions::{UserSession, Viewer},
        teachers::{self, errors::TeacherDetailError},
    },
};
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

fn signed_in() -> Viewer {
    Viewer::Authenticated(UserSession::new(Uuid::new_v4(), String::from("csrf")))
}

fn form(fav_id: i64, fav_type: i16) -> FavoriteForm {
    FavoriteForm {
        fav_id: Some(fav_id.to_string()),
        fav_type: Some(fav_type.to_string()),
    }
}

async fn insert_city(pool: &PgPool) -> i64 {
    sqlx::query_scalar("INSERT INTO city (name) VALUES ('Beijing') RETURNING id")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn insert_org(pool: &PgPool, fav_nums: i64) -> i64 {
    let city_id = insert_city(pool).await;
    sqlx::query_scalar(
        "INSERT INTO course_org (name, city_id, fav_nums) VALUES ('Rust Academy', $1, $2) RETURNING id",
    )
    .bind(city_id)
    .bind(fav_nums)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn insert_teacher(pool: &PgPool, org_id: i64, click_nums: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO teacher (org_id, name, click_nums) VALUES ($1, 'Li Lei', $2) RETURNING id",
    )
    .bind(org_id)
    .bind(click_nums)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn insert_course(pool: &PgPool, org_id: i64, teacher_id: Option<i64>, fav_nums: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO course (org_id, teacher_id, name, fav_nums) VALUES ($1, $2, 'Ownership', $3) RETURNING id",
    )
    .bind(org_id)
    .bind(teacher_id)
    .bind(fav_nums)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn counter(pool: &PgPool, table: &str, column: &str, id: i64) -> i64 {
    sqlx::query_scalar(&format!("SELECT {column} FROM {table} WHERE id = $1"))
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn favorite_rows(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM user_favorite")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn toggling_twice_restores_row_and_counter(pool: PgPool) {
    let org_id = insert_org(&pool, 4).await;
    let viewer = signed_in();
    let target = FavoriteTarget::organization(org_id);

    let first = favorites::toggle_favorite(&viewer, &form(org_id, 2), &pool)
        .await
        .unwrap();
    assert_eq!(first, FavoriteToggle::Favorited);
    assert_eq!(counter(&pool, "course_org", "fav_nums", org_id).await, 5);
    assert!(favorites::is_favorited(&viewer, target, &pool).await.unwrap());

    let second = favorites::toggle_favorite(&viewer, &form(org_id, 2), &pool)
        .await
        .unwrap();
    assert_eq!(second, FavoriteToggle::Unfavorited);
    assert_eq!(counter(&pool, "course_org", "fav_nums", org_id).await, 4);
    assert!(!favorites::is_favorited(&viewer, target, &pool).await.unwrap());
    assert_eq!(favorite_rows(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn unfavoriting_clamps_counter_at_zero(pool: PgPool) {
    let org_id = insert_org(&pool, 0).await;
    let course_id = insert_course(&pool, org_id, None, 0).await;
    let viewer = signed_in();
    sqlx::query("INSERT INTO user_favorite (user_id, fav_id, fav_type) VALUES ($1, $2, 1)")
        .bind(viewer.user_id().unwrap())
        .bind(course_id)
        .execute(&pool)
        .await
        .unwrap();

    let toggle = favorites::toggle_favorite(&viewer, &form(course_id, 1), &pool)
        .await
        .unwrap();
    assert_eq!(toggle, FavoriteToggle::Unfavorited);
    assert_eq!(counter(&pool, "course", "fav_nums", course_id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn favoriting_missing_target_stores_nothing(pool: PgPool) {
    let result = favorites::toggle_favorite(&signed_in(), &form(999, 3), &pool).await;
    assert_matches!(
        result,
        Err(FavoriteError::TargetNonExistent(target)) if target == FavoriteTarget::teacher(999)
    );
    assert_eq!(favorite_rows(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_insert_stores_nothing(pool: PgPool) {
    let org_id = insert_org(&pool, 0).await;
    let user_id = Uuid::new_v4();
    let target = FavoriteTarget::organization(org_id);
    let mut tx = pool.begin().await.unwrap();

    let first = FavoriteInsert { user_id, target }.store(&mut tx).await.unwrap();
    assert_matches!(first, Some(favorite) if favorite.fav_id == org_id && favorite.fav_type == 2);
    let second = FavoriteInsert { user_id, target }.store(&mut tx).await.unwrap();
    assert!(second.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn toggle_losing_a_race_reports_conflict(pool: PgPool) {
    let org_id = insert_org(&pool, 0).await;
    let viewer = signed_in();
    let user_id = viewer.user_id().unwrap();
    let target = FavoriteTarget::organization(org_id);

    // An uncommitted favorite from another request makes the toggle's insert wait.
    let mut racer = pool.begin().await.unwrap();
    FavoriteInsert { user_id, target }
        .store(&mut racer)
        .await
        .unwrap()
        .unwrap();

    let toggle = tokio::spawn({
        let pool = pool.clone();
        async move { favorites::toggle_favorite(&viewer, &form(org_id, 2), &pool).await }
    });
    for _ in 0..500 {
        let waiting: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pg_stat_activity WHERE datname = current_database() AND wait_event_type = 'Lock'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        if waiting > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    racer.commit().await.unwrap();

    assert_matches!(
        toggle.await.unwrap(),
        Err(FavoriteError::Conflict(conflicted)) if conflicted == target
    );
    assert_eq!(favorite_rows(&pool).await, 1);
    assert_eq!(counter(&pool, "course_org", "fav_nums", org_id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn only_home_tab_counts_a_view(pool: PgPool) {
    let org_id = insert_org(&pool, 0).await;

    for tab in [OrgTab::Course, OrgTab::Desc, OrgTab::Teacher] {
        organizations::organization_detail(org_id, tab, &Viewer::Anonymous, &pool)
            .await
            .unwrap();
    }
    assert_eq!(counter(&pool, "course_org", "click_nums", org_id).await, 0);

    let home = organizations::organization_detail(org_id, OrgTab::Home, &Viewer::Anonymous, &pool)
        .await
        .unwrap();
    assert_eq!(home.course_org.click_nums, 1);
    assert_eq!(counter(&pool, "course_org", "click_nums", org_id).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn home_tab_previews_courses_and_teachers(pool: PgPool) {
    let org_id = insert_org(&pool, 0).await;
    for _ in 0..2 {
        insert_teacher(&pool, org_id, 0).await;
    }
    for _ in 0..4 {
        insert_course(&pool, org_id, None, 0).await;
    }
    let anonymous = Viewer::Anonymous;
    let detail = |tab| organizations::organization_detail(org_id, tab, &anonymous, &pool);

    let home = detail(OrgTab::Home).await.unwrap();
    assert_eq!(home.all_courses.map(|courses| courses.len()), Some(3));
    assert_eq!(home.all_teachers.map(|teachers| teachers.len()), Some(1));

    let courses = detail(OrgTab::Course).await.unwrap();
    assert_eq!(courses.all_courses.map(|courses| courses.len()), Some(4));
    assert!(courses.all_teachers.is_none());

    let staff = detail(OrgTab::Teacher).await.unwrap();
    assert_eq!(staff.all_teachers.map(|teachers| teachers.len()), Some(2));
    assert!(staff.all_courses.is_none());

    let desc = detail(OrgTab::Desc).await.unwrap();
    assert!(desc.all_courses.is_none() && desc.all_teachers.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn org_tab_shows_viewer_favorite(pool: PgPool) {
    let org_id = insert_org(&pool, 0).await;
    let viewer = signed_in();
    favorites::toggle_favorite(&viewer, &form(org_id, 2), &pool)
        .await
        .unwrap();

    let mine = organizations::organization_detail(org_id, OrgTab::Desc, &viewer, &pool)
        .await
        .unwrap();
    assert!(mine.has_fav);
    let anonymous = organizations::organization_detail(org_id, OrgTab::Desc, &Viewer::Anonymous, &pool)
        .await
        .unwrap();
    assert!(!anonymous.has_fav);
}

#[sqlx::test(migrations = "./migrations")]
async fn missing_entities_are_reported(pool: PgPool) {
    assert_matches!(
        organizations::organization_detail(404, OrgTab::Home, &Viewer::Anonymous, &pool).await,
        Err(OrgDetailError::NonExistent(404))
    );
    assert_matches!(
        teachers::teacher_detail(404, &Viewer::Anonymous, &pool).await,
        Err(TeacherDetailError::NonExistent(404))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn teacher_page_counts_every_view(pool: PgPool) {
    let org_id = insert_org(&pool, 0).await;
    let teacher_id = insert_teacher(&pool, org_id, 0).await;
    let course_id = insert_course(&pool, org_id, Some(teacher_id), 0).await;
    insert_course(&pool, org_id, None, 0).await;

    teachers::teacher_detail(teacher_id, &Viewer::Anonymous, &pool)
        .await
        .unwrap();
    let page = teachers::teacher_detail(teacher_id, &Viewer::Anonymous, &pool)
        .await
        .unwrap();
    assert_eq!(page.teacher.click_nums, 2);
    assert_eq!(counter(&pool, "teacher", "click_nums", teacher_id).await, 2);
    assert_eq!(
        page.all_courses.iter().map(|course| course.id).collect::<Vec<_>>(),
        vec![course_id]
    );
    assert!(!page.has_teacher_faved && !page.has_org_faved);
}

#[sqlx::test(migrations = "./migrations")]
async fn teacher_leaderboard_ranks_by_views(pool: PgPool) {
    let org_id = insert_org(&pool, 0).await;
    let mut ids = Vec::new();
    for click_nums in [3, 9, 3, 0, 7, 1] {
        ids.push(insert_teacher(&pool, org_id, click_nums).await);
    }

    // The viewed teacher gains a click before ranking: 0 becomes 1.
    let page = teachers::teacher_detail(ids[3], &Viewer::Anonymous, &pool)
        .await
        .unwrap();
    let ranked: Vec<i64> = page.sorted_teachers.iter().map(|teacher| teacher.id).collect();
    assert_eq!(ranked, vec![ids[1], ids[4], ids[0], ids[2], ids[3]]);
}
