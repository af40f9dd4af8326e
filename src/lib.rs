//! The course catalog API: training organizations, their courses and
//! teachers, searchable lists, and per-user favorites.
pub mod constants;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
