//! Services which correspond to routes and define core business logic.
pub mod favorites;
pub mod inquiries;
pub mod organizations;
pub mod sessions;
pub mod teachers;
