//! Helpers shared by the routes and services.
pub mod ajax;
pub mod httperror;
pub mod listing;
pub mod mobile;
pub mod pagination;
