//! Defines data models (structs) which map directly to rows in the database.
pub mod city;
pub mod course;
pub mod favorite;
pub mod organization;
pub mod teacher;
pub mod user_ask;
