pub mod admin;
pub mod application;
