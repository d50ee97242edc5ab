//! API module - Router and HTTP handlers

pub mod handlers;
pub mod routes;
