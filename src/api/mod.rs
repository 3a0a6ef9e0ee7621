//! API module - HTTP surface of the gateway

pub mod handlers;
pub mod routes;
