//! Gateway module - dispatch, forwarding, and health aggregation

pub mod dispatch;
pub mod forwarder;
pub mod health;
