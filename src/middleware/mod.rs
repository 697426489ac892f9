//! Middleware module - request-wide limits

pub mod timeout;
