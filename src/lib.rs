#![deny(warnings)]

#[macro_use(delete, get, patch, post)]
extern crate actix_web;

pub mod api;
pub mod config;
pub mod controllers;
pub mod entities;
pub mod errors;
pub mod helpers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod observability;
pub mod prelude;
pub mod requests;
pub mod responses;
pub mod router;
pub mod security;
pub mod services;

// Testing utilities (always available for integration tests)
pub mod testing;

pub use errors::Error;
pub use metrics::{AppMetrics, MetricsMiddleware};
pub use middlewares::v1::auth::Auth;
