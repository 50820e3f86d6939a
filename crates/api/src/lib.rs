//! Hall-pass API server library.
//!
//! Exposes the attendance service, config, state, error handling and routes
//! so integration tests and the binary entrypoint can both reach them.

pub mod attendance;
pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
