//! Domain types and pure rules for the hall-pass service.
//!
//! Nothing in this crate touches the database or HTTP; the `db` and `api`
//! crates build on these definitions.

pub mod attendance;
pub mod error;
pub mod types;
pub mod validation;
