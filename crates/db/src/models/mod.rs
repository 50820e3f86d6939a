//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Projection structs for joined queries where a handler needs them

pub mod location;
pub mod scan_event;
pub mod student;
