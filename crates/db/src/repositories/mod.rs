//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&SqlitePool` as the first argument.

pub mod location_repo;
pub mod scan_event_repo;
pub mod student_repo;

pub use location_repo::LocationRepo;
pub use scan_event_repo::ScanEventRepo;
pub use student_repo::StudentRepo;
