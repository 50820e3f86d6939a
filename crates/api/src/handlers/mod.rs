pub mod locations;
pub mod scans;
pub mod students;
