// Student Training Point Management - API Core
//
// Backend API for tracking student conduct/activity points across semesters.
// Students register for activities, staff review the registrations, and
// approved points roll up into a per-semester score record.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
