// Domain modules, one per resource

pub mod activities;
pub mod auth;
pub mod classes;
pub mod participations;
pub mod scores;
pub mod semesters;
pub mod students;
