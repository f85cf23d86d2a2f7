// HTTP routes
pub mod activities;
pub mod auth;
pub mod classes;
pub mod health;
pub mod participations;
pub mod scores;
pub mod semesters;
pub mod setup;
pub mod students;
