pub mod models;

pub use models::{Class, ClassSummary};
