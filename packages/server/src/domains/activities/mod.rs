pub mod models;

pub use models::{Activity, CriteriaCategory};
