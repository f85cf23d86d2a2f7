pub mod jwt;
pub mod models;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use models::{Account, Role};
