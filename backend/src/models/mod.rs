pub mod macros;
pub mod pagination;
pub mod user;

pub use pagination::*;
pub use user::*;
