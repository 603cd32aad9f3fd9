pub mod auth;
pub mod badge;
pub mod character;
pub mod class;
pub mod common;
pub mod level;
pub mod pagination;
pub mod selection;

pub use auth::*;
pub use badge::*;
pub use character::*;
pub use class::*;
pub use common::*;
pub use level::*;
pub use pagination::*;
pub use selection::*;
