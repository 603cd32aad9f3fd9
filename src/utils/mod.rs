pub mod join_code;
pub mod jwt;
pub mod levels;
pub mod password;

pub use join_code::{generate_join_code, generate_unique_join_code};
pub use jwt::*;
pub use levels::{max_level, resolve_level, threshold_for, LEVEL_THRESHOLDS};
pub use password::*;
