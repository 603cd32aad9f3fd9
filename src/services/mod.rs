pub mod auth_service;
pub mod badge_service;
pub mod character_service;
pub mod class_service;
pub mod notification_service;
pub mod reward_service;
pub mod selection_service;

pub use auth_service::*;
pub use badge_service::*;
pub use character_service::*;
pub use class_service::*;
pub use notification_service::*;
pub use reward_service::*;
pub use selection_service::*;
