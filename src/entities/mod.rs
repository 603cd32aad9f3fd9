pub mod activity_records;
pub mod badge_unlocks;
pub mod badges;
pub mod character_types;
pub mod characters;
pub mod classes;
pub mod enrollments;
pub mod notifications;
pub mod selection_records;
pub mod users;

pub use activity_records as activity_record_entity;
pub use badge_unlocks as badge_unlock_entity;
pub use badges as badge_entity;
pub use character_types as character_type_entity;
pub use characters as character_entity;
pub use classes as class_entity;
pub use enrollments as enrollment_entity;
pub use notifications as notification_entity;
pub use selection_records as selection_record_entity;
pub use users as user_entity;

pub use badges::BadgeConditionType;
pub use users::UserRole;
