pub mod preference;
pub mod types;

pub use preference::{
    InteractionType, TagPreference, MAX_PREFERENCE_SCORE, MIN_PREFERENCE_SCORE,
};
pub use types::{ActivityLevel, CalorieLog, DietaryRestriction, UserProfile, UserSettings};
