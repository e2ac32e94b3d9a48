//! Scoring context assembly
//!
//! One [`ScoringContext`] is built per recommendation request from five
//! concurrent user-scoped reads. Context assembly never fails: a source that
//! errors or returns nothing degrades to a safe default so one flaky
//! collaborator cannot take down the whole request.

use std::collections::{HashMap, HashSet};

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

use mealquest_recipe::MealType;
use mealquest_user::{CalorieLog, UserProfile, UserSettings};

use crate::config::EngineConfig;
use crate::sources::{
    CalorieLogSource, CompletedRecipeSource, ProfileSource, SettingsSource, TagPreferenceStore,
};

/// Request-time slot a recommendation is being asked for.
///
/// Unlike [`MealType`] there is no brunch slot; brunch recipes are matched
/// partially against the breakfast and lunch slots instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl TimeOfDay {
    /// Infer the slot from a local hour: 06-10 breakfast, 11-15 lunch,
    /// 16-21 dinner, everything else snack.
    pub fn from_hour(hour: u32) -> TimeOfDay {
        match hour {
            6..=10 => TimeOfDay::Breakfast,
            11..=15 => TimeOfDay::Lunch,
            16..=21 => TimeOfDay::Dinner,
            _ => TimeOfDay::Snack,
        }
    }

    /// The recipe meal type that is an exact match for this slot
    pub fn exact_meal_type(&self) -> MealType {
        match self {
            TimeOfDay::Breakfast => MealType::Breakfast,
            TimeOfDay::Lunch => MealType::Lunch,
            TimeOfDay::Dinner => MealType::Dinner,
            TimeOfDay::Snack => MealType::Snack,
        }
    }
}

/// Caller-supplied inputs for one recommendation request
#[derive(Debug, Clone, Default)]
pub struct RecommendationRequest {
    pub user_id: String,
    /// Pantry ingredient names; matching is case-insensitive
    pub available_ingredients: Option<Vec<String>>,
    pub time_of_day: Option<TimeOfDay>,
    /// Prep-time budget in minutes
    pub max_prep_time: Option<u32>,
    /// Overrides the derived remaining-calorie budget entirely
    pub calorie_target: Option<u32>,
    /// Tag ids that disqualify any recipe carrying them
    pub exclude_tags: Vec<String>,
    /// Tag ids boosted during tag-match scoring
    pub preferred_tags: Vec<String>,
}

impl RecommendationRequest {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        RecommendationRequest {
            user_id: user_id.into(),
            ..Default::default()
        }
    }
}

/// Everything the scorer needs for one user at one point in time.
///
/// Ephemeral: built per request, never persisted.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub user_id: String,
    pub profile: UserProfile,
    pub settings: UserSettings,
    /// Calorie budget left for the day; may be zero or negative after a
    /// heavy logging day
    pub remaining_calories: i32,
    /// Tag id -> preference score in [-10, 10]
    pub tag_preferences: HashMap<String, i32>,
    pub completed_recipes: HashSet<String>,
    /// Lowercased pantry ingredient names; `None` when the caller provided
    /// no pantry data (an empty list counts as no data)
    pub available_ingredients: Option<HashSet<String>>,
    pub time_of_day: TimeOfDay,
    pub max_prep_time: Option<u32>,
    pub exclude_tags: Vec<String>,
    pub preferred_tags: Vec<String>,
}

/// Assemble the scoring context for one request.
///
/// The five user-scoped reads run concurrently and are all awaited before
/// scoring begins. Individual failures are logged and degrade to defaults;
/// only the catalog fetch (owned by the service, not built here) can end a
/// request early.
pub async fn build_context(
    profiles: &dyn ProfileSource,
    settings: &dyn SettingsSource,
    calorie_log: &dyn CalorieLogSource,
    preferences: &dyn TagPreferenceStore,
    completed: &dyn CompletedRecipeSource,
    request: RecommendationRequest,
    config: &EngineConfig,
) -> ScoringContext {
    let user_id = request.user_id.clone();

    let (profile, settings, today_log, preferences, completed_ids) = tokio::join!(
        profiles.load_profile(&user_id),
        settings.load_settings(&user_id),
        calorie_log.today(&user_id),
        preferences.list_for_user(&user_id),
        completed.completed_ids(&user_id),
    );

    let profile = match profile {
        Ok(Some(profile)) => profile,
        Ok(None) => UserProfile::default(),
        Err(error) => {
            tracing::warn!(%user_id, %error, "profile load failed, using defaults");
            UserProfile::default()
        }
    };

    let settings = match settings {
        Ok(Some(settings)) => settings,
        Ok(None) => UserSettings::default(),
        Err(error) => {
            tracing::warn!(%user_id, %error, "settings load failed, using defaults");
            UserSettings::default()
        }
    };

    let today_log = match today_log {
        Ok(log) => log.unwrap_or_default(),
        Err(error) => {
            tracing::warn!(%user_id, %error, "calorie log load failed, assuming none consumed");
            CalorieLog::default()
        }
    };

    let tag_preferences: HashMap<String, i32> = match preferences {
        Ok(rows) => rows.into_iter().map(|p| (p.tag_id, p.score)).collect(),
        Err(error) => {
            tracing::warn!(%user_id, %error, "tag preferences load failed, scoring without them");
            HashMap::new()
        }
    };

    let completed_recipes = match completed_ids {
        Ok(ids) => ids,
        Err(error) => {
            tracing::warn!(%user_id, %error, "completed recipes load failed, treating all as new");
            HashSet::new()
        }
    };

    let remaining_calories = match request.calorie_target {
        Some(target) => target as i32,
        None => {
            let goal = today_log
                .goal
                .or(settings.daily_calorie_target)
                .unwrap_or(config.default_calorie_target);
            goal as i32 - today_log.consumed as i32
        }
    };

    let time_of_day = request
        .time_of_day
        .unwrap_or_else(|| TimeOfDay::from_hour(Local::now().hour()));

    let available_ingredients = request.available_ingredients.and_then(|names| {
        if names.is_empty() {
            None
        } else {
            Some(names.into_iter().map(|n| n.trim().to_lowercase()).collect())
        }
    });

    ScoringContext {
        user_id,
        profile,
        settings,
        remaining_calories,
        tag_preferences,
        completed_recipes,
        available_ingredients,
        time_of_day,
        max_prep_time: request.max_prep_time,
        exclude_tags: request.exclude_tags,
        preferred_tags: request.preferred_tags,
    }
}
