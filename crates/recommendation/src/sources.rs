//! Collaborator contracts
//!
//! The engine never talks to storage directly; it consumes these traits and
//! leaves the wiring to the host. Each trait maps to one backing read (or
//! upsert) against the relational store, so implementations stay one query
//! deep and test doubles stay trivial.

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

use mealquest_recipe::{MealType, Recipe};
use mealquest_user::{CalorieLog, TagPreference, UserProfile, UserSettings};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("backing store error: {0}")]
    Store(String),

    #[error("malformed source data: {0}")]
    Malformed(String),
}

/// Candidate pre-filters pushed down into the catalog query.
///
/// Restriction tags and time/meal-type bounds are applied at the query layer
/// so the scorer never sees recipes the hard filter would drop anyway. With
/// no fields set this degrades to a full catalog scan.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Recipe must carry every one of these tag names (case-insensitive)
    pub required_tag_names: Vec<String>,
    pub meal_type: Option<MealType>,
    pub max_prep_time: Option<u32>,
}

/// Recipe catalog with joined ingredients, instructions and tag associations
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    async fn load_catalog(&self, query: &CatalogQuery) -> Result<Vec<Recipe>, SourceError>;

    async fn load_recipe(&self, recipe_id: &str) -> Result<Option<Recipe>, SourceError>;
}

#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn load_profile(&self, user_id: &str) -> Result<Option<UserProfile>, SourceError>;
}

#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn load_settings(&self, user_id: &str) -> Result<Option<UserSettings>, SourceError>;
}

#[async_trait]
pub trait CalorieLogSource: Send + Sync {
    /// Today's log for the user, if any was recorded
    async fn today(&self, user_id: &str) -> Result<Option<CalorieLog>, SourceError>;
}

#[async_trait]
pub trait TagPreferenceStore: Send + Sync {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TagPreference>, SourceError>;

    /// Insert or update by (user, tag). Last writer wins on concurrent
    /// updates to the same row.
    async fn upsert(&self, preference: &TagPreference) -> Result<(), SourceError>;
}

#[async_trait]
pub trait CompletedRecipeSource: Send + Sync {
    /// Ids of every recipe the user has completed at least once
    async fn completed_ids(&self, user_id: &str) -> Result<HashSet<String>, SourceError>;
}
