//! Recipe recommendation engine
//!
//! Scores a recipe catalog against a per-request user context (tag affinity,
//! pantry, calorie budget, time of day, dietary rules), removes anything the
//! user must never see, and returns a ranked list. Pure scoring over fetched
//! snapshots; the only write path is the interaction feedback loop that
//! maintains per-tag preferences.

pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod ranker;
pub mod scorer;
pub mod service;
pub mod sources;
pub mod strategy;

pub use config::EngineConfig;
pub use context::{build_context, RecommendationRequest, ScoringContext, TimeOfDay};
pub use error::RecommendationError;
pub use filter::apply_hard_filters;
pub use ranker::rank_recipes;
pub use scorer::{score_breakdown, score_recipe, ScoreBreakdown, ScoredRecipe};
pub use service::RecommendationService;
pub use sources::{
    CalorieLogSource, CatalogQuery, CompletedRecipeSource, ProfileSource, RecipeCatalog,
    SettingsSource, SourceError, TagPreferenceStore,
};
pub use strategy::{PersonalizedRanking, QuickRanking, RankingStrategy};
