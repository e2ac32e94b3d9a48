//! Named ranking strategies
//!
//! Two intentionally different rankings live behind one interface: the
//! lightweight three-factor sort the recipe list defaults to, and the full
//! seven-factor personalized engine. They are separate strategies, not one
//! formula with flags; the quick sort must stay cheap and preference-free.

use mealquest_recipe::Recipe;

use crate::context::ScoringContext;
use crate::scorer::{ingredient_match_score, score_breakdown};

/// A way of ordering recipes for display
pub trait RankingStrategy {
    /// Score a recipe in [0, 100]; higher sorts earlier
    fn score(&self, recipe: &Recipe, ctx: &ScoringContext) -> f64;
}

/// Lightweight default sort for the recipe list: nutrition quality 35%,
/// point reward 35%, pantry availability 30%. No per-user signals.
pub struct QuickRanking;

impl RankingStrategy for QuickRanking {
    fn score(&self, recipe: &Recipe, ctx: &ScoringContext) -> f64 {
        let nutrition = (recipe.nutrition_score * 10.0).clamp(0.0, 100.0);
        let points = f64::from(recipe.points).min(100.0);
        let availability = ingredient_match_score(recipe, ctx);

        nutrition * 0.35 + points * 0.35 + availability * 0.30
    }
}

/// The full personalized engine aggregate
pub struct PersonalizedRanking;

impl RankingStrategy for PersonalizedRanking {
    fn score(&self, recipe: &Recipe, ctx: &ScoringContext) -> f64 {
        score_breakdown(recipe, ctx).aggregate()
    }
}
