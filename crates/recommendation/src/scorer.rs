//! Recipe scoring
//!
//! Seven independent sub-scores, each clamped to [0, 100], combined into one
//! recommendation score by a convex weighting (the weights sum to 1.0, so the
//! aggregate stays in [0, 100] by construction). Scoring is pure: given the
//! same recipe and context it always produces the same numbers.

use serde::Serialize;

use mealquest_recipe::{MealType, Recipe};

use crate::context::{ScoringContext, TimeOfDay};

pub const TAG_MATCH_WEIGHT: f64 = 0.25;
pub const INGREDIENT_MATCH_WEIGHT: f64 = 0.20;
pub const USER_PREFERENCE_WEIGHT: f64 = 0.15;
pub const CALORIE_ALIGNMENT_WEIGHT: f64 = 0.15;
pub const TIME_RELEVANCE_WEIGHT: f64 = 0.10;
pub const POPULARITY_WEIGHT: f64 = 0.10;
pub const NOVELTY_WEIGHT: f64 = 0.05;

/// The seven named sub-scores behind one recommendation score, kept for UI
/// transparency and debugging
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreBreakdown {
    pub tag_match: f64,
    pub ingredient_match: f64,
    pub user_preference: f64,
    pub calorie_alignment: f64,
    pub time_relevance: f64,
    pub popularity: f64,
    pub novelty: f64,
}

impl ScoreBreakdown {
    /// Convex combination of the sub-scores
    pub fn aggregate(&self) -> f64 {
        self.tag_match * TAG_MATCH_WEIGHT
            + self.ingredient_match * INGREDIENT_MATCH_WEIGHT
            + self.user_preference * USER_PREFERENCE_WEIGHT
            + self.calorie_alignment * CALORIE_ALIGNMENT_WEIGHT
            + self.time_relevance * TIME_RELEVANCE_WEIGHT
            + self.popularity * POPULARITY_WEIGHT
            + self.novelty * NOVELTY_WEIGHT
    }
}

/// A recipe with its recommendation score and breakdown.
///
/// A per-request view, not an entity; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub recommendation_score: f64,
    pub scoring_breakdown: ScoreBreakdown,
}

/// Score one recipe against one context
pub fn score_recipe(recipe: Recipe, ctx: &ScoringContext) -> ScoredRecipe {
    let breakdown = score_breakdown(&recipe, ctx);
    ScoredRecipe {
        recommendation_score: breakdown.aggregate(),
        scoring_breakdown: breakdown,
        recipe,
    }
}

/// Compute all seven sub-scores for one recipe
pub fn score_breakdown(recipe: &Recipe, ctx: &ScoringContext) -> ScoreBreakdown {
    ScoreBreakdown {
        tag_match: tag_match_score(recipe, ctx),
        ingredient_match: ingredient_match_score(recipe, ctx),
        user_preference: user_preference_score(recipe, ctx),
        calorie_alignment: calorie_alignment_score(
            recipe.nutrition.calories,
            ctx.remaining_calories,
        ),
        time_relevance: time_relevance_score(recipe, ctx),
        popularity: popularity_score(recipe),
        novelty: novelty_score(recipe, ctx),
    }
}

/// Tag affinity: weighted average of per-tag values.
///
/// Each tag starts from a neutral 50, shifted by the user's preference score
/// (x3, capped at +/-30), a flat +20 when the tag is in the request's
/// preferred list, and up to +10 from the tag's global popularity. Tags are
/// weighted by `base_weight * relevance_weight`; a recipe with no tags (or
/// only zero-weight associations) scores a neutral 50.
pub fn tag_match_score(recipe: &Recipe, ctx: &ScoringContext) -> f64 {
    if recipe.tags.is_empty() {
        return 50.0;
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for tag in &recipe.tags {
        let preference = ctx.tag_preferences.get(&tag.tag_id).copied().unwrap_or(0);
        let mut value = 50.0 + (f64::from(preference) * 3.0).clamp(-30.0, 30.0);

        if ctx.preferred_tags.iter().any(|id| id == &tag.tag_id) {
            value += 20.0;
        }

        value += (tag.popularity_score / 10.0).clamp(0.0, 10.0);

        let weight = tag.weight();
        weighted_sum += value * weight;
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        return 50.0;
    }

    (weighted_sum / total_weight).clamp(0.0, 100.0)
}

/// Pantry coverage: percentage of the recipe's ingredients available.
///
/// With no pantry data at all the score is a fixed 30 rather than 0, so
/// recipes are dampened but not suppressed for users who never enter their
/// pantry.
pub fn ingredient_match_score(recipe: &Recipe, ctx: &ScoringContext) -> f64 {
    let Some(available) = &ctx.available_ingredients else {
        return 30.0;
    };

    if recipe.ingredients.is_empty() {
        return 0.0;
    }

    let matched = recipe
        .ingredients
        .iter()
        .filter(|ingredient| available.contains(&ingredient.name.trim().to_lowercase()))
        .count();

    (matched as f64 / recipe.ingredients.len() as f64) * 100.0
}

/// Profile-level dietary preferences, with settings-level restrictions as an
/// automatic disqualifier.
///
/// Any recipe tag matching a hard restriction zeroes the sub-score outright;
/// the hard filter removes such recipes independently, this just guarantees
/// they can never ride a high score past a filter bug.
pub fn user_preference_score(recipe: &Recipe, ctx: &ScoringContext) -> f64 {
    let restricted = ctx
        .settings
        .dietary_restrictions
        .iter()
        .any(|restriction| recipe.has_tag_named(restriction.tag_name()));
    if restricted {
        return 0.0;
    }

    let mut score = 50.0;
    for preference in &ctx.profile.dietary_preferences {
        if recipe.has_tag_named(preference) {
            score += 15.0;
        }
    }

    score.min(100.0)
}

/// Calorie-budget alignment: non-monotonic band function of the ratio
/// `recipe_calories / remaining_calories`.
///
/// The sweet spot is a recipe using 25-40% of the remaining budget. Very
/// small recipes still score well (70); anything more than 20% over budget
/// scores zero. Missing data on either side is neutral.
pub fn calorie_alignment_score(recipe_calories: u32, remaining_calories: i32) -> f64 {
    if recipe_calories == 0 || remaining_calories <= 0 {
        return 50.0;
    }

    let ratio = f64::from(recipe_calories) / f64::from(remaining_calories);

    if ratio < 0.25 {
        70.0
    } else if ratio <= 0.40 {
        100.0
    } else if ratio <= 0.60 {
        80.0
    } else if ratio <= 0.80 {
        60.0
    } else if ratio <= 1.00 {
        40.0
    } else if ratio <= 1.20 {
        20.0
    } else {
        0.0
    }
}

/// Fit to the requested (or inferred) time of day, plus prep-time budget.
///
/// Exact meal-type match is worth +40; a brunch recipe gets a +20 partial
/// match against breakfast or lunch slots. A prep-time budget, when present,
/// rewards fitting (+10) and penalizes exceeding (-20).
pub fn time_relevance_score(recipe: &Recipe, ctx: &ScoringContext) -> f64 {
    let mut score = 50.0;

    if recipe.meal_type == ctx.time_of_day.exact_meal_type() {
        score += 40.0;
    } else if recipe.meal_type == MealType::Brunch
        && matches!(ctx.time_of_day, TimeOfDay::Breakfast | TimeOfDay::Lunch)
    {
        score += 20.0;
    }

    if let Some(budget) = ctx.max_prep_time {
        if recipe.prep_time_minutes <= budget {
            score += 10.0;
        } else {
            score -= 20.0;
        }
    }

    score.clamp(0.0, 100.0)
}

/// Novelty: full marks for recipes the user has never completed, a reduced
/// (but non-zero) 30 for repeats
pub fn novelty_score(recipe: &Recipe, ctx: &ScoringContext) -> f64 {
    if ctx.completed_recipes.contains(&recipe.id) {
        30.0
    } else {
        100.0
    }
}

/// Global appeal: 70% average tag popularity, 30% nutrition quality.
///
/// Recipes with no tags default to 50.
pub fn popularity_score(recipe: &Recipe) -> f64 {
    if recipe.tags.is_empty() {
        return 50.0;
    }

    let tag_popularity = recipe
        .tags
        .iter()
        .map(|t| t.popularity_score)
        .sum::<f64>()
        / recipe.tags.len() as f64;

    let nutrition = (recipe.nutrition_score * 10.0).clamp(0.0, 100.0);

    0.7 * tag_popularity.clamp(0.0, 100.0) + 0.3 * nutrition
}
