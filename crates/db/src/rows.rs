//! Raw query rows and their domain mappings
//!
//! One `FromRow` struct per join shape and one pure mapping function per
//! entity. The mapping layer is deliberately independent of the fetch layer
//! so it can be unit-tested without a database, and so the engine never sees
//! storage shapes.
//!
//! Malformed per-row data (an unknown meal type, an unparsable JSON column)
//! degrades to a logged default; one bad row must not abort a whole catalog
//! load.

use std::str::FromStr;

use mealquest_recipe::{
    Ingredient, InstructionStep, MealType, NutritionFacts, Recipe, RecipeTag, Tag, TagCategory,
    TagOrigin, TagRelation, TagRelationKind, TagStatus,
};
use mealquest_user::{
    ActivityLevel, CalorieLog, DietaryRestriction, TagPreference, UserProfile, UserSettings,
};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeRow {
    pub id: String,
    pub title: String,
    pub meal_type: String,
    pub prep_time_minutes: i64,
    pub calories: i64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub points: i64,
    pub nutrition_score: f64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeIngredientRow {
    pub recipe_id: String,
    pub position: i64,
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeInstructionRow {
    pub recipe_id: String,
    pub step_number: i64,
    pub instruction_text: String,
    pub timer_minutes: Option<i64>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeTagRow {
    pub recipe_id: String,
    pub tag_id: String,
    pub name: String,
    pub category: String,
    pub base_weight: f64,
    pub relevance_weight: f64,
    pub confidence: f64,
    pub popularity_score: f64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub base_weight: f64,
    pub popularity_score: f64,
    pub origin: String,
    pub status: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagRelationRow {
    pub tag_id: String,
    pub related_tag_id: String,
    pub kind: String,
    pub strength: f64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserProfileRow {
    pub user_id: String,
    pub level: i64,
    pub dietary_preferences: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserSettingsRow {
    pub user_id: String,
    pub dietary_restrictions: String,
    pub daily_calorie_target: Option<i64>,
    pub activity_level: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CalorieLogRow {
    pub consumed: i64,
    pub goal: Option<i64>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagPreferenceRow {
    pub user_id: String,
    pub tag_id: String,
    pub score: i64,
    pub positive_count: i64,
    pub negative_count: i64,
    pub interaction_count: i64,
}

pub fn map_meal_type(raw: &str) -> MealType {
    MealType::from_str(raw).unwrap_or_else(|_| {
        tracing::warn!(meal_type = raw, "unknown meal type, defaulting to snack");
        MealType::Snack
    })
}

pub fn map_tag_category(raw: &str) -> TagCategory {
    TagCategory::from_str(raw).unwrap_or_else(|_| {
        tracing::warn!(category = raw, "unknown tag category, defaulting to ingredient_type");
        TagCategory::IngredientType
    })
}

/// Parse a JSON array-of-strings column, degrading to empty on bad data
fn map_string_list(raw: &str, column: &'static str) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(raw).unwrap_or_else(|error| {
        tracing::warn!(%error, column, "unparsable list column, treating as empty");
        Vec::new()
    })
}

/// Assemble one recipe from its base row and joined child rows.
///
/// Child rows are filtered by recipe id here, so callers may pass the full
/// result sets from catalog-wide queries.
pub fn map_recipe(
    row: &RecipeRow,
    ingredients: &[RecipeIngredientRow],
    instructions: &[RecipeInstructionRow],
    tags: &[RecipeTagRow],
) -> Recipe {
    let mut ingredient_rows: Vec<&RecipeIngredientRow> = ingredients
        .iter()
        .filter(|i| i.recipe_id == row.id)
        .collect();
    ingredient_rows.sort_by_key(|i| i.position);

    let mut instruction_rows: Vec<&RecipeInstructionRow> = instructions
        .iter()
        .filter(|i| i.recipe_id == row.id)
        .collect();
    instruction_rows.sort_by_key(|i| i.step_number);

    Recipe {
        id: row.id.clone(),
        title: row.title.clone(),
        meal_type: map_meal_type(&row.meal_type),
        prep_time_minutes: row.prep_time_minutes.max(0) as u32,
        nutrition: NutritionFacts {
            calories: row.calories.max(0) as u32,
            protein_g: row.protein_g,
            carbs_g: row.carbs_g,
            fat_g: row.fat_g,
        },
        points: row.points.max(0) as u32,
        nutrition_score: row.nutrition_score,
        ingredients: ingredient_rows
            .into_iter()
            .map(|i| Ingredient {
                name: i.name.clone(),
                category: i.category.clone(),
                amount: i.amount,
                unit: i.unit.clone(),
            })
            .collect(),
        instructions: instruction_rows
            .into_iter()
            .map(|i| InstructionStep {
                step_number: i.step_number.max(0) as u32,
                instruction_text: i.instruction_text.clone(),
                timer_minutes: i.timer_minutes.map(|t| t.max(0) as u32),
            })
            .collect(),
        tags: tags
            .iter()
            .filter(|t| t.recipe_id == row.id)
            .map(map_recipe_tag)
            .collect(),
    }
}

pub fn map_recipe_tag(row: &RecipeTagRow) -> RecipeTag {
    RecipeTag {
        tag_id: row.tag_id.clone(),
        name: row.name.clone(),
        category: map_tag_category(&row.category),
        base_weight: row.base_weight,
        relevance_weight: row.relevance_weight,
        confidence: row.confidence,
        popularity_score: row.popularity_score,
    }
}

pub fn map_tag(row: &TagRow) -> Tag {
    Tag {
        id: row.id.clone(),
        name: row.name.clone(),
        category: map_tag_category(&row.category),
        base_weight: row.base_weight,
        popularity_score: row.popularity_score,
        origin: TagOrigin::from_str(&row.origin).unwrap_or(TagOrigin::System),
        status: TagStatus::from_str(&row.status).unwrap_or(TagStatus::Pending),
    }
}

/// Map one relation row, skipping rows with an unknown kind
pub fn map_tag_relation(row: &TagRelationRow) -> Option<TagRelation> {
    let Ok(kind) = TagRelationKind::from_str(&row.kind) else {
        tracing::warn!(kind = %row.kind, "unknown tag relation kind, skipping");
        return None;
    };
    Some(TagRelation {
        tag_id: row.tag_id.clone(),
        related_tag_id: row.related_tag_id.clone(),
        kind,
        strength: row.strength,
    })
}

pub fn map_profile(row: &UserProfileRow) -> UserProfile {
    UserProfile {
        id: row.user_id.clone(),
        level: row.level.max(0) as u32,
        dietary_preferences: map_string_list(&row.dietary_preferences, "dietary_preferences"),
    }
}

pub fn map_settings(row: &UserSettingsRow) -> UserSettings {
    let dietary_restrictions = map_string_list(&row.dietary_restrictions, "dietary_restrictions")
        .iter()
        .filter_map(|raw| {
            let parsed = DietaryRestriction::parse(raw);
            if parsed.is_none() {
                tracing::warn!(restriction = %raw, "unknown dietary restriction id, skipping");
            }
            parsed
        })
        .collect();

    UserSettings {
        dietary_restrictions,
        daily_calorie_target: row.daily_calorie_target.map(|t| t.max(0) as u32),
        activity_level: ActivityLevel::from_str(&row.activity_level)
            .unwrap_or(ActivityLevel::Moderate),
    }
}

pub fn map_calorie_log(row: &CalorieLogRow) -> CalorieLog {
    CalorieLog {
        consumed: row.consumed.max(0) as u32,
        goal: row.goal.map(|g| g.max(0) as u32),
    }
}

pub fn map_preference(row: &TagPreferenceRow) -> TagPreference {
    TagPreference {
        user_id: row.user_id.clone(),
        tag_id: row.tag_id.clone(),
        score: row.score as i32,
        positive_count: row.positive_count.max(0) as u32,
        negative_count: row.negative_count.max(0) as u32,
        interaction_count: row.interaction_count.max(0) as u32,
    }
}
