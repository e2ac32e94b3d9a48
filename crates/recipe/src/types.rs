use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::tag::RecipeTag;

/// Meal classification for a recipe.
///
/// `Brunch` only exists as a recipe classification; recommendation requests
/// always resolve to one of the four standard time slots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MealType {
    Breakfast,
    Brunch,
    Lunch,
    Dinner,
    Snack,
}

/// Nutrition facts per serving
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: u32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Single ingredient line on a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub unit: String, // e.g. "cups", "tbsp", "grams"
}

/// Instruction step for recipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionStep {
    pub step_number: u32,
    pub instruction_text: String,
    pub timer_minutes: Option<u32>,
}

/// A cookable item from the catalog.
///
/// Recipes are owned by the catalog and immutable from the recommendation
/// engine's perspective; the engine only reads them into scored views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub meal_type: MealType,
    pub prep_time_minutes: u32,
    pub nutrition: NutritionFacts,
    /// Point reward granted when the recipe is completed
    pub points: u32,
    /// Nutrition quality on a 0-10 scale
    pub nutrition_score: f64,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<InstructionStep>,
    pub tags: Vec<RecipeTag>,
}

impl Recipe {
    /// Whether any of the recipe's tags carries the given name (case-insensitive)
    pub fn has_tag_named(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name_matches(name))
    }

    /// Whether any of the recipe's tags carries the given tag id
    pub fn has_tag_id(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t.tag_id == tag_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_meal_type_parses_case_insensitive() {
        assert_eq!(MealType::from_str("Breakfast").unwrap(), MealType::Breakfast);
        assert_eq!(MealType::from_str("dinner").unwrap(), MealType::Dinner);
        assert_eq!(MealType::from_str("BRUNCH").unwrap(), MealType::Brunch);
        assert!(MealType::from_str("supper").is_err());
    }

    #[test]
    fn test_meal_type_display_is_lowercase() {
        assert_eq!(MealType::Snack.to_string(), "snack");
    }
}
