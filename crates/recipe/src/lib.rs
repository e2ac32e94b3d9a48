pub mod suggest;
pub mod tag;
pub mod types;

pub use suggest::{validate_suggestion, TagSuggestionInput, TagSuggestionOutcome};
pub use tag::{
    related_tags, RecipeTag, Tag, TagCategory, TagOrigin, TagRelation, TagRelationKind, TagStatus,
};
pub use types::{Ingredient, InstructionStep, MealType, NutritionFacts, Recipe};
