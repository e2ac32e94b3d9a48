//! Hard exclusion filtering
//!
//! Filtering runs after scoring and is independent of it: a recipe that must
//! never be shown is removed no matter how well it scored.
//!
//! # Business Rules
//! - **Inclusion, not exclusion**: a dietary restriction requires the recipe
//!   to positively carry the matching tag. A "vegan" restriction means only
//!   vegan-tagged recipes pass.
//! - **AND logic**: every restriction must be satisfied. A user with "vegan"
//!   and "nut-free" only sees recipes tagged with both.
//! - **Safety over recall**: recipes missing a tag are excluded even if they
//!   would in fact qualify; an untagged compliant recipe is an acceptable
//!   loss, a recommended allergen is not.
//! - Any tag id in the request's exclude list disqualifies a recipe carrying
//!   that tag, independent of restrictions.

use mealquest_recipe::Recipe;
use mealquest_user::DietaryRestriction;

use crate::scorer::ScoredRecipe;

/// Drop scored candidates that violate hard rules
pub fn apply_hard_filters(
    candidates: Vec<ScoredRecipe>,
    restrictions: &[DietaryRestriction],
    exclude_tags: &[String],
) -> Vec<ScoredRecipe> {
    candidates
        .into_iter()
        .filter(|candidate| {
            satisfies_all_restrictions(&candidate.recipe, restrictions)
                && !carries_excluded_tag(&candidate.recipe, exclude_tags)
        })
        .collect()
}

/// Check that a recipe carries the matching tag for every restriction
fn satisfies_all_restrictions(recipe: &Recipe, restrictions: &[DietaryRestriction]) -> bool {
    restrictions
        .iter()
        .all(|restriction| recipe.has_tag_named(restriction.tag_name()))
}

/// Check whether the recipe carries any explicitly excluded tag id
fn carries_excluded_tag(recipe: &Recipe, exclude_tags: &[String]) -> bool {
    exclude_tags.iter().any(|tag_id| recipe.has_tag_id(tag_id))
}
