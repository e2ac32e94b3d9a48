//! Deterministic ordering and truncation

use std::cmp::Ordering;

use crate::scorer::ScoredRecipe;

/// Sort candidates by recommendation score descending and keep the top
/// `limit`.
///
/// Equal scores break ties on recipe id ascending so a fixed catalog and
/// context always produce the same ordering.
pub fn rank_recipes(mut candidates: Vec<ScoredRecipe>, limit: usize) -> Vec<ScoredRecipe> {
    candidates.sort_by(|a, b| {
        b.recommendation_score
            .partial_cmp(&a.recommendation_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.recipe.id.cmp(&b.recipe.id))
    });
    candidates.truncate(limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    use mealquest_recipe::{MealType, NutritionFacts, Recipe};

    use crate::context::{ScoringContext, TimeOfDay};
    use crate::scorer::score_recipe;

    fn make_scored(id: &str, calories: u32) -> ScoredRecipe {
        let recipe = Recipe {
            id: id.to_string(),
            title: format!("Recipe {}", id),
            meal_type: MealType::Dinner,
            prep_time_minutes: 20,
            nutrition: NutritionFacts {
                calories,
                ..Default::default()
            },
            points: 10,
            nutrition_score: 5.0,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            tags: Vec::new(),
        };
        let ctx = ScoringContext {
            user_id: "u1".to_string(),
            profile: Default::default(),
            settings: Default::default(),
            remaining_calories: 1000,
            tag_preferences: HashMap::new(),
            completed_recipes: HashSet::new(),
            available_ingredients: None,
            time_of_day: TimeOfDay::Dinner,
            max_prep_time: None,
            exclude_tags: Vec::new(),
            preferred_tags: Vec::new(),
        };
        score_recipe(recipe, &ctx)
    }

    #[test]
    fn test_sorted_descending_by_score() {
        // 300 cal lands the calorie sweet spot, 1300 scores zero there
        let ranked = rank_recipes(
            vec![make_scored("worse", 1300), make_scored("better", 300)],
            10,
        );
        assert_eq!(ranked[0].recipe.id, "better");
        assert!(ranked[0].recommendation_score > ranked[1].recommendation_score);
    }

    #[test]
    fn test_ties_break_on_id_ascending() {
        let ranked = rank_recipes(
            vec![
                make_scored("charlie", 300),
                make_scored("alpha", 300),
                make_scored("bravo", 300),
            ],
            10,
        );
        let ids: Vec<&str> = ranked.iter().map(|r| r.recipe.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let candidates: Vec<ScoredRecipe> = (0..50)
            .map(|i| make_scored(&format!("r{:02}", i), 300))
            .collect();
        let ranked = rank_recipes(candidates, 5);
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let build = || {
            vec![
                make_scored("a", 300),
                make_scored("b", 450),
                make_scored("c", 1300),
                make_scored("d", 300),
            ]
        };

        let first = rank_recipes(build(), 4);
        let second = rank_recipes(build(), 4);

        let first_ids: Vec<&str> = first.iter().map(|r| r.recipe.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|r| r.recipe.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.recommendation_score, b.recommendation_score);
        }
    }
}
