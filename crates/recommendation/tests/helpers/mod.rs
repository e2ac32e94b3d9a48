//! Shared fixtures: in-memory collaborator sources and recipe builders

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use mealquest_recipe::{Ingredient, MealType, NutritionFacts, Recipe, RecipeTag, TagCategory};
use mealquest_recommendation::{
    CalorieLogSource, CatalogQuery, CompletedRecipeSource, ProfileSource, RecipeCatalog,
    RecommendationService, SettingsSource, SourceError, TagPreferenceStore,
};
use mealquest_user::{CalorieLog, TagPreference, UserProfile, UserSettings};

pub fn make_tag(id: &str, name: &str, popularity: f64) -> RecipeTag {
    RecipeTag {
        tag_id: id.to_string(),
        name: name.to_string(),
        category: TagCategory::Dietary,
        base_weight: 1.0,
        relevance_weight: 1.0,
        confidence: 1.0,
        popularity_score: popularity,
    }
}

pub fn make_ingredient(name: &str) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        category: "pantry".to_string(),
        amount: 1.0,
        unit: "cups".to_string(),
    }
}

pub fn make_recipe(id: &str, meal_type: MealType, calories: u32, tag_names: &[&str]) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: format!("Recipe {}", id),
        meal_type,
        prep_time_minutes: 25,
        nutrition: NutritionFacts {
            calories,
            ..Default::default()
        },
        points: 20,
        nutrition_score: 6.0,
        ingredients: vec![make_ingredient("rice"), make_ingredient("beans")],
        instructions: Vec::new(),
        tags: tag_names
            .iter()
            .map(|name| make_tag(&format!("tag-{}", name), name, 40.0))
            .collect(),
    }
}

pub struct FakeCatalog {
    pub recipes: Vec<Recipe>,
    pub fail: bool,
}

#[async_trait]
impl RecipeCatalog for FakeCatalog {
    async fn load_catalog(&self, query: &CatalogQuery) -> Result<Vec<Recipe>, SourceError> {
        if self.fail {
            return Err(SourceError::Store("catalog offline".to_string()));
        }
        Ok(self
            .recipes
            .iter()
            .filter(|recipe| {
                query
                    .required_tag_names
                    .iter()
                    .all(|name| recipe.has_tag_named(name))
                    && query
                        .meal_type
                        .is_none_or(|meal_type| recipe.meal_type == meal_type)
                    && query
                        .max_prep_time
                        .is_none_or(|max| recipe.prep_time_minutes <= max)
            })
            .cloned()
            .collect())
    }

    async fn load_recipe(&self, recipe_id: &str) -> Result<Option<Recipe>, SourceError> {
        if self.fail {
            return Err(SourceError::Store("catalog offline".to_string()));
        }
        Ok(self.recipes.iter().find(|r| r.id == recipe_id).cloned())
    }
}

pub struct FakeProfiles {
    pub profile: Option<UserProfile>,
    pub fail: bool,
}

#[async_trait]
impl ProfileSource for FakeProfiles {
    async fn load_profile(&self, _user_id: &str) -> Result<Option<UserProfile>, SourceError> {
        if self.fail {
            return Err(SourceError::Store("profiles offline".to_string()));
        }
        Ok(self.profile.clone())
    }
}

pub struct FakeSettings {
    pub settings: Option<UserSettings>,
    pub fail: bool,
}

#[async_trait]
impl SettingsSource for FakeSettings {
    async fn load_settings(&self, _user_id: &str) -> Result<Option<UserSettings>, SourceError> {
        if self.fail {
            return Err(SourceError::Store("settings offline".to_string()));
        }
        Ok(self.settings.clone())
    }
}

pub struct FakeCalorieLog {
    pub log: Option<CalorieLog>,
    pub fail: bool,
}

#[async_trait]
impl CalorieLogSource for FakeCalorieLog {
    async fn today(&self, _user_id: &str) -> Result<Option<CalorieLog>, SourceError> {
        if self.fail {
            return Err(SourceError::Store("calorie log offline".to_string()));
        }
        Ok(self.log)
    }
}

#[derive(Default)]
pub struct FakePreferences {
    pub rows: Mutex<Vec<TagPreference>>,
}

#[async_trait]
impl TagPreferenceStore for FakePreferences {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TagPreference>, SourceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, preference: &TagPreference) -> Result<(), SourceError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows
            .iter_mut()
            .find(|p| p.user_id == preference.user_id && p.tag_id == preference.tag_id)
        {
            *existing = preference.clone();
        } else {
            rows.push(preference.clone());
        }
        Ok(())
    }
}

pub struct FakeCompleted {
    pub ids: HashSet<String>,
}

#[async_trait]
impl CompletedRecipeSource for FakeCompleted {
    async fn completed_ids(&self, _user_id: &str) -> Result<HashSet<String>, SourceError> {
        Ok(self.ids.clone())
    }
}

/// Service over fully healthy fakes, plus the preference store handle for
/// asserting feedback writes
pub struct TestHarness {
    pub service: RecommendationService,
    pub preferences: Arc<FakePreferences>,
}

pub fn build_service(recipes: Vec<Recipe>) -> TestHarness {
    build_service_with(recipes, None, None, None, HashSet::new())
}

pub fn build_service_with(
    recipes: Vec<Recipe>,
    profile: Option<UserProfile>,
    settings: Option<UserSettings>,
    log: Option<CalorieLog>,
    completed: HashSet<String>,
) -> TestHarness {
    let preferences = Arc::new(FakePreferences::default());
    let service = RecommendationService::new(
        Arc::new(FakeCatalog {
            recipes,
            fail: false,
        }),
        Arc::new(FakeProfiles {
            profile,
            fail: false,
        }),
        Arc::new(FakeSettings {
            settings,
            fail: false,
        }),
        Arc::new(FakeCalorieLog { log, fail: false }),
        preferences.clone(),
        Arc::new(FakeCompleted { ids: completed }),
    );
    TestHarness {
        service,
        preferences,
    }
}
