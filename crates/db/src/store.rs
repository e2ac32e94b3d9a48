//! SQLite implementations of the engine's collaborator contracts

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use mealquest_recipe::{Recipe, Tag, TagRelation};
use mealquest_recommendation::{
    CalorieLogSource, CatalogQuery, CompletedRecipeSource, ProfileSource, RecipeCatalog,
    SettingsSource, SourceError, TagPreferenceStore,
};
use mealquest_user::{CalorieLog, TagPreference, UserProfile, UserSettings};

use crate::rows::{
    map_calorie_log, map_preference, map_profile, map_recipe, map_settings, map_tag,
    map_tag_relation, CalorieLogRow, RecipeIngredientRow, RecipeInstructionRow, RecipeRow,
    RecipeTagRow, TagPreferenceRow, TagRelationRow, TagRow, UserProfileRow, UserSettingsRow,
};

const SCHEMA: &str = include_str!("../schema.sql");

/// All five collaborator contracts over one SQLite pool
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }

    /// Create the backing tables if they do not exist yet
    pub async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(SCHEMA).execute(pool).await?;
        Ok(())
    }

    /// Every tag in the catalog, for suggestion duplicate checks and
    /// discovery surfaces
    pub async fn list_tags(&self) -> Result<Vec<Tag>, SourceError> {
        let rows: Vec<TagRow> = sqlx::query_as(
            r#"
            SELECT id, name, category, base_weight, popularity_score, origin, status
            FROM tags
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.iter().map(map_tag).collect())
    }

    /// Relations out of one tag, strongest first, for discovery surfaces
    pub async fn tag_relations(&self, tag_id: &str) -> Result<Vec<TagRelation>, SourceError> {
        let rows: Vec<TagRelationRow> = sqlx::query_as(
            r#"
            SELECT tag_id, related_tag_id, kind, strength
            FROM tag_relations
            WHERE tag_id = ?1
            ORDER BY strength DESC
            "#,
        )
        .bind(tag_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.iter().filter_map(map_tag_relation).collect())
    }

    /// Fetch the catalog rows honoring the query's SQL-level pre-filters
    async fn fetch_catalog_rows(
        &self,
        query: &CatalogQuery,
    ) -> Result<
        (
            Vec<RecipeRow>,
            Vec<RecipeIngredientRow>,
            Vec<RecipeInstructionRow>,
            Vec<RecipeTagRow>,
        ),
        sqlx::Error,
    > {
        let meal_type = query.meal_type.map(|m| m.to_string());
        let max_prep = query.max_prep_time.map(i64::from);

        let recipes: Vec<RecipeRow> = sqlx::query_as(
            r#"
            SELECT id, title, meal_type, prep_time_minutes, calories, protein_g, carbs_g,
                   fat_g, points, nutrition_score
            FROM recipes
            WHERE (?1 IS NULL OR meal_type = ?1)
              AND (?2 IS NULL OR prep_time_minutes <= ?2)
            ORDER BY id
            "#,
        )
        .bind(&meal_type)
        .bind(max_prep)
        .fetch_all(&self.pool)
        .await?;

        let ingredients: Vec<RecipeIngredientRow> = sqlx::query_as(
            r#"
            SELECT i.recipe_id, i.position, i.name, i.category, i.amount, i.unit
            FROM recipe_ingredients i
            JOIN recipes r ON r.id = i.recipe_id
            WHERE (?1 IS NULL OR r.meal_type = ?1)
              AND (?2 IS NULL OR r.prep_time_minutes <= ?2)
            ORDER BY i.recipe_id, i.position
            "#,
        )
        .bind(&meal_type)
        .bind(max_prep)
        .fetch_all(&self.pool)
        .await?;

        let instructions: Vec<RecipeInstructionRow> = sqlx::query_as(
            r#"
            SELECT s.recipe_id, s.step_number, s.instruction_text, s.timer_minutes
            FROM recipe_instructions s
            JOIN recipes r ON r.id = s.recipe_id
            WHERE (?1 IS NULL OR r.meal_type = ?1)
              AND (?2 IS NULL OR r.prep_time_minutes <= ?2)
            ORDER BY s.recipe_id, s.step_number
            "#,
        )
        .bind(&meal_type)
        .bind(max_prep)
        .fetch_all(&self.pool)
        .await?;

        let tags: Vec<RecipeTagRow> = sqlx::query_as(
            r#"
            SELECT rt.recipe_id, t.id AS tag_id, t.name, t.category, t.base_weight,
                   rt.relevance_weight, rt.confidence, t.popularity_score
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            JOIN recipes r ON r.id = rt.recipe_id
            WHERE (?1 IS NULL OR r.meal_type = ?1)
              AND (?2 IS NULL OR r.prep_time_minutes <= ?2)
            "#,
        )
        .bind(&meal_type)
        .bind(max_prep)
        .fetch_all(&self.pool)
        .await?;

        Ok((recipes, ingredients, instructions, tags))
    }
}

fn store_error(error: sqlx::Error) -> SourceError {
    SourceError::Store(error.to_string())
}

#[async_trait]
impl RecipeCatalog for SqliteStore {
    async fn load_catalog(&self, query: &CatalogQuery) -> Result<Vec<Recipe>, SourceError> {
        let (recipes, ingredients, instructions, tags) = self
            .fetch_catalog_rows(query)
            .await
            .map_err(store_error)?;

        let catalog = recipes
            .iter()
            .map(|row| map_recipe(row, &ingredients, &instructions, &tags))
            .filter(|recipe| {
                query
                    .required_tag_names
                    .iter()
                    .all(|name| recipe.has_tag_named(name))
            })
            .collect();

        Ok(catalog)
    }

    async fn load_recipe(&self, recipe_id: &str) -> Result<Option<Recipe>, SourceError> {
        let row: Option<RecipeRow> = sqlx::query_as(
            r#"
            SELECT id, title, meal_type, prep_time_minutes, calories, protein_g, carbs_g,
                   fat_g, points, nutrition_score
            FROM recipes
            WHERE id = ?1
            "#,
        )
        .bind(recipe_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let ingredients: Vec<RecipeIngredientRow> = sqlx::query_as(
            r#"
            SELECT recipe_id, position, name, category, amount, unit
            FROM recipe_ingredients
            WHERE recipe_id = ?1
            ORDER BY position
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let instructions: Vec<RecipeInstructionRow> = sqlx::query_as(
            r#"
            SELECT recipe_id, step_number, instruction_text, timer_minutes
            FROM recipe_instructions
            WHERE recipe_id = ?1
            ORDER BY step_number
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let tags: Vec<RecipeTagRow> = sqlx::query_as(
            r#"
            SELECT rt.recipe_id, t.id AS tag_id, t.name, t.category, t.base_weight,
                   rt.relevance_weight, rt.confidence, t.popularity_score
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = ?1
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(Some(map_recipe(&row, &ingredients, &instructions, &tags)))
    }
}

#[async_trait]
impl ProfileSource for SqliteStore {
    async fn load_profile(&self, user_id: &str) -> Result<Option<UserProfile>, SourceError> {
        let row: Option<UserProfileRow> = sqlx::query_as(
            r#"
            SELECT user_id, level, dietary_preferences
            FROM user_profiles
            WHERE user_id = ?1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.as_ref().map(map_profile))
    }
}

#[async_trait]
impl SettingsSource for SqliteStore {
    async fn load_settings(&self, user_id: &str) -> Result<Option<UserSettings>, SourceError> {
        let row: Option<UserSettingsRow> = sqlx::query_as(
            r#"
            SELECT user_id, dietary_restrictions, daily_calorie_target, activity_level
            FROM user_settings
            WHERE user_id = ?1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.as_ref().map(map_settings))
    }
}

#[async_trait]
impl CalorieLogSource for SqliteStore {
    async fn today(&self, user_id: &str) -> Result<Option<CalorieLog>, SourceError> {
        let today = chrono::Local::now().date_naive().to_string();

        let row: Option<CalorieLogRow> = sqlx::query_as(
            r#"
            SELECT consumed, goal
            FROM calorie_logs
            WHERE user_id = ?1 AND log_date = ?2
            "#,
        )
        .bind(user_id)
        .bind(&today)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.as_ref().map(map_calorie_log))
    }
}

#[async_trait]
impl TagPreferenceStore for SqliteStore {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<TagPreference>, SourceError> {
        let rows: Vec<TagPreferenceRow> = sqlx::query_as(
            r#"
            SELECT user_id, tag_id, score, positive_count, negative_count, interaction_count
            FROM user_tag_preferences
            WHERE user_id = ?1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.iter().map(map_preference).collect())
    }

    async fn upsert(&self, preference: &TagPreference) -> Result<(), SourceError> {
        sqlx::query(
            r#"
            INSERT INTO user_tag_preferences
                (id, user_id, tag_id, score, positive_count, negative_count, interaction_count)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (user_id, tag_id) DO UPDATE SET
                score = excluded.score,
                positive_count = excluded.positive_count,
                negative_count = excluded.negative_count,
                interaction_count = excluded.interaction_count
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&preference.user_id)
        .bind(&preference.tag_id)
        .bind(preference.score)
        .bind(preference.positive_count as i64)
        .bind(preference.negative_count as i64)
        .bind(preference.interaction_count as i64)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }
}

#[async_trait]
impl CompletedRecipeSource for SqliteStore {
    async fn completed_ids(&self, user_id: &str) -> Result<HashSet<String>, SourceError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT recipe_id
            FROM completed_recipes
            WHERE user_id = ?1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
