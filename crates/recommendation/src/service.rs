//! Recommendation service
//!
//! Entry point wiring the pipeline together: build context, load candidates,
//! score, filter, rank. One instance is shared across requests; every request
//! works on its own freshly fetched snapshot, so no locking is involved.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use mealquest_recipe::Recipe;
use mealquest_user::{InteractionType, TagPreference};

use crate::config::EngineConfig;
use crate::context::{build_context, RecommendationRequest, ScoringContext};
use crate::error::RecommendationError;
use crate::filter::apply_hard_filters;
use crate::ranker::rank_recipes;
use crate::scorer::{score_recipe, ScoredRecipe};
use crate::sources::{
    CalorieLogSource, CatalogQuery, CompletedRecipeSource, ProfileSource, RecipeCatalog,
    SettingsSource, TagPreferenceStore,
};
use crate::strategy::RankingStrategy;

pub struct RecommendationService {
    catalog: Arc<dyn RecipeCatalog>,
    profiles: Arc<dyn ProfileSource>,
    settings: Arc<dyn SettingsSource>,
    calorie_log: Arc<dyn CalorieLogSource>,
    preferences: Arc<dyn TagPreferenceStore>,
    completed: Arc<dyn CompletedRecipeSource>,
    config: EngineConfig,
}

impl RecommendationService {
    pub fn new(
        catalog: Arc<dyn RecipeCatalog>,
        profiles: Arc<dyn ProfileSource>,
        settings: Arc<dyn SettingsSource>,
        calorie_log: Arc<dyn CalorieLogSource>,
        preferences: Arc<dyn TagPreferenceStore>,
        completed: Arc<dyn CompletedRecipeSource>,
    ) -> Self {
        Self::with_config(
            catalog,
            profiles,
            settings,
            calorie_log,
            preferences,
            completed,
            EngineConfig::default(),
        )
    }

    pub fn with_config(
        catalog: Arc<dyn RecipeCatalog>,
        profiles: Arc<dyn ProfileSource>,
        settings: Arc<dyn SettingsSource>,
        calorie_log: Arc<dyn CalorieLogSource>,
        preferences: Arc<dyn TagPreferenceStore>,
        completed: Arc<dyn CompletedRecipeSource>,
        config: EngineConfig,
    ) -> Self {
        RecommendationService {
            catalog,
            profiles,
            settings,
            calorie_log,
            preferences,
            completed,
            config,
        }
    }

    /// Personalized, filtered, ranked recommendations for one user.
    ///
    /// Degrades rather than fails: missing user data falls back to defaults
    /// during context assembly, and a catalog fetch failure or timeout yields
    /// an empty list. Callers may simply re-issue the request.
    #[tracing::instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn get_personalized_recommendations(
        &self,
        request: RecommendationRequest,
        limit: Option<usize>,
    ) -> Vec<ScoredRecipe> {
        let limit = limit.unwrap_or(self.config.default_limit);
        let ctx = self.build_context(request).await;

        // Restrictions are pushed down into the catalog query; the hard
        // filter below still runs over whatever comes back.
        let query = CatalogQuery {
            required_tag_names: ctx
                .settings
                .dietary_restrictions
                .iter()
                .map(|r| r.tag_name().to_string())
                .collect(),
            ..CatalogQuery::default()
        };

        let Some(candidates) = self.load_candidates(&query).await else {
            return Vec::new();
        };

        let scored: Vec<ScoredRecipe> = candidates
            .into_iter()
            .map(|recipe| score_recipe(recipe, &ctx))
            .collect();

        let filtered = apply_hard_filters(
            scored,
            &ctx.settings.dietary_restrictions,
            &ctx.exclude_tags,
        );

        let ranked = rank_recipes(filtered, limit);
        tracing::debug!(results = ranked.len(), "recommendation request served");
        ranked
    }

    /// Order the catalog with an arbitrary ranking strategy.
    ///
    /// This is the list-screen path: no hard filtering, no breakdowns, just a
    /// deterministic ordering (score descending, recipe id ascending on ties).
    #[tracing::instrument(skip(self, request, strategy), fields(user_id = %request.user_id))]
    pub async fn rank_with(
        &self,
        request: RecommendationRequest,
        strategy: &dyn RankingStrategy,
        limit: Option<usize>,
    ) -> Vec<Recipe> {
        let limit = limit.unwrap_or(self.config.default_limit);
        let ctx = self.build_context(request).await;

        let Some(candidates) = self.load_candidates(&CatalogQuery::default()).await else {
            return Vec::new();
        };

        let mut scored: Vec<(f64, Recipe)> = candidates
            .into_iter()
            .map(|recipe| (strategy.score(&recipe, &ctx), recipe))
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.id.cmp(&b.1.id))
        });
        scored.truncate(limit);
        scored.into_iter().map(|(_, recipe)| recipe).collect()
    }

    /// Fold one interaction into the user's per-tag preferences.
    ///
    /// Reads the user's current preference rows once, then applies the update
    /// rule to each of the recipe's tags and upserts the results. Concurrent
    /// updates to the same row are last-writer-wins.
    #[tracing::instrument(skip(self))]
    pub async fn track_interaction(
        &self,
        user_id: &str,
        recipe_id: &str,
        interaction: InteractionType,
    ) -> Result<(), RecommendationError> {
        let recipe = self
            .catalog
            .load_recipe(recipe_id)
            .await?
            .ok_or_else(|| RecommendationError::RecipeNotFound(recipe_id.to_string()))?;

        let existing = self.preferences.list_for_user(user_id).await?;

        for tag in &recipe.tags {
            let mut preference = existing
                .iter()
                .find(|p| p.tag_id == tag.tag_id)
                .cloned()
                .unwrap_or_else(|| TagPreference::new(user_id, tag.tag_id.clone()));
            preference.apply(interaction);
            self.preferences.upsert(&preference).await?;
        }

        Ok(())
    }

    async fn build_context(&self, request: RecommendationRequest) -> ScoringContext {
        build_context(
            &*self.profiles,
            &*self.settings,
            &*self.calorie_log,
            &*self.preferences,
            &*self.completed,
            request,
            &self.config,
        )
        .await
    }

    /// Catalog fetch with the request-level timeout. `None` means the request
    /// ends early with an empty result; no partial scoring without a catalog.
    async fn load_candidates(&self, query: &CatalogQuery) -> Option<Vec<Recipe>> {
        let budget = Duration::from_millis(self.config.catalog_timeout_ms);
        match timeout(budget, self.catalog.load_catalog(query)).await {
            Ok(Ok(recipes)) => Some(recipes),
            Ok(Err(error)) => {
                tracing::error!(%error, "catalog fetch failed, returning no recommendations");
                None
            }
            Err(_) => {
                tracing::error!(
                    timeout_ms = self.config.catalog_timeout_ms,
                    "catalog fetch timed out, returning no recommendations"
                );
                None
            }
        }
    }
}
