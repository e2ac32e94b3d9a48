//! Tag domain model
//!
//! Tags classify recipes along a fixed set of axes (dietary, cuisine, cooking
//! method, ...). A tag's intrinsic importance lives on the tag itself
//! (`base_weight`); how central the tag is to a particular recipe lives on the
//! recipe-tag association (`relevance_weight`). Scoring always combines the two.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Classification axis a tag belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TagCategory {
    Dietary,
    Cuisine,
    CookingMethod,
    MealTime,
    Allergen,
    IngredientType,
    TasteProfile,
    HealthBenefit,
}

/// Who created the tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TagOrigin {
    System,
    UserSuggested,
}

/// Lifecycle state of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TagStatus {
    Pending,
    Approved,
}

/// A classification label with global weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub category: TagCategory,
    /// Intrinsic importance of the tag across the whole catalog
    pub base_weight: f64,
    /// Usage-derived global popularity
    pub popularity_score: f64,
    pub origin: TagOrigin,
    pub status: TagStatus,
}

/// Tag as attached to one recipe, carrying the association weights from the
/// recipe-tag join alongside the tag's own global fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeTag {
    pub tag_id: String,
    pub name: String,
    pub category: TagCategory,
    pub base_weight: f64,
    /// How central the tag is to this recipe
    pub relevance_weight: f64,
    pub confidence: f64,
    pub popularity_score: f64,
}

impl RecipeTag {
    /// Combined contribution weight of this association
    pub fn weight(&self) -> f64 {
        self.base_weight * self.relevance_weight
    }

    pub fn name_matches(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other)
    }
}

/// How two tags relate to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TagRelationKind {
    Similar,
    Opposite,
    Parent,
    Child,
    Implies,
    Excludes,
}

/// Directed relation between two tags with a strength value.
///
/// Relations drive tag discovery surfaces; the scorer never reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRelation {
    pub tag_id: String,
    pub related_tag_id: String,
    pub kind: TagRelationKind,
    pub strength: f64,
}

/// Tags related to `tag_id`, strongest first
pub fn related_tags<'a>(tag_id: &str, relations: &'a [TagRelation]) -> Vec<&'a TagRelation> {
    let mut related: Vec<&TagRelation> =
        relations.iter().filter(|r| r.tag_id == tag_id).collect();
    related.sort_by(|a, b| {
        b.strength
            .partial_cmp(&a.strength)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    related
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_relation(from: &str, to: &str, strength: f64) -> TagRelation {
        TagRelation {
            tag_id: from.to_string(),
            related_tag_id: to.to_string(),
            kind: TagRelationKind::Similar,
            strength,
        }
    }

    #[test]
    fn test_association_weight_combines_base_and_relevance() {
        let tag = RecipeTag {
            tag_id: "t1".to_string(),
            name: "vegan".to_string(),
            category: TagCategory::Dietary,
            base_weight: 2.0,
            relevance_weight: 0.5,
            confidence: 1.0,
            popularity_score: 40.0,
        };
        assert_eq!(tag.weight(), 1.0);
    }

    #[test]
    fn test_name_matches_is_case_insensitive() {
        let tag = RecipeTag {
            tag_id: "t1".to_string(),
            name: "Gluten-Free".to_string(),
            category: TagCategory::Allergen,
            base_weight: 1.0,
            relevance_weight: 1.0,
            confidence: 1.0,
            popularity_score: 0.0,
        };
        assert!(tag.name_matches("gluten-free"));
        assert!(!tag.name_matches("nut-free"));
    }

    #[test]
    fn test_related_tags_sorted_by_strength() {
        let relations = vec![
            make_relation("a", "b", 0.2),
            make_relation("a", "c", 0.9),
            make_relation("x", "y", 1.0),
            make_relation("a", "d", 0.5),
        ];

        let related = related_tags("a", &relations);
        let ids: Vec<&str> = related.iter().map(|r| r.related_tag_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d", "b"]);
    }
}
