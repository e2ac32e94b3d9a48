//! User tag suggestions
//!
//! Suggested tags enter the catalog as `Pending` / `UserSuggested` and only
//! participate in scoring once approved. Validation failures here are
//! user-facing form feedback, not errors: callers always get a structured
//! outcome back.

use serde::Serialize;
use validator::Validate;

use crate::tag::{Tag, TagCategory};

#[derive(Debug, Validate)]
pub struct TagSuggestionInput {
    #[validate(length(min = 2, max = 40, message = "tag name must be between 2 and 40 characters"))]
    pub name: String,
    pub category: TagCategory,
}

/// User-facing result of a tag suggestion attempt
#[derive(Debug, Clone, Serialize)]
pub struct TagSuggestionOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl TagSuggestionOutcome {
    fn rejected(message: impl Into<String>) -> Self {
        TagSuggestionOutcome {
            success: false,
            message: Some(message.into()),
        }
    }

    fn accepted() -> Self {
        TagSuggestionOutcome {
            success: true,
            message: None,
        }
    }
}

/// Validate a tag suggestion against form rules and the existing catalog.
///
/// Duplicate check is case-insensitive across all tags regardless of status,
/// so a pending suggestion also blocks re-suggesting the same name.
pub fn validate_suggestion(input: &TagSuggestionInput, existing: &[Tag]) -> TagSuggestionOutcome {
    if let Err(errors) = input.validate() {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| "invalid tag suggestion".to_string());
        return TagSuggestionOutcome::rejected(message);
    }

    let duplicate = existing
        .iter()
        .any(|tag| tag.name.eq_ignore_ascii_case(input.name.trim()));
    if duplicate {
        return TagSuggestionOutcome::rejected(format!(
            "a tag named '{}' already exists",
            input.name.trim()
        ));
    }

    TagSuggestionOutcome::accepted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{TagOrigin, TagStatus};

    fn make_tag(id: &str, name: &str) -> Tag {
        Tag {
            id: id.to_string(),
            name: name.to_string(),
            category: TagCategory::TasteProfile,
            base_weight: 1.0,
            popularity_score: 0.0,
            origin: TagOrigin::System,
            status: TagStatus::Approved,
        }
    }

    #[test]
    fn test_name_too_short_rejected() {
        let input = TagSuggestionInput {
            name: "a".to_string(),
            category: TagCategory::TasteProfile,
        };
        let outcome = validate_suggestion(&input, &[]);
        assert!(!outcome.success);
        assert!(outcome.message.unwrap().contains("between 2 and 40"));
    }

    #[test]
    fn test_name_too_long_rejected() {
        let input = TagSuggestionInput {
            name: "x".repeat(41),
            category: TagCategory::TasteProfile,
        };
        let outcome = validate_suggestion(&input, &[]);
        assert!(!outcome.success);
    }

    #[test]
    fn test_duplicate_name_rejected_case_insensitive() {
        let existing = vec![make_tag("t1", "Smoky")];
        let input = TagSuggestionInput {
            name: "smoky".to_string(),
            category: TagCategory::TasteProfile,
        };
        let outcome = validate_suggestion(&input, &existing);
        assert!(!outcome.success);
        assert!(outcome.message.unwrap().contains("already exists"));
    }

    #[test]
    fn test_valid_suggestion_accepted() {
        let existing = vec![make_tag("t1", "smoky")];
        let input = TagSuggestionInput {
            name: "umami".to_string(),
            category: TagCategory::TasteProfile,
        };
        let outcome = validate_suggestion(&input, &existing);
        assert!(outcome.success);
        assert!(outcome.message.is_none());
    }
}
