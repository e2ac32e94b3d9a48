//! Per-user tag affinity
//!
//! Every interaction with a recommended recipe feeds back into the user's
//! per-tag preference rows. The score is a simple running difference of
//! positive and negative interaction counts, clamped into a fixed band, so
//! a long like-streak cannot push a tag beyond reach of later skips.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Interaction kinds reported by the recommendation surfaces.
///
/// `View` is recorded (it still counts toward `interaction_count`) but moves
/// neither counter; merely opening a recipe is not an endorsement or a
/// rejection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InteractionType {
    View,
    Like,
    Complete,
    Skip,
}

impl InteractionType {
    pub fn is_positive(&self) -> bool {
        matches!(self, InteractionType::Like | InteractionType::Complete)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, InteractionType::Skip)
    }
}

/// Bounds of the preference score band
pub const MIN_PREFERENCE_SCORE: i32 = -10;
pub const MAX_PREFERENCE_SCORE: i32 = 10;

/// Affinity of one user for one tag, accumulated from interaction history.
///
/// Rows are created on first interaction and only ever accumulated, never
/// reset. The score is recomputed from the cumulative counts on every update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagPreference {
    pub user_id: String,
    pub tag_id: String,
    /// Clamped running difference of positive and negative interactions
    pub score: i32,
    pub positive_count: u32,
    pub negative_count: u32,
    pub interaction_count: u32,
}

impl TagPreference {
    /// Fresh row for a first interaction
    pub fn new(user_id: impl Into<String>, tag_id: impl Into<String>) -> Self {
        TagPreference {
            user_id: user_id.into(),
            tag_id: tag_id.into(),
            score: 0,
            positive_count: 0,
            negative_count: 0,
            interaction_count: 0,
        }
    }

    /// Fold one interaction into the row and recompute the score.
    ///
    /// `score = clamp(positive_count - negative_count, -10, 10)`: a running
    /// difference over cumulative counts, not a decaying average.
    pub fn apply(&mut self, interaction: InteractionType) {
        if interaction.is_positive() {
            self.positive_count = self.positive_count.saturating_add(1);
        } else if interaction.is_negative() {
            self.negative_count = self.negative_count.saturating_add(1);
        }
        self.interaction_count = self.interaction_count.saturating_add(1);

        let difference = self.positive_count as i32 - self.negative_count as i32;
        self.score = difference.clamp(MIN_PREFERENCE_SCORE, MAX_PREFERENCE_SCORE);
    }
}
