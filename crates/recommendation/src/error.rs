use thiserror::Error;

use crate::sources::SourceError;

#[derive(Error, Debug)]
pub enum RecommendationError {
    #[error("recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("collaborator source error: {0}")]
    Source(#[from] SourceError),
}
