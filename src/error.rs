//! Error types for graph construction, walking and scoring.

use thiserror::Error;

/// Errors raised by the core graph operations.
///
/// All of them are fatal to the operation that produced them. A rejected
/// candidate recipe is not an error; it is an ordinary outcome of generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Invalid parameters or inputs, detected before any work is done.
    #[error("configuration error: {0}")]
    Config(String),

    /// An ingredient that is not part of the active graph was referenced.
    #[error("unknown ingredient '{ingredient}'")]
    UnknownIngredient { ingredient: String },

    /// A pair of ingredients has no edge in the active graph.
    #[error("no edge between '{a}' and '{b}'")]
    MissingEdge { a: String, b: String },

    /// The recipe has no pair of distinct ingredients, so it cannot be scored.
    #[error("degenerate recipe: {0} entries but no two distinct ingredients")]
    DegenerateRecipe(usize),
}

impl GraphError {
    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an unknown-ingredient lookup error.
    pub fn unknown(ingredient: impl Into<String>) -> Self {
        Self::UnknownIngredient {
            ingredient: ingredient.into(),
        }
    }

    /// Create a missing-edge lookup error.
    pub fn missing_edge(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::MissingEdge {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Whether this is a lookup failure (caller passed a graph/universe mismatch).
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Self::UnknownIngredient { .. } | Self::MissingEdge { .. }
        )
    }

    /// Get a short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::UnknownIngredient { .. } => "unknown_ingredient",
            Self::MissingEdge { .. } => "missing_edge",
            Self::DegenerateRecipe(_) => "degenerate_recipe",
        }
    }
}
