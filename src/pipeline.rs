//! Train → limit → generate, end to end.
//!
//! 1. **Train**: learn edge weights from the rated training set
//! 2. **Limit**: restrict the universe to the bar stock or an automatic cluster
//! 3. **Generate**: walk and accept recipes with the decaying sanity band
//!
//! Usage:
//! ```bash
//! mixer generate --training data/training_set_db.json --stock data/stock.json
//! ```

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::cluster::IngredientLimit;
use crate::config::Config;
use crate::error::GraphError;
use crate::generator::{GeneratedRecipe, GenerationStrategy, RecipeGenerator};
use crate::graph::{Graph, Ingredient};
use crate::trainer::{RatedRecipe, Trainer};

/// What a mixing run produced.
#[derive(Debug, Clone, Serialize)]
pub struct MixSession {
    /// Ingredients generation was allowed to draw from.
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<GeneratedRecipe>,
    #[serde(skip)]
    pub graph: Graph,
}

/// Run the whole pipeline on rated recipes.
pub fn mix<R: Rng + ?Sized>(
    recipes: &[RatedRecipe],
    limit: &IngredientLimit,
    strategy: &GenerationStrategy,
    cfg: &Config,
    rng: &mut R,
) -> Result<MixSession, GraphError> {
    cfg.validate()?;

    let full = Trainer::new(cfg.training.clone())?.train(recipes, rng)?;
    let graph = limit.apply(&full, &cfg.cluster)?;
    let ingredients = graph.ingredients().to_vec();
    info!(
        trained = full.len(),
        allowed = ingredients.len(),
        "Ingredient universe ready"
    );

    let recipes = RecipeGenerator::new(&graph, &ingredients, cfg)?.generate(strategy, rng)?;

    Ok(MixSession {
        ingredients,
        recipes,
        graph,
    })
}
