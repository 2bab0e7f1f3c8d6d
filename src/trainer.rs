//! Learns pairwise ingredient synergy from rated recipes.
//!
//! Training is path dependent: the smoothing rule does not commute across
//! recipes, so the order of the training set changes the final weights.
//! Shuffling before each pass spreads that bias out; extra passes amplify
//! whatever rating pattern dominates. There is no convergence criterion.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::TrainingConfig;
use crate::error::GraphError;
use crate::graph::{Graph, Ingredient, WeightBounds};

/// Highest rating on the source scale.
pub const RATING_SCALE: f64 = 10.0;

/// A historical recipe with its 0–10 rating.
///
/// Ingredients may repeat; each occurrence is one part. Unrated recipes
/// (`rating: null`) still contribute to the ingredient universe but are not
/// learned from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedRecipe {
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl RatedRecipe {
    pub fn new<I, S>(ingredients: I, rating: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Ingredient>,
    {
        Self {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            rating: Some(rating),
        }
    }

    /// Rating mapped onto `[0, 1]`.
    pub fn normalized_rating(&self) -> Option<f64> {
        self.rating.map(|r| r / RATING_SCALE)
    }
}

/// Distinct ingredients across all recipes, in order of first appearance.
pub fn ingredient_universe(recipes: &[RatedRecipe]) -> Vec<Ingredient> {
    let mut seen = HashSet::new();
    let mut universe = Vec::new();
    for recipe in recipes {
        for ingredient in &recipe.ingredients {
            if seen.insert(ingredient.as_str()) {
                universe.push(ingredient.clone());
            }
        }
    }
    universe
}

/// Apply one rating to every pair of distinct ingredients in a recipe.
///
/// Without `allow_duplicates` the recipe is first reduced to its distinct
/// ingredients, so each edge moves at most once. Returns the number of
/// edge updates performed.
pub fn update_recipe<S: AsRef<str>>(
    graph: &mut Graph,
    ingredients: &[S],
    rating: f64,
    decay: f64,
    allow_duplicates: bool,
) -> Result<usize, GraphError> {
    let mut seen = HashSet::new();
    let recipe: Vec<&str> = ingredients
        .iter()
        .map(AsRef::as_ref)
        .filter(|ingredient| allow_duplicates || seen.insert(*ingredient))
        .collect();

    let mut updated = 0;
    for (i, a) in recipe.iter().enumerate() {
        for b in &recipe[i + 1..] {
            if a == b {
                continue;
            }
            graph.update_edge(a, b, rating, decay)?;
            updated += 1;
        }
    }
    Ok(updated)
}

#[derive(Debug, Clone)]
pub struct Trainer {
    cfg: TrainingConfig,
}

impl Trainer {
    pub fn new(cfg: TrainingConfig) -> Result<Self, GraphError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.cfg
    }

    /// Build the complete graph over the recipes' universe and learn weights.
    ///
    /// The returned graph's [`Graph::ingredients`] is the ingredient universe.
    pub fn train<R: Rng + ?Sized>(
        &self,
        recipes: &[RatedRecipe],
        rng: &mut R,
    ) -> Result<Graph, GraphError> {
        let mut rated: Vec<(&RatedRecipe, f64)> = Vec::with_capacity(recipes.len());
        for (idx, recipe) in recipes.iter().enumerate() {
            match recipe.normalized_rating() {
                Some(r) if r.is_finite() && (0.0..=1.0).contains(&r) => rated.push((recipe, r)),
                Some(r) => {
                    return Err(GraphError::config(format!(
                        "recipe {idx} has rating {} outside 0..={RATING_SCALE}",
                        r * RATING_SCALE
                    )))
                }
                None => warn!(recipe = idx, "Skipping unrated recipe"),
            }
        }

        let universe = ingredient_universe(recipes);
        let bounds = WeightBounds::new(self.cfg.min_weight, self.cfg.max_weight)?;
        let mut graph = Graph::build(universe, self.cfg.default_weight, bounds)?;

        for pass in 0..self.cfg.iterations {
            if self.cfg.shuffle {
                rated.shuffle(rng);
            }
            let mut updates = 0;
            for (recipe, rating) in &rated {
                updates += update_recipe(
                    &mut graph,
                    &recipe.ingredients,
                    *rating,
                    self.cfg.decay,
                    self.cfg.allow_duplicate_edges,
                )?;
            }
            debug!(pass, updates, "Training pass complete");
        }

        info!(
            ingredients = graph.len(),
            edges = graph.edge_count(),
            recipes = rated.len(),
            iterations = self.cfg.iterations,
            "Training finished"
        );
        Ok(graph)
    }
}
