//! Biased random walk that assembles one candidate recipe.
//!
//! The walk keeps an *anchor* ingredient. Each step scores every eligible
//! ingredient `c` as `uniform(0, 1) * randomness * weight(anchor, c)` and
//! appends the highest scorer (first maximum wins). Then:
//!
//! - while the recipe is shorter than `min_len`, the anchor stays where it
//!   was and the walk steps again;
//! - at `max_len` the walk stops ([`StopReason::LengthCapped`]);
//! - otherwise, if the recipe passes [`satisfies_quality`], the walk stops
//!   ([`StopReason::QualitySatisfied`]); if not, the anchor moves to the
//!   ingredient just appended.
//!
//! Until `min_len` is reached every ingredient is therefore chosen relative
//! to the starting ingredient rather than the latest one. Existing trained
//! menus depend on this shape, so it is kept as is.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::config::WalkConfig;
use crate::error::GraphError;
use crate::fitness::{average_weight, satisfies_quality};
use crate::graph::{Graph, Ingredient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The recipe reached `max_len` occurrences.
    LengthCapped,
    /// The stop test passed before `max_len`.
    QualitySatisfied,
}

/// A finished walk: the ordered ingredient occurrences and why it stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    pub recipe: Vec<Ingredient>,
    pub stop: StopReason,
}

impl Walk {
    pub fn unique_ingredients(&self) -> usize {
        self.recipe.iter().collect::<HashSet<_>>().len()
    }
}

pub struct RecipeWalker<'a> {
    graph: &'a Graph,
    universe: &'a [Ingredient],
    cfg: &'a WalkConfig,
    reserved: HashSet<&'a str>,
}

impl<'a> RecipeWalker<'a> {
    /// `universe` is the set of ingredients the walk may draw from; every one
    /// of them must be part of `graph`.
    pub fn new(
        graph: &'a Graph,
        universe: &'a [Ingredient],
        cfg: &'a WalkConfig,
    ) -> Result<Self, GraphError> {
        cfg.validate()?;
        if universe.len() < 2 {
            return Err(GraphError::config(format!(
                "walk universe needs at least 2 ingredients (got {})",
                universe.len()
            )));
        }
        Ok(Self {
            graph,
            universe,
            cfg,
            reserved: HashSet::new(),
        })
    }

    /// Never append these ingredients (a starting ingredient may still be one).
    pub fn with_reserved(mut self, reserved: &'a [Ingredient]) -> Self {
        self.reserved = reserved.iter().map(String::as_str).collect();
        self
    }

    /// Run one walk. A missing `start` is drawn uniformly from the universe.
    pub fn walk<R: Rng + ?Sized>(
        &self,
        start: Option<&str>,
        rng: &mut R,
    ) -> Result<Walk, GraphError> {
        let start = match start {
            Some(start) => start.to_string(),
            None => self
                .universe
                .choose(rng)
                .cloned()
                .ok_or_else(|| GraphError::config("empty walk universe"))?,
        };
        if !self.graph.contains(&start) {
            return Err(GraphError::unknown(start));
        }

        let mut recipe = vec![start.clone()];
        let mut anchor = start;

        loop {
            let next = self.select_next(&anchor, rng)?;
            recipe.push(next.to_string());

            if recipe.len() < self.cfg.min_len {
                continue;
            }
            if recipe.len() >= self.cfg.max_len {
                return Ok(Walk {
                    recipe,
                    stop: StopReason::LengthCapped,
                });
            }

            let avg = average_weight(self.graph, &recipe)?;
            let unique = recipe.iter().collect::<HashSet<_>>().len();
            if satisfies_quality(
                avg,
                unique,
                self.cfg.quality_scale,
                self.cfg.diversity,
                self.cfg.max_len,
            ) {
                return Ok(Walk {
                    recipe,
                    stop: StopReason::QualitySatisfied,
                });
            }
            anchor = next.to_string();
        }
    }

    /// Randomized weighted argmax over the eligible followers of `anchor`.
    fn select_next<R: Rng + ?Sized>(
        &self,
        anchor: &str,
        rng: &mut R,
    ) -> Result<&'a str, GraphError> {
        let mut best: Option<(&'a str, f64)> = None;

        for candidate in self.universe {
            let candidate = candidate.as_str();
            if candidate == anchor || self.reserved.contains(candidate) {
                continue;
            }
            let weight = self.graph.get(anchor, candidate)?;
            let score = rng.gen::<f64>() * self.cfg.randomness * weight;
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((candidate, score)),
            }
        }

        best.map(|(candidate, _)| candidate).ok_or_else(|| {
            GraphError::config(format!("no eligible ingredient can follow '{anchor}'"))
        })
    }
}
