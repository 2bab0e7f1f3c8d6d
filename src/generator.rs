//! Accept/reject loop that turns walks into a list of recipes.
//!
//! Each candidate's average weight must fall inside an acceptance band that
//! starts narrow and shifts outward as the *sanity* counter decays:
//!
//! ```text
//! m * s < avg < M + (1 - M) * (1 - s)      where s = sanity / initial
//! ```
//!
//! Every rejection costs one unit of sanity. Once sanity reaches zero the band
//! covers everything, so generation always terminates.

use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::GraphError;
use crate::fitness::average_weight;
use crate::graph::{Graph, Ingredient};
use crate::walker::{RecipeWalker, StopReason};

// ---------------------------------------------------------------------
//  Sanity and acceptance
// ---------------------------------------------------------------------

/// Decaying strictness counter for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sanity {
    initial: u32,
    remaining: u32,
}

impl Sanity {
    pub fn new(initial: u32) -> Self {
        Self {
            initial,
            remaining: initial,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn reset(&mut self) {
        self.remaining = self.initial;
    }

    /// One rejection. Saturates at zero.
    pub fn decay(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Remaining share of the initial value, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.initial == 0 {
            return 0.0;
        }
        self.remaining as f64 / self.initial as f64
    }

    /// Current acceptance band for the configured `[min_band, max_band]`.
    pub fn band(&self, min_band: f64, max_band: f64) -> AcceptanceBand {
        if self.is_exhausted() {
            return AcceptanceBand::everything();
        }
        let s = self.fraction();
        AcceptanceBand {
            lower: min_band * s,
            upper: max_band + (1.0 - max_band) * (1.0 - s),
            inclusive: false,
        }
    }
}

/// Range of average weights a candidate must land in to be accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptanceBand {
    pub lower: f64,
    pub upper: f64,
    inclusive: bool,
}

impl AcceptanceBand {
    /// The collapsed band at zero sanity: `[0, 1]`, bounds included.
    pub fn everything() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
            inclusive: true,
        }
    }

    pub fn accepts(&self, avg_weight: f64) -> bool {
        if self.inclusive {
            self.lower <= avg_weight && avg_weight <= self.upper
        } else {
            self.lower < avg_weight && avg_weight < self.upper
        }
    }
}

// ---------------------------------------------------------------------
//  Output
// ---------------------------------------------------------------------

/// An accepted recipe and its quality score (average edge weight).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedRecipe {
    pub quality: f64,
    pub ingredients: Vec<Ingredient>,
    pub stop: StopReason,
    /// Sanity left when the recipe was accepted.
    pub sanity: u32,
}

impl GeneratedRecipe {
    /// Ingredient multiset as `(ingredient, parts)`, in first-appearance order.
    pub fn counts(&self) -> Vec<(Ingredient, usize)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(Ingredient, usize)> = Vec::new();
        for ingredient in &self.ingredients {
            match index.get(ingredient.as_str()) {
                Some(&pos) => counts[pos].1 += 1,
                None => {
                    index.insert(ingredient.as_str(), counts.len());
                    counts.push((ingredient.clone(), 1));
                }
            }
        }
        counts
    }
}

// ---------------------------------------------------------------------
//  Generator
// ---------------------------------------------------------------------

/// How many recipes to make and where they start.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationStrategy {
    /// `target` recipes, each starting at `start` or a random ingredient.
    Count {
        target: usize,
        start: Option<Ingredient>,
    },
    /// One recipe per menu entry, started from that entry. With `unique`,
    /// no menu entry may appear in another entry's recipe.
    Menu {
        entries: Vec<Ingredient>,
        unique: bool,
    },
}

pub struct RecipeGenerator<'a> {
    graph: &'a Graph,
    universe: &'a [Ingredient],
    cfg: &'a Config,
}

impl<'a> RecipeGenerator<'a> {
    pub fn new(
        graph: &'a Graph,
        universe: &'a [Ingredient],
        cfg: &'a Config,
    ) -> Result<Self, GraphError> {
        cfg.walk.validate()?;
        cfg.generation.validate()?;
        Ok(Self {
            graph,
            universe,
            cfg,
        })
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        strategy: &GenerationStrategy,
        rng: &mut R,
    ) -> Result<Vec<GeneratedRecipe>, GraphError> {
        let mut sanity = Sanity::new(self.cfg.generation.sanity);
        let mut accepted = Vec::new();

        match strategy {
            GenerationStrategy::Count { target, start } => {
                let walker = RecipeWalker::new(self.graph, self.universe, &self.cfg.walk)?;
                self.fill(&walker, start.as_deref(), *target, &mut sanity, rng, &mut accepted)?;
            }
            GenerationStrategy::Menu { entries, unique } => {
                for entry in entries {
                    if !self.graph.contains(entry) {
                        return Err(GraphError::unknown(entry.as_str()));
                    }
                }
                let mut walker = RecipeWalker::new(self.graph, self.universe, &self.cfg.walk)?;
                if *unique {
                    walker = walker.with_reserved(entries);
                }
                for entry in entries {
                    sanity.reset();
                    self.fill(&walker, Some(entry.as_str()), 1, &mut sanity, rng, &mut accepted)?;
                }
            }
        }

        info!(
            recipes = accepted.len(),
            sanity = sanity.remaining(),
            "Generation finished"
        );
        Ok(accepted)
    }

    /// Walk and evaluate until `target` more recipes have been accepted.
    fn fill<R: Rng + ?Sized>(
        &self,
        walker: &RecipeWalker<'_>,
        start: Option<&str>,
        target: usize,
        sanity: &mut Sanity,
        rng: &mut R,
        out: &mut Vec<GeneratedRecipe>,
    ) -> Result<(), GraphError> {
        let bands = &self.cfg.generation;
        let mut made = 0;

        while made < target {
            let walk = walker.walk(start, rng)?;
            let quality = match average_weight(self.graph, &walk.recipe) {
                Ok(avg) => avg,
                Err(GraphError::DegenerateRecipe(len)) => {
                    debug!(len, "Rejected degenerate candidate");
                    sanity.decay();
                    continue;
                }
                Err(e) => return Err(e),
            };

            let band = sanity.band(bands.min_band, bands.max_band);
            if band.accepts(quality) {
                out.push(GeneratedRecipe {
                    quality,
                    ingredients: walk.recipe,
                    stop: walk.stop,
                    sanity: sanity.remaining(),
                });
                made += 1;
            } else {
                debug!(
                    quality,
                    lower = band.lower,
                    upper = band.upper,
                    sanity = sanity.remaining(),
                    "Rejected candidate"
                );
                sanity.decay();
            }
        }
        Ok(())
    }
}
