//! Tunable parameters for training, walking, generation and clustering.
//!
//! Every section deserializes with defaults, so a TOML file only needs the
//! keys it wants to override:
//!
//! ```toml
//! [training]
//! iterations = 12
//!
//! [walk]
//! randomness = 1.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

// ---------------------------------------------------------------------
//  Sections
// ---------------------------------------------------------------------

/// Parameters of the edge-weight learning rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Floor for every edge weight (u).
    pub min_weight: f64,
    /// Ceiling for every edge weight (Y).
    pub max_weight: f64,
    /// Initial weight of every edge (w). Higher means more experimental recipes,
    /// since untrained pairs look as good as rated ones.
    pub default_weight: f64,
    /// Fraction of the way an edge steps toward the rating midpoint (d).
    pub decay: f64,
    /// Passes over the training set (G).
    pub iterations: usize,
    /// Update an edge once per occurrence pair instead of once per recipe.
    pub allow_duplicate_edges: bool,
    /// Shuffle the training set before each pass.
    pub shuffle: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            min_weight: 0.1,
            max_weight: 0.9,
            default_weight: 0.6,
            decay: 0.1,
            iterations: 8,
            allow_duplicate_edges: false,
            shuffle: true,
        }
    }
}

/// Parameters of the recipe walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Maximum total occurrences in a recipe (L), not unique ingredients.
    pub max_len: usize,
    /// Minimum total occurrences in a recipe (l).
    pub min_len: usize,
    /// Diversity pressure (z). Lower values mean more ingredients before the
    /// walk is willing to stop.
    pub diversity: f64,
    /// Quality scale (W) applied to the average weight in the stop test.
    /// Lower values raise the bar.
    pub quality_scale: f64,
    /// Randomness multiplier (q) applied to every candidate score.
    pub randomness: f64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_len: 5,
            min_len: 3,
            diversity: 0.6,
            quality_scale: 1.0,
            randomness: 2.0,
        }
    }
}

/// Parameters of the accept/reject loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Recipes to produce in count mode (N).
    pub count: usize,
    /// Lower edge of the acceptance band at full sanity (m).
    pub min_band: f64,
    /// Upper edge of the acceptance band at full sanity (M).
    pub max_band: f64,
    /// Starting value of the sanity counter.
    pub sanity: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            count: 4,
            min_band: 0.6,
            max_band: 0.8,
            sanity: 10_000,
        }
    }
}

/// Parameters of automatic ingredient limitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Number of nuclei to pick when none are given (O).
    pub nuclei: usize,
    /// Heaviest neighbours kept per nucleus (X).
    pub edges_per_nucleus: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            nuclei: 5,
            edges_per_nucleus: 6,
        }
    }
}

// ---------------------------------------------------------------------
//  Top level
// ---------------------------------------------------------------------

/// Immutable run configuration, passed by reference into every component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub training: TrainingConfig,
    pub walk: WalkConfig,
    pub generation: GenerationConfig,
    pub cluster: ClusterConfig,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, GraphError> {
        let cfg: Config = toml::from_str(raw)
            .map_err(|e| GraphError::config(format!("invalid config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GraphError::config(format!("cannot read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        self.training.validate()?;
        self.walk.validate()?;
        self.generation.validate()?;
        self.cluster.validate()
    }
}

fn check(ok: bool, message: impl FnOnce() -> String) -> Result<(), GraphError> {
    if ok {
        Ok(())
    } else {
        Err(GraphError::Config(message()))
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), GraphError> {
        let (u, y) = (self.min_weight, self.max_weight);
        check(u.is_finite() && y.is_finite(), || {
            "weight bounds must be finite".to_string()
        })?;
        check(u >= 0.0, || format!("min_weight must be >= 0 (got {u})"))?;
        check(y <= 1.0, || format!("max_weight must be <= 1 (got {y})"))?;
        check(u <= y, || {
            format!("min_weight ({u}) must not exceed max_weight ({y})")
        })?;
        let w = self.default_weight;
        check((u..=y).contains(&w), || {
            format!("default_weight ({w}) must lie within [{u}, {y}]")
        })?;
        let d = self.decay;
        check(d > 0.0 && d < 1.0, || {
            format!("decay must lie strictly between 0 and 1 (got {d})")
        })
    }
}

impl WalkConfig {
    pub fn validate(&self) -> Result<(), GraphError> {
        check(self.min_len >= 1, || "min_len must be >= 1".to_string())?;
        check(self.max_len >= 2, || {
            format!("max_len must be >= 2 (got {})", self.max_len)
        })?;
        check(self.min_len <= self.max_len, || {
            format!(
                "min_len ({}) must not exceed max_len ({})",
                self.min_len, self.max_len
            )
        })?;
        check(self.randomness.is_finite() && self.randomness > 0.0, || {
            format!("randomness must be > 0 (got {})", self.randomness)
        })?;
        check(
            self.quality_scale.is_finite() && self.quality_scale > 0.0,
            || format!("quality_scale must be > 0 (got {})", self.quality_scale),
        )?;
        check(self.diversity.is_finite() && self.diversity >= 0.0, || {
            format!("diversity must be >= 0 (got {})", self.diversity)
        })
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), GraphError> {
        let (m, big_m) = (self.min_band, self.max_band);
        check((0.0..=1.0).contains(&m) && (0.0..=1.0).contains(&big_m), || {
            format!("acceptance band [{m}, {big_m}] must lie within [0, 1]")
        })?;
        check(m <= big_m, || {
            format!("min_band ({m}) must not exceed max_band ({big_m})")
        })?;
        check(self.sanity > 0, || "sanity must be > 0".to_string())
    }
}

impl ClusterConfig {
    pub fn validate(&self) -> Result<(), GraphError> {
        check(self.nuclei > 0, || "cluster.nuclei must be > 0".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str("[walk]\nrandomness = 1.5\n").unwrap();
        assert_eq!(cfg.walk.randomness, 1.5);
        assert_eq!(cfg.walk.max_len, 5);
        assert_eq!(cfg.training, TrainingConfig::default());
    }

    #[test]
    fn rejects_inverted_ranges() {
        let mut cfg = Config::default();
        cfg.training.min_weight = 0.95;
        assert!(matches!(cfg.validate(), Err(GraphError::Config(_))));

        let mut cfg = Config::default();
        cfg.walk.min_len = 6;
        assert!(matches!(cfg.validate(), Err(GraphError::Config(_))));

        let mut cfg = Config::default();
        cfg.generation.min_band = 0.9;
        assert!(matches!(cfg.validate(), Err(GraphError::Config(_))));
    }

    #[test]
    fn rejects_decay_outside_open_interval() {
        for d in [0.0, 1.0, -0.5] {
            let mut cfg = Config::default();
            cfg.training.decay = d;
            assert!(cfg.validate().is_err(), "decay {d} accepted");
        }
    }

    #[test]
    fn rejects_unknown_toml_types() {
        assert!(Config::from_toml_str("[walk]\nmax_len = \"five\"\n").is_err());
    }
}
