#![forbid(unsafe_code)]

//! # cocktail-graph
//!
//! Invents cocktails from a graph of learned ingredient synergy.
//!
//! Every pair of ingredients seen in a rated training set gets an edge weight.
//! Each rated recipe nudges the weights of all its ingredient pairs toward its
//! rating with a damped smoothing step, so one outlier cannot dominate. New
//! recipes come from a biased random walk over the graph, and each candidate
//! is accepted or rejected by its average pairwise weight. The acceptance band
//! starts strict and loosens with every rejection, so generation always
//! finishes.

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod fitness;
pub mod generator;
pub mod graph;
pub mod pipeline;
pub mod present;
pub mod trainer;
pub mod walker;

pub use cluster::{cluster_from_nuclei, identify_nuclei, IngredientLimit};
pub use config::{ClusterConfig, Config, GenerationConfig, TrainingConfig, WalkConfig};
pub use error::GraphError;
pub use fitness::average_weight;
pub use generator::{
    AcceptanceBand, GeneratedRecipe, GenerationStrategy, RecipeGenerator, Sanity,
};
pub use graph::{step_weight, EdgeKey, Graph, Ingredient, WeightBounds};
pub use pipeline::{mix, MixSession};
pub use trainer::{update_recipe, RatedRecipe, Trainer};
pub use walker::{RecipeWalker, StopReason, Walk};
