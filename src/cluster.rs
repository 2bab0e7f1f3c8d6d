//! Restricting the ingredient universe before generation.
//!
//! Either a manual bar stock, or an automatic cluster grown from "nuclei":
//! ingredients with the highest total synergy, each bringing along its
//! heaviest neighbours.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::config::ClusterConfig;
use crate::error::GraphError;
use crate::graph::{Graph, Ingredient};

/// Top `n` ingredients by summed edge weight, heaviest first.
/// Ties keep universe order.
pub fn identify_nuclei(graph: &Graph, n: usize) -> Result<Vec<Ingredient>, GraphError> {
    let mut scored = Vec::with_capacity(graph.len());
    for ingredient in graph.ingredients() {
        scored.push((ingredient, graph.total_weight(ingredient)?));
    }
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    Ok(scored
        .into_iter()
        .take(n)
        .map(|(ingredient, _)| ingredient.clone())
        .collect())
}

/// Nuclei plus each nucleus's `per_nucleus` heaviest neighbours, deduplicated
/// and sorted.
pub fn cluster_from_nuclei<S: AsRef<str>>(
    graph: &Graph,
    nuclei: &[S],
    per_nucleus: usize,
) -> Result<Vec<Ingredient>, GraphError> {
    let mut cluster: BTreeSet<Ingredient> = BTreeSet::new();

    for nucleus in nuclei {
        let nucleus = nucleus.as_ref();
        if !graph.contains(nucleus) {
            return Err(GraphError::unknown(nucleus));
        }
        cluster.insert(nucleus.to_string());

        let mut neighbours = Vec::with_capacity(graph.len());
        for other in graph.ingredients() {
            if other != nucleus {
                neighbours.push((other, graph.get(nucleus, other)?));
            }
        }
        neighbours.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        cluster.extend(
            neighbours
                .into_iter()
                .take(per_nucleus)
                .map(|(other, _)| other.clone()),
        );
    }

    Ok(cluster.into_iter().collect())
}

/// Which part of the trained universe generation may draw from.
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientLimit {
    /// The whole trained universe.
    None,
    /// Only the listed ingredients (the bar stock).
    Stock(Vec<Ingredient>),
    /// An automatic cluster. Without explicit nuclei the heaviest
    /// `cluster.nuclei` ingredients are used.
    Auto { nuclei: Option<Vec<Ingredient>> },
}

impl IngredientLimit {
    /// Ingredients selected by this limit from `graph`.
    pub fn select(
        &self,
        graph: &Graph,
        cfg: &ClusterConfig,
    ) -> Result<Vec<Ingredient>, GraphError> {
        match self {
            IngredientLimit::None => Ok(graph.ingredients().to_vec()),
            IngredientLimit::Stock(stock) => Ok(stock.clone()),
            IngredientLimit::Auto { nuclei } => {
                cfg.validate()?;
                let nuclei = match nuclei {
                    Some(nuclei) => nuclei.clone(),
                    None => identify_nuclei(graph, cfg.nuclei)?,
                };
                cluster_from_nuclei(graph, &nuclei, cfg.edges_per_nucleus)
            }
        }
    }

    /// Independent subgraph restricted to [`IngredientLimit::select`].
    pub fn apply(&self, graph: &Graph, cfg: &ClusterConfig) -> Result<Graph, GraphError> {
        match self {
            IngredientLimit::None => Ok(graph.clone()),
            _ => graph.subgraph(&self.select(graph, cfg)?),
        }
    }
}
