//! Recipe fitness: mean synergy over all pairs of distinct ingredients.

use crate::error::GraphError;
use crate::graph::Graph;

/// Mean edge weight over every position pair `i < j` with distinct ingredients.
///
/// Repeated occurrences count once per pairing, so a recipe with two parts of
/// gin weighs its gin edges twice. A recipe with no pair of distinct
/// ingredients has nothing to average and yields
/// [`GraphError::DegenerateRecipe`].
pub fn average_weight<S: AsRef<str>>(graph: &Graph, recipe: &[S]) -> Result<f64, GraphError> {
    if let Some(foreign) = recipe.iter().find(|i| !graph.contains(i.as_ref())) {
        return Err(GraphError::unknown(foreign.as_ref()));
    }

    let mut total = 0.0;
    let mut edges = 0usize;

    for (i, a) in recipe.iter().enumerate() {
        for b in &recipe[i + 1..] {
            let (a, b) = (a.as_ref(), b.as_ref());
            if a == b {
                continue;
            }
            total += graph.get(a, b)?;
            edges += 1;
        }
    }

    if edges == 0 {
        return Err(GraphError::DegenerateRecipe(recipe.len()));
    }
    Ok(total / edges as f64)
}

/// Walk stop test: is the recipe good enough for how diverse it is?
///
/// `avg * quality_scale >= 1 - diversity * unique / max_len`. Fewer unique
/// ingredients raise the bar.
pub fn satisfies_quality(
    avg_weight: f64,
    unique_ingredients: usize,
    quality_scale: f64,
    diversity: f64,
    max_len: usize,
) -> bool {
    let bar = 1.0 - diversity * unique_ingredients as f64 / max_len as f64;
    avg_weight * quality_scale >= bar
}
