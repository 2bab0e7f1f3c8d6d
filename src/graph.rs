//! Complete weighted graph over ingredients.
//!
//! Every unordered pair of distinct ingredients owns exactly one edge. Edges
//! are keyed by an [`EdgeKey`] whose endpoints are stored in lexicographic
//! order, so `(a, b)` and `(b, a)` resolve to the same weight. Weights always
//! stay within the graph's [`WeightBounds`].

use std::collections::{HashMap, HashSet};

use crate::error::GraphError;

/// Opaque ingredient label.
pub type Ingredient = String;

/// Canonical key of an unordered ingredient pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    lo: Ingredient,
    hi: Ingredient,
}

impl EdgeKey {
    /// Returns `None` for a self-edge.
    pub fn new(a: &str, b: &str) -> Option<Self> {
        if a == b {
            return None;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        Some(Self {
            lo: lo.to_string(),
            hi: hi.to_string(),
        })
    }

    pub fn lo(&self) -> &str {
        &self.lo
    }

    pub fn hi(&self) -> &str {
        &self.hi
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.lo == ingredient || self.hi == ingredient
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.lo, self.hi)
    }
}

/// Closed interval every edge weight is clamped into. Always a sub-range of
/// `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBounds {
    min: f64,
    max: f64,
}

impl WeightBounds {
    pub fn new(min: f64, max: f64) -> Result<Self, GraphError> {
        if !(min.is_finite() && max.is_finite()) || !(0.0 <= min && min <= max && max <= 1.0) {
            return Err(GraphError::config(format!(
                "weight bounds [{min}, {max}] must satisfy 0 <= min <= max <= 1"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn clamp(&self, weight: f64) -> f64 {
        weight.max(self.min).min(self.max)
    }

    pub fn contains(&self, weight: f64) -> bool {
        (self.min..=self.max).contains(&weight)
    }
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self { min: 0.1, max: 0.9 }
    }
}

/// One damped smoothing step of an edge weight toward a rating.
///
/// The weight moves a fraction `decay` of the way toward the midpoint of
/// itself and `rating`, then is clamped into `bounds`.
pub fn step_weight(current: f64, rating: f64, decay: f64, bounds: WeightBounds) -> f64 {
    let target_avg = 0.5 * (current + rating);
    let delta = decay * (current - target_avg);
    bounds.clamp(current - delta)
}

#[derive(Debug, Clone)]
pub struct Graph {
    ingredients: Vec<Ingredient>,
    members: HashSet<Ingredient>,
    weights: HashMap<EdgeKey, f64>,
    bounds: WeightBounds,
}

impl Graph {
    /// Build a complete graph with every edge set to `default_weight`.
    ///
    /// Duplicate labels are collapsed, keeping the first occurrence's position.
    pub fn build<I, S>(
        ingredients: I,
        default_weight: f64,
        bounds: WeightBounds,
    ) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Ingredient>,
    {
        if !bounds.contains(default_weight) {
            return Err(GraphError::config(format!(
                "default weight {default_weight} outside [{}, {}]",
                bounds.min, bounds.max
            )));
        }

        let mut members = HashSet::new();
        let mut ordered = Vec::new();
        for ingredient in ingredients {
            let ingredient = ingredient.into();
            if members.insert(ingredient.clone()) {
                ordered.push(ingredient);
            }
        }
        if ordered.len() < 2 {
            return Err(GraphError::config(format!(
                "a graph needs at least 2 distinct ingredients (got {})",
                ordered.len()
            )));
        }

        let n = ordered.len();
        let mut weights = HashMap::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                if let Some(key) = EdgeKey::new(&ordered[i], &ordered[j]) {
                    weights.insert(key, default_weight);
                }
            }
        }

        Ok(Self {
            ingredients: ordered,
            members,
            weights,
            bounds,
        })
    }

    /// Ingredient universe, in first-appearance order.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.members.contains(ingredient)
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    pub fn bounds(&self) -> WeightBounds {
        self.bounds
    }

    pub fn edges(&self) -> impl Iterator<Item = (&EdgeKey, f64)> {
        self.weights.iter().map(|(k, w)| (k, *w))
    }

    fn key_for(&self, a: &str, b: &str) -> Result<EdgeKey, GraphError> {
        for ingredient in [a, b] {
            if !self.contains(ingredient) {
                return Err(GraphError::unknown(ingredient));
            }
        }
        EdgeKey::new(a, b).ok_or_else(|| GraphError::missing_edge(a, b))
    }

    /// Weight of the edge between `a` and `b`.
    pub fn get(&self, a: &str, b: &str) -> Result<f64, GraphError> {
        let key = self.key_for(a, b)?;
        self.weights
            .get(&key)
            .copied()
            .ok_or_else(|| GraphError::missing_edge(a, b))
    }

    /// Apply the smoothing rule to one edge; returns the new weight.
    pub fn update_edge(
        &mut self,
        a: &str,
        b: &str,
        rating: f64,
        decay: f64,
    ) -> Result<f64, GraphError> {
        let key = self.key_for(a, b)?;
        let bounds = self.bounds;
        let weight = self
            .weights
            .get_mut(&key)
            .ok_or_else(|| GraphError::missing_edge(a, b))?;
        *weight = step_weight(*weight, rating, decay, bounds);
        Ok(*weight)
    }

    /// Independent copy restricted to the pairs within `subset`.
    pub fn subgraph<S: AsRef<str>>(&self, subset: &[S]) -> Result<Graph, GraphError> {
        let mut members = HashSet::new();
        let mut ordered: Vec<Ingredient> = Vec::new();
        for ingredient in subset {
            let ingredient = ingredient.as_ref();
            if !self.contains(ingredient) {
                return Err(GraphError::unknown(ingredient));
            }
            if members.insert(ingredient.to_string()) {
                ordered.push(ingredient.to_string());
            }
        }
        if ordered.len() < 2 {
            return Err(GraphError::config(format!(
                "a subgraph needs at least 2 distinct ingredients (got {})",
                ordered.len()
            )));
        }

        let mut weights = HashMap::new();
        for (i, a) in ordered.iter().enumerate() {
            for b in &ordered[i + 1..] {
                let key = self.key_for(a, b)?;
                let weight = self
                    .weights
                    .get(&key)
                    .copied()
                    .ok_or_else(|| GraphError::missing_edge(a.as_str(), b.as_str()))?;
                weights.insert(key, weight);
            }
        }

        Ok(Graph {
            ingredients: ordered,
            members,
            weights,
            bounds: self.bounds,
        })
    }

    /// Sum of weights from `ingredient` to every other ingredient.
    pub fn total_weight(&self, ingredient: &str) -> Result<f64, GraphError> {
        let mut total = 0.0;
        for other in &self.ingredients {
            if other != ingredient {
                total += self.get(ingredient, other)?;
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_key_display_uses_sorted_endpoints() {
        let key = EdgeKey::new("tonic", "gin").unwrap();
        assert_eq!(key.to_string(), "gin.tonic");
        assert_eq!(key.lo(), "gin");
        assert_eq!(key.hi(), "tonic");
    }

    #[test]
    fn bounds_reject_inverted_interval() {
        assert!(WeightBounds::new(0.9, 0.1).is_err());
        assert!(WeightBounds::new(0.2, 0.2).is_ok());
    }

    #[test]
    fn bounds_must_stay_inside_unit_interval() {
        assert!(WeightBounds::new(0.0, 2.0).unwrap_err().to_string().contains("max <= 1"));
        assert!(WeightBounds::new(-0.1, 0.5).is_err());
        assert!(WeightBounds::new(0.0, f64::NAN).is_err());
        let full = WeightBounds::new(0.0, 1.0).unwrap();
        assert_eq!((full.min(), full.max()), (0.0, 1.0));
    }

    #[test]
    fn step_weight_clamps_extreme_ratings() {
        let bounds = WeightBounds::new(0.4, 0.6).unwrap();
        assert_eq!(step_weight(0.6, 1.0, 0.9, bounds), 0.6);
        assert_eq!(step_weight(0.4, 0.0, 0.9, bounds), 0.4);
    }
}
