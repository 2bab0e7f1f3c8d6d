//! Human-friendly rendering of generated recipes.

use std::collections::HashMap;
use std::fmt::Write as _;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::generator::GeneratedRecipe;
use crate::graph::Ingredient;

/// Unit used when an ingredient has no entry in the measures table.
pub const FALLBACK_UNIT: &str = "part";

/// A displayable quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub amount: f64,
    pub unit: String,
}

impl Measure {
    /// Convert a count of parts into a display measure.
    ///
    /// `tsp` parts are 1.5 teaspoons; `half-oz` and `2oz` are shown in ounces.
    pub fn convert(parts: usize, unit: &str) -> Self {
        let parts = parts as f64;
        let (amount, unit) = match unit {
            "tsp" => (parts * 1.5, "tsp"),
            "half-oz" => (parts / 2.0, "oz"),
            "2oz" => (parts * 2.0, "oz"),
            other => (parts, other),
        };
        Self {
            amount,
            unit: unit.to_string(),
        }
    }

    /// Amount with no trailing `.0` when integral.
    pub fn amount_label(&self) -> String {
        if self.amount.fract() == 0.0 {
            format!("{}", self.amount as i64)
        } else {
            format!("{}", self.amount)
        }
    }
}

/// Picks "The {adjective} {noun}" names.
#[derive(Debug, Clone, Default)]
pub struct RecipeNamer {
    adjectives: Vec<String>,
    nouns: Vec<String>,
}

impl RecipeNamer {
    pub fn new(adjectives: Vec<String>, nouns: Vec<String>) -> Self {
        Self { adjectives, nouns }
    }

    pub fn name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let adjective = self.adjectives.choose(rng).map_or("House", String::as_str);
        let noun = self.nouns.choose(rng).map_or("Special", String::as_str);
        format!("The {adjective} {noun}")
    }
}

/// Header line plus one `measure unit  ingredient` line per ingredient.
pub fn render_recipe(
    name: &str,
    recipe: &GeneratedRecipe,
    measures: &HashMap<Ingredient, String>,
) -> String {
    let score = (recipe.quality * 100.0).floor() as i64;
    let mut out = format!("{name} ({score}/100)\n");

    for (ingredient, parts) in recipe.counts() {
        let unit = match measures.get(&ingredient) {
            Some(unit) => unit.as_str(),
            None => {
                warn!(ingredient = %ingredient, "No measure for ingredient");
                FALLBACK_UNIT
            }
        };
        let measure = Measure::convert(parts, unit);
        let _ = writeln!(
            out,
            "{:>3} {:<3}  {ingredient}",
            measure.amount_label(),
            measure.unit
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::StopReason;

    #[test]
    fn conversions_match_bar_units() {
        assert_eq!(Measure::convert(2, "tsp").amount, 3.0);
        let half = Measure::convert(1, "half-oz");
        assert_eq!((half.amount, half.unit.as_str()), (0.5, "oz"));
        let double = Measure::convert(2, "2oz");
        assert_eq!((double.amount, double.unit.as_str()), (4.0, "oz"));
        assert_eq!(Measure::convert(3, "dash").unit, "dash");
    }

    #[test]
    fn amount_label_drops_integral_decimals() {
        assert_eq!(Measure::convert(2, "oz").amount_label(), "2");
        assert_eq!(Measure::convert(1, "tsp").amount_label(), "1.5");
    }

    #[test]
    fn render_groups_repeated_parts() {
        let recipe = GeneratedRecipe {
            quality: 0.756,
            ingredients: vec!["gin".into(), "tonic".into(), "gin".into()],
            stop: StopReason::LengthCapped,
            sanity: 10_000,
        };
        let mut measures = HashMap::new();
        measures.insert("gin".to_string(), "oz".to_string());
        let text = render_recipe("The Dry Spell", &recipe, &measures);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "The Dry Spell (75/100)");
        assert_eq!(lines[1], "  2 oz   gin");
        assert_eq!(lines[2], "  1 part  tonic");
    }

    #[test]
    fn namer_falls_back_without_words() {
        let mut rng = rand::thread_rng();
        assert_eq!(RecipeNamer::default().name(&mut rng), "The House Special");
    }
}
