//! Flat-file inputs: training set, bar stock, measures and name word lists.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::graph::Ingredient;
use crate::trainer::{RatedRecipe, RATING_SCALE};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid data: {0}")]
    Invalid(String),
}

impl DataError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// JSON array of `{ "ingredients": [...], "rating": 0..=10 | null }`.
pub fn load_training_set(path: impl AsRef<Path>) -> Result<Vec<RatedRecipe>, DataError> {
    let recipes: Vec<RatedRecipe> = read_json(path.as_ref())?;
    for (idx, recipe) in recipes.iter().enumerate() {
        if let Some(rating) = recipe.rating {
            if !rating.is_finite() || !(0.0..=RATING_SCALE).contains(&rating) {
                return Err(DataError::invalid(format!(
                    "recipe {idx}: rating {rating} outside 0..={RATING_SCALE}"
                )));
            }
        }
        if recipe.ingredients.is_empty() {
            return Err(DataError::invalid(format!("recipe {idx} has no ingredients")));
        }
    }
    Ok(recipes)
}

/// JSON object `name -> bool`; the names marked `true` are in stock.
pub fn load_stock(path: impl AsRef<Path>) -> Result<Vec<Ingredient>, DataError> {
    let stock: HashMap<Ingredient, bool> = read_json(path.as_ref())?;
    let mut available: Vec<Ingredient> = stock
        .into_iter()
        .filter_map(|(name, in_stock)| in_stock.then_some(name))
        .collect();
    available.sort();
    Ok(available)
}

/// JSON object `name -> unit`.
pub fn load_measures(path: impl AsRef<Path>) -> Result<HashMap<Ingredient, String>, DataError> {
    read_json(path.as_ref())
}

/// One word per line; surrounding whitespace and blank lines are dropped.
pub fn load_word_list(path: impl AsRef<Path>) -> Result<Vec<String>, DataError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Write ratings (one integer per line) into the training set, in order.
///
/// Other fields of each recipe are preserved. Returns the number of recipes
/// updated; recipes past the end of the ratings file are left alone.
pub fn apply_ratings(
    training_path: impl AsRef<Path>,
    ratings_path: impl AsRef<Path>,
) -> Result<usize, DataError> {
    let training_path = training_path.as_ref();
    let mut recipes: Vec<Value> = read_json(training_path)?;

    let raw = std::fs::read_to_string(ratings_path)?;
    let mut ratings = Vec::new();
    for (line_no, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let rating: i64 = line.parse().map_err(|_| {
            DataError::invalid(format!("line {}: '{line}' is not an integer", line_no + 1))
        })?;
        if !(0..=RATING_SCALE as i64).contains(&rating) {
            return Err(DataError::invalid(format!(
                "line {}: rating {rating} outside 0..={RATING_SCALE}",
                line_no + 1
            )));
        }
        ratings.push(rating);
    }

    if ratings.len() > recipes.len() {
        return Err(DataError::invalid(format!(
            "{} ratings for {} recipes",
            ratings.len(),
            recipes.len()
        )));
    }

    for (recipe, rating) in recipes.iter_mut().zip(&ratings) {
        let obj = recipe
            .as_object_mut()
            .ok_or_else(|| DataError::invalid("training entries must be objects"))?;
        obj.insert("rating".to_string(), Value::from(*rating));
    }

    let json = serde_json::to_string_pretty(&recipes)?;
    std::fs::write(training_path, json)?;
    Ok(ratings.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_list_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adjs.txt");
        std::fs::write(&path, "smoky\n\n  bright \n").unwrap();
        assert_eq!(load_word_list(&path).unwrap(), vec!["smoky", "bright"]);
    }

    #[test]
    fn stock_keeps_only_available_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.json");
        std::fs::write(&path, r#"{"gin": true, "mezcal": false, "lime": true}"#).unwrap();
        assert_eq!(load_stock(&path).unwrap(), vec!["gin", "lime"]);
    }

    #[test]
    fn training_set_rejects_out_of_range_rating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.json");
        std::fs::write(&path, r#"[{"ingredients": ["gin", "tonic"], "rating": 11}]"#).unwrap();
        assert!(matches!(
            load_training_set(&path),
            Err(DataError::Invalid(_))
        ));
    }
}
