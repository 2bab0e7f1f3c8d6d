use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::tempdir;

#[derive(Debug, serde::Deserialize)]
struct SessionRecipe {
    quality: f64,
    ingredients: Vec<String>,
    stop: String,
}

#[derive(Debug, serde::Deserialize)]
struct Session {
    ingredients: Vec<String>,
    recipes: Vec<SessionRecipe>,
}

fn write_training_set(dir: &Path) -> PathBuf {
    let path = dir.join("training_set_db.json");
    let body = serde_json::json!([
        {"ingredients": ["gin", "tonic", "lime"], "rating": 9},
        {"ingredients": ["white rum", "mint", "lime", "soda", "sugar"], "rating": 8},
        {"ingredients": ["tequila", "lime", "triple sec"], "rating": 8},
        {"ingredients": ["vodka", "cranberry", "lime"], "rating": 6},
        {"ingredients": ["bourbon", "sugar", "bitters"], "rating": 9},
        {"ingredients": ["gin", "cranberry"], "rating": 2}
    ]);
    std::fs::write(&path, serde_json::to_string_pretty(&body).unwrap()).unwrap();
    path
}

fn mixer() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mixer"))
}

#[test]
fn generate_prints_and_exports_recipes() {
    let dir = tempdir().unwrap();
    let training = write_training_set(dir.path());
    let json_path = dir.path().join("session.json");

    let output = mixer()
        .arg("generate")
        .arg("--training")
        .arg(&training)
        .args(["--count", "3", "--seed", "17"])
        .arg("--json")
        .arg(&json_path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("/100)").count(), 3);
    assert!(stdout.lines().any(|l| l.starts_with("The House Special")));

    let raw = std::fs::read_to_string(&json_path).unwrap();
    let session: Session = serde_json::from_str(&raw).unwrap();
    assert_eq!(session.recipes.len(), 3);
    assert_eq!(session.ingredients.len(), 13);
    for recipe in &session.recipes {
        assert!((0.0..=1.0).contains(&recipe.quality));
        assert!((3..=5).contains(&recipe.ingredients.len()));
        assert!(recipe.stop == "length_capped" || recipe.stop == "quality_satisfied");
    }
}

#[test]
fn generate_menu_respects_stock_and_bases() {
    let dir = tempdir().unwrap();
    let training = write_training_set(dir.path());
    let stock = dir.path().join("stock.json");
    std::fs::write(
        &stock,
        r#"{"gin": true, "tequila": true, "lime": true, "tonic": true,
            "triple sec": true, "sugar": true, "vodka": false}"#,
    )
    .unwrap();
    let measures = dir.path().join("measures.json");
    std::fs::write(
        &measures,
        r#"{"gin": "2oz", "tequila": "2oz", "lime": "half-oz", "tonic": "oz",
            "triple sec": "half-oz", "sugar": "tsp"}"#,
    )
    .unwrap();
    let json_path = dir.path().join("menu.json");

    let status = mixer()
        .arg("generate")
        .arg("--training")
        .arg(&training)
        .arg("--stock")
        .arg(&stock)
        .arg("--measures")
        .arg(&measures)
        .args(["--menu", "gin,tequila", "--unique-menu", "--seed", "3"])
        .arg("--json")
        .arg(&json_path)
        .status()
        .unwrap();
    assert!(status.success());

    let session: Session =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(session.recipes.len(), 2);
    assert_eq!(session.recipes[0].ingredients[0], "gin");
    assert_eq!(session.recipes[1].ingredients[0], "tequila");
    for recipe in &session.recipes {
        assert!(!recipe.ingredients.iter().any(|i| i == "vodka"));
        assert!(!recipe.ingredients[1..]
            .iter()
            .any(|i| i == "gin" || i == "tequila"));
    }
}

#[test]
fn cluster_lists_numbered_ingredients() {
    let dir = tempdir().unwrap();
    let training = write_training_set(dir.path());

    let output = mixer()
        .arg("cluster")
        .arg("--training")
        .arg(&training)
        .args(["--menu", "gin", "--seed", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    // the nucleus plus its six heaviest neighbours
    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with("1. "));
    assert!(lines.iter().any(|l| l.ends_with(". gin")));
}

#[test]
fn apply_ratings_rewrites_training_set() {
    let dir = tempdir().unwrap();
    let training = write_training_set(dir.path());
    let ratings = dir.path().join("ratings.txt");
    std::fs::write(&ratings, "3\n10\n").unwrap();

    let status = mixer()
        .arg("apply-ratings")
        .arg("--training")
        .arg(&training)
        .arg("--ratings")
        .arg(&ratings)
        .status()
        .unwrap();
    assert!(status.success());

    let raw = std::fs::read_to_string(&training).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["rating"], 3);
    assert_eq!(value[1]["rating"], 10);
    assert_eq!(value[2]["rating"], 8);
}

#[test]
fn invalid_config_fails_cleanly() {
    let dir = tempdir().unwrap();
    let training = write_training_set(dir.path());
    let config = dir.path().join("mixer.toml");
    std::fs::write(&config, "[walk]\nmin_len = 9\nmax_len = 4\n").unwrap();

    let output = mixer()
        .arg("generate")
        .arg("--training")
        .arg(&training)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("min_len"));
}
