use cocktail_graph::fitness::satisfies_quality;
use cocktail_graph::{average_weight, Graph, GraphError, WeightBounds};

fn bar() -> Graph {
    let mut g = Graph::build(["gin", "tonic", "lime"], 0.5, WeightBounds::default()).unwrap();
    g.update_edge("gin", "tonic", 1.0, 0.5).unwrap(); // 0.625
    g
}

#[test]
fn average_over_distinct_pairs() {
    let g = bar();
    let avg = average_weight(&g, &["gin", "tonic", "lime"]).unwrap();
    assert!((avg - (0.625 + 0.5 + 0.5) / 3.0).abs() < 1e-12);
}

#[test]
fn repeated_parts_weigh_their_edges_again() {
    let g = bar();
    // pairs: gin/tonic, gin/gin (skipped), tonic/gin
    let avg = average_weight(&g, &["gin", "tonic", "gin"]).unwrap();
    assert!((avg - 0.625).abs() < 1e-12);

    let avg = average_weight(&g, &["gin", "gin", "lime"]).unwrap();
    assert!((avg - 0.5).abs() < 1e-12);
}

#[test]
fn single_repeated_ingredient_is_degenerate() {
    let g = bar();
    assert_eq!(
        average_weight(&g, &["gin", "gin"]),
        Err(GraphError::DegenerateRecipe(2))
    );
    assert!(matches!(
        average_weight(&g, &["gin"]),
        Err(GraphError::DegenerateRecipe(1))
    ));
    assert!(matches!(
        average_weight::<&str>(&g, &[]),
        Err(GraphError::DegenerateRecipe(0))
    ));
}

#[test]
fn foreign_ingredient_is_a_lookup_error() {
    let g = bar();
    assert!(average_weight(&g, &["gin", "mezcal"]).unwrap_err().is_lookup());
    assert!(average_weight(&g, &["mezcal"]).unwrap_err().is_lookup());
    assert!(average_weight(&g, &["mezcal", "mezcal"]).unwrap_err().is_lookup());
}

#[test]
fn stop_test_bar_drops_with_diversity() {
    // bar = 1 - 0.6 * unique / 5
    assert!(!satisfies_quality(0.6, 2, 1.0, 0.6, 5)); // bar 0.76
    assert!(satisfies_quality(0.6, 4, 1.0, 0.6, 5)); // bar 0.52
    assert!(satisfies_quality(0.4, 2, 2.0, 0.6, 5));
}
