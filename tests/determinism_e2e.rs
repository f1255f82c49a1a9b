//! End-to-end determinism tests
//!
//! Verifies that campaigns with the same seed produce identical output across
//! multiple runs. This runs the actual binary and compares stdout.
//!
//! Tests are generated for each `.dck` file in `test_decks/` using the
//! `dir-test` procedural macro. Decks with "mage" in the file name are played
//! by a mage, everything else by a warrior.

use dir_test::{dir_test, Fixture};
use similar_asserts::assert_eq;
use std::process::Command;

/// Helper to run the crawl binary and capture stdout
fn run_game_with_seed(deck_path: &str, seed: u64, controller: &str) -> String {
    let class = if deck_path.contains("mage") { "mage" } else { "warrior" };
    let output = Command::new(env!("CARGO_BIN_EXE_crawl"))
        .args([
            "play",
            "--class",
            class,
            "--deck",
            deck_path,
            "--controller",
            controller,
            "--seed",
            &seed.to_string(),
            "--verbosity=verbose",
        ])
        .output()
        .expect("Failed to run crawl binary");

    assert!(
        output.status.success(),
        "crawl failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in stdout")
}

#[dir_test(
    dir: "$CARGO_MANIFEST_DIR/test_decks",
    glob: "**/*.dck",
)]
fn test_deck_determinism(fixture: Fixture<&str>) {
    let deck_path = fixture.path();
    let seed = 42u64;

    let run1 = run_game_with_seed(deck_path, seed, "random");
    let run2 = run_game_with_seed(deck_path, seed, "random");

    assert!(!run1.is_empty(), "Deck {} produced empty output", deck_path);
    assert_eq!(
        run1, run2,
        "Deck {} produced different output with same seed (seed={})",
        deck_path, seed
    );
}

#[test]
fn test_zero_controller_determinism() {
    let deck = concat!(env!("CARGO_MANIFEST_DIR"), "/test_decks/warrior_basic.dck");
    let run1 = run_game_with_seed(deck, 7, "zero");
    let run2 = run_game_with_seed(deck, 7, "zero");
    assert_eq!(run1, run2);
    assert!(run1.contains("=== Ember Crawl"));
}

#[test]
fn test_different_seeds_diverge() {
    let deck = concat!(env!("CARGO_MANIFEST_DIR"), "/test_decks/mage_fire.dck");
    let run1 = run_game_with_seed(deck, 1, "random");
    let run2 = run_game_with_seed(deck, 2, "random");
    assert_ne!(run1, run2, "different seeds should play out differently");
}
