//! Performance benchmarks for the campaign engine
//!
//! Two iteration modes:
//!
//! 1. **Fresh** - Build a new game for each iteration
//! 2. **Snapshot** - Clone a prepared game state each iteration
//!
//! Both run a full campaign with a seeded RandomController and the
//! warrior_basic.dck test deck.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ember_crawl::{
    config::Ruleset,
    core::PlayerClass,
    game::{GameLoop, GameState, RandomController, VerbosityLevel},
    loader::{DeckList, DeckLoader},
    Result,
};
use std::path::PathBuf;
use std::time::Duration;

/// Metrics collected during game execution
#[derive(Debug, Clone)]
struct GameMetrics {
    turns: u32,
    levels_cleared: u32,
    duration: Duration,
}

impl GameMetrics {
    fn games_per_sec(&self) -> f64 {
        1.0 / self.duration.as_secs_f64()
    }

    fn turns_per_sec(&self) -> f64 {
        self.turns as f64 / self.duration.as_secs_f64()
    }
}

fn load_deck() -> Result<DeckList> {
    DeckLoader::load_from_file(&PathBuf::from("test_decks/warrior_basic.dck"))
}

fn new_game(deck: &DeckList, seed: u64) -> Result<GameState> {
    let mut game = GameState::with_deck(PlayerClass::Warrior, deck, Ruleset::default(), seed)?;
    game.logger.set_verbosity(VerbosityLevel::Silent);
    Ok(game)
}

/// Run a single campaign and collect metrics
fn run_game_with_metrics(deck: &DeckList, seed: u64) -> Result<GameMetrics> {
    let start = std::time::Instant::now();

    let mut game = new_game(deck, seed)?;
    let mut controller = RandomController::with_seed(seed);
    let result = GameLoop::new(&mut game)
        .with_max_turns(500)
        .run_campaign(&mut controller)?;

    Ok(GameMetrics {
        turns: result.turns_played,
        levels_cleared: result.levels_cleared,
        duration: start.elapsed(),
    })
}

/// Benchmark: Fresh mode - build a new game each iteration
fn bench_game_fresh(c: &mut Criterion) {
    let deck = match load_deck() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Skipping benchmark - failed to load deck: {}", e);
            return;
        }
    };

    let mut group = c.benchmark_group("campaign");
    group.sample_size(20);

    let seed = 42u64;
    println!("\nWarmup game (seed {}):", seed);
    if let Ok(metrics) = run_game_with_metrics(&deck, seed) {
        println!("  Turns: {}", metrics.turns);
        println!("  Levels cleared: {}", metrics.levels_cleared);
        println!("  Duration: {:?}", metrics.duration);
        println!("  Games/sec: {:.2}", metrics.games_per_sec());
        println!("  Turns/sec: {:.2}", metrics.turns_per_sec());
    }

    group.bench_with_input(BenchmarkId::new("fresh", seed), &seed, |b, &seed| {
        b.iter(|| {
            run_game_with_metrics(&deck, black_box(seed)).expect("Game should complete successfully")
        });
    });

    group.finish();
}

/// Benchmark: Snapshot mode - clone the initial state each iteration
fn bench_game_snapshot(c: &mut Criterion) {
    let deck = match load_deck() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Skipping benchmark - failed to load deck: {}", e);
            return;
        }
    };

    let seed = 42u64;
    let mut initial_game = new_game(&deck, seed).expect("Failed to initialize game");
    initial_game
        .start_campaign()
        .expect("Failed to start campaign");

    let mut group = c.benchmark_group("campaign");
    group.sample_size(20);

    group.bench_function(BenchmarkId::new("snapshot", seed), |b| {
        b.iter(|| {
            let mut game = initial_game.clone();
            let mut controller = RandomController::with_seed(seed);
            GameLoop::new(&mut game)
                .with_max_turns(500)
                .run_campaign(&mut controller)
                .expect("Game should complete successfully")
        });
    });

    group.finish();
}

criterion_group!(benches, bench_game_fresh, bench_game_snapshot);
criterion_main!(benches);
