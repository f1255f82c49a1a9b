//! Ember Crawl - Main Binary
//!
//! Plays or simulates a campaign from the terminal

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use ember_crawl::{
    config::GameConfig,
    core::{CardCatalog, PlayerClass},
    game::{
        ControllerState, FixedScriptController, GameEndReason, GameLoop, GameResult,
        GameSnapshot, GameState, InteractiveController, OutputFormat, PlayerController,
        RandomController, VerbosityLevel, ZeroController,
    },
    loader::DeckLoader,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClassArg {
    Warrior,
    Mage,
}

impl From<ClassArg> for PlayerClass {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Warrior => PlayerClass::Warrior,
            ClassArg::Mage => PlayerClass::Mage,
        }
    }
}

/// Controller type for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ControllerType {
    /// Always chooses the first option (for testing)
    Zero,
    /// Makes random choices
    Random,
    /// Text UI controller for human play via stdin
    Tui,
    /// Fixed script controller with predetermined choices (requires --fixed-inputs)
    Fixed,
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "crawl")]
#[command(about = "Ember Crawl - turn-based card combat", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one campaign
    Play {
        #[arg(long, value_enum, default_value = "warrior")]
        class: ClassArg,

        /// Custom deck file (.dck) instead of the class starter deck
        #[arg(long, value_name = "DECK")]
        deck: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "tui")]
        controller: ControllerType,

        /// Fixed script input (space or comma separated indices, e.g., "1 1 2" or "1,1,2")
        #[arg(long, value_name = "CHOICES")]
        fixed_inputs: Option<String>,

        /// Set random seed for deterministic testing
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// JSON game configuration
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Override the starting level
        #[arg(long)]
        start_level: Option<u32>,

        /// Sleep between events for watchable playback
        #[arg(long)]
        pace: bool,

        /// Emit log lines as JSON objects
        #[arg(long)]
        json: bool,

        /// Stop after N decisions and save a snapshot
        #[arg(long, value_name = "N")]
        stop_after: Option<u32>,

        /// Output file for game snapshot
        #[arg(long, default_value = "game.snapshot")]
        snapshot_output: PathBuf,

        /// Load and resume game from snapshot file
        #[arg(long, value_name = "SNAPSHOT_FILE")]
        start_from: Option<PathBuf>,

        /// Capture the game log and print only its last N lines at the end
        #[arg(long, value_name = "N")]
        log_tail: Option<usize>,
    },

    /// Run many campaigns in parallel and summarize the results
    Simulate {
        /// Number of games to run
        #[arg(long, short = 'g', default_value_t = 100)]
        games: u64,

        /// Base seed; game i uses seed + i
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, value_enum, default_value = "warrior")]
        class: ClassArg,

        #[arg(long, value_enum, default_value = "random")]
        controller: ControllerType,

        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },

    /// List the card catalog
    Cards {
        /// Show this class's starter deck instead
        #[arg(long, value_enum)]
        class: Option<ClassArg>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            class,
            deck,
            controller,
            fixed_inputs,
            seed,
            verbosity,
            config,
            start_level,
            pace,
            json,
            stop_after,
            snapshot_output,
            start_from,
            log_tail,
        } => {
            let options = PlayOptions {
                class: class.into(),
                deck,
                controller,
                fixed_inputs,
                seed,
                verbosity: verbosity.0,
                config,
                start_level,
                pace,
                json,
                stop_after,
                snapshot_output,
                start_from,
                log_tail,
            };
            run_play(options).await?
        }
        Commands::Simulate {
            games,
            seed,
            class,
            controller,
            config,
        } => run_simulate(games, seed, class.into(), controller, config)?,
        Commands::Cards { class } => run_cards(class.map(Into::into)),
    }

    Ok(())
}

struct PlayOptions {
    class: PlayerClass,
    deck: Option<PathBuf>,
    controller: ControllerType,
    fixed_inputs: Option<String>,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
    config: Option<PathBuf>,
    start_level: Option<u32>,
    pace: bool,
    json: bool,
    stop_after: Option<u32>,
    snapshot_output: PathBuf,
    start_from: Option<PathBuf>,
    log_tail: Option<usize>,
}

/// Owns whichever controller was picked so its state can be snapshotted
enum AnyController {
    Zero(ZeroController),
    Random(RandomController),
    Fixed(FixedScriptController),
    Tui(InteractiveController),
}

impl AnyController {
    fn build(kind: ControllerType, seed: u64, fixed_inputs: Option<&str>) -> anyhow::Result<Self> {
        Ok(match kind {
            ControllerType::Zero => AnyController::Zero(ZeroController::new()),
            ControllerType::Random => AnyController::Random(RandomController::with_seed(seed)),
            ControllerType::Tui => AnyController::Tui(InteractiveController::new()),
            ControllerType::Fixed => {
                let Some(inputs) = fixed_inputs else {
                    bail!("--controller fixed requires --fixed-inputs");
                };
                let script = parse_fixed_inputs(inputs)
                    .map_err(|e| anyhow::anyhow!("Error parsing --fixed-inputs: {}", e))?;
                AnyController::Fixed(FixedScriptController::new(script))
            }
        })
    }

    /// Swap in saved state when the snapshot was taken with the same kind
    fn restore(&mut self, state: ControllerState) {
        match (self, state) {
            (AnyController::Random(c), ControllerState::Random(saved)) => *c = saved,
            (AnyController::Fixed(c), ControllerState::Fixed(saved)) => *c = saved,
            _ => {}
        }
    }

    fn state(&self) -> Option<ControllerState> {
        match self {
            AnyController::Random(c) => Some(ControllerState::Random(c.clone())),
            AnyController::Fixed(c) => Some(ControllerState::Fixed(c.clone())),
            AnyController::Zero(_) | AnyController::Tui(_) => None,
        }
    }

    fn as_dyn(&mut self) -> &mut dyn PlayerController {
        match self {
            AnyController::Zero(c) => c,
            AnyController::Random(c) => c,
            AnyController::Fixed(c) => c,
            AnyController::Tui(c) => c,
        }
    }
}

/// Parse fixed input string into a vector of choice indices
fn parse_fixed_inputs(input: &str) -> std::result::Result<Vec<usize>, String> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| format!("invalid choice index: '{}'", s))
        })
        .collect()
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn new_game(
    class: PlayerClass,
    deck: Option<&Path>,
    config: &GameConfig,
    seed: u64,
) -> anyhow::Result<GameState> {
    match deck {
        Some(path) => {
            let deck = DeckLoader::load_from_file(path)
                .with_context(|| format!("loading deck {}", path.display()))?;
            Ok(GameState::with_deck(class, &deck, config.ruleset.clone(), seed)?)
        }
        None => Ok(GameState::new(class, config.ruleset.clone(), seed)),
    }
}

async fn run_play(options: PlayOptions) -> anyhow::Result<()> {
    let mut config = load_config(options.config.as_deref())?;
    if let Some(level) = options.start_level {
        config.ruleset.start_level = level;
    }
    let seed = options.seed.unwrap_or_else(rand::random);

    let mut controller =
        AnyController::build(options.controller, seed, options.fixed_inputs.as_deref())?;

    let (mut game, turns_elapsed, actions_this_turn) = match &options.start_from {
        Some(path) => {
            let snapshot = GameSnapshot::load_from_file(path)
                .with_context(|| format!("loading snapshot {}", path.display()))?;
            if let Some(state) = snapshot.controller_state {
                controller.restore(state);
            }
            (
                snapshot.game_state,
                snapshot.turns_elapsed,
                snapshot.actions_this_turn,
            )
        }
        None => {
            let mut game = new_game(options.class, options.deck.as_deref(), &config, seed)?;
            game.start_campaign()?;
            (game, 0, 0)
        }
    };

    game.logger.set_verbosity(options.verbosity);
    if options.json {
        game.logger.set_output_format(OutputFormat::Json);
    }
    if options.log_tail.is_some() {
        game.logger.enable_capture();
    }
    let banner = match &options.start_from {
        Some(path) => format!(
            "=== Ember Crawl: {} resumed on level {} from {} ===",
            game.player.class,
            game.current_level,
            path.display()
        ),
        None => format!(
            "=== Ember Crawl: {} on level {} (seed {}) ===",
            game.player.class, game.current_level, seed
        ),
    };
    game.logger.minimal(&banner);

    let max_turns = game.ruleset.max_turns;
    let mut game_loop = GameLoop::new(&mut game)
        .with_max_turns(max_turns)
        .with_verbosity(options.verbosity)
        .with_turn_counter(turns_elapsed)
        .with_action_counter(actions_this_turn);

    let mut decisions = 0u32;
    loop {
        if options.stop_after == Some(decisions) {
            let snapshot = GameSnapshot::with_controller_state(
                game_loop.game.clone(),
                game_loop.turns_elapsed(),
                controller.state(),
            )
            .with_action_counter(game_loop.actions_this_turn());
            snapshot
                .save_to_file(&options.snapshot_output)
                .with_context(|| format!("saving snapshot {}", options.snapshot_output.display()))?;
            game_loop.game.logger.minimal(&format!(
                "Snapshot saved to {} after {} decisions",
                options.snapshot_output.display(),
                decisions
            ));
            if let Some(lines) = options.log_tail {
                game_loop.game.logger.flush_tail(lines);
            }
            return Ok(());
        }

        let step = game_loop.step(controller.as_dyn())?;
        decisions += 1;

        let events = game_loop.game.drain_events();
        if options.pace {
            for event in &events {
                let delay = event.pacing_delay_ms(&config.pacing);
                if delay > 0 {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
            }
        }

        if let Some(result) = step {
            report(&game_loop, &result);
            if let Some(lines) = options.log_tail {
                game_loop.game.logger.flush_tail(lines);
            }
            let view = ember_crawl::game::GameStateView::new(game_loop.game);
            controller
                .as_dyn()
                .on_game_end(&view, result.end_reason == GameEndReason::Victory);
            return Ok(());
        }
    }
}

fn report(game_loop: &GameLoop, result: &GameResult) {
    game_loop.game.logger.minimal(&format!(
        "=== {:?}: level {}, {} levels cleared, {} turns, {} HP left ===",
        result.end_reason,
        result.final_level,
        result.levels_cleared,
        result.turns_played,
        result.final_health
    ));
}

fn run_simulate(
    games: u64,
    seed: u64,
    class: PlayerClass,
    controller: ControllerType,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    if matches!(controller, ControllerType::Tui | ControllerType::Fixed) {
        bail!("simulate supports the zero and random controllers only");
    }
    let config = load_config(config.as_deref())?;

    let results: Vec<GameResult> = (0..games)
        .into_par_iter()
        .map(|i| -> ember_crawl::Result<GameResult> {
            let game_seed = seed.wrapping_add(i);
            let mut game = GameState::new(class, config.ruleset.clone(), game_seed);
            game.logger.set_verbosity(VerbosityLevel::Silent);
            let max_turns = game.ruleset.max_turns;
            let mut game_loop = GameLoop::new(&mut game).with_max_turns(max_turns);
            match controller {
                ControllerType::Zero => game_loop.run_campaign(&mut ZeroController::new()),
                _ => game_loop.run_campaign(&mut RandomController::with_seed(game_seed)),
            }
        })
        .collect::<ember_crawl::Result<_>>()?;

    let count = |reason: GameEndReason| results.iter().filter(|r| r.end_reason == reason).count();
    let total_levels: u64 = results.iter().map(|r| u64::from(r.levels_cleared)).sum();

    println!("=== {} {} campaigns ({:?} controller) ===", games, class, controller);
    println!("  Victories:   {}", count(GameEndReason::Victory));
    println!("  Defeats:     {}", count(GameEndReason::Defeat));
    println!("  Turn limits: {}", count(GameEndReason::TurnLimit));
    if games > 0 {
        println!(
            "  Avg levels cleared: {:.2}",
            total_levels as f64 / games as f64
        );
    }
    Ok(())
}

fn run_cards(class: Option<PlayerClass>) {
    let catalog = CardCatalog::standard();
    match class {
        Some(class) => {
            let deck = catalog.starter_deck(class);
            println!("{} starter deck ({} cards):", class, deck.total_cards());
            for entry in &deck.main_deck {
                println!("  {} {}", entry.count, entry.card_name);
            }
        }
        None => {
            for card in catalog.sorted() {
                println!("{}", card.summary());
            }
        }
    }
}
