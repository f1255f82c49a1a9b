//! Core game state, turn structure and campaign flow

pub mod actions;
pub mod combat;
pub mod controller;
pub mod debug;
pub mod event;
pub mod fixed_script_controller;
pub mod game_loop;
pub mod interactive_controller;
pub mod level;
pub mod logger;
pub mod phase;
pub mod quest;
pub mod random_controller;
pub mod shop;
pub mod snapshot;
pub mod state;
pub mod town;
pub mod zero_controller;

pub use actions::QueuedAttack;
pub use controller::{GameStateView, PlayerController, TurnAction};
pub use event::{GameEvent, SoundCue};
pub use fixed_script_controller::FixedScriptController;
pub use game_loop::{GameEndReason, GameLoop, GameResult, VerbosityLevel};
pub use interactive_controller::InteractiveController;
pub use level::{LevelDefinition, LevelKind, LevelManager};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode};
pub use phase::{GameOutcome, TurnPhase};
pub use quest::{Quest, QuestManager, QuestStatus};
pub use random_controller::RandomController;
pub use shop::{Shop, ShopOffer};
pub use snapshot::{ControllerState, GameSnapshot, SnapshotError};
pub use state::GameState;
pub use town::{hit_test, HotZone, HotZoneAction, ZoneRect};
pub use zero_controller::ZeroController;
