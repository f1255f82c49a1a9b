//! Main game state structure

use crate::config::Ruleset;
use crate::core::{CardCatalog, CardKey, Enemy, EnemyId, EnemyKind, Player, PlayerClass};
use crate::game::actions::QueuedAttack;
use crate::game::event::{GameEvent, SoundCue};
use crate::game::level::LevelManager;
use crate::game::logger::GameLogger;
use crate::game::phase::{GameOutcome, TurnPhase};
use crate::game::quest::QuestManager;
use crate::game::shop::Shop;
use crate::inventory::Backpack;
use crate::loader::DeckList;
use crate::zones::PlayerZones;
use crate::Result;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Complete game state
///
/// Everything needed to continue a game is serialized, including the RNG
/// stream. The card catalog and level table are static data and are rebuilt
/// on load; the event list and logger are presentation-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub zones: PlayerZones,

    /// Enemies on the field, in attack order
    pub enemies: Vec<Enemy>,

    /// Attacks committed this turn, resolved in order on end turn
    pub attack_queue: Vec<QueuedAttack>,

    pub current_level: u32,
    pub previous_level: Option<u32>,
    pub phase: TurnPhase,
    pub is_level_transitioning: bool,
    pub outcome: Option<GameOutcome>,

    pub turn_number: u32,
    pub levels_cleared: u32,

    pub backpack: Backpack,
    pub quests: QuestManager,
    pub shop: Shop,

    pub ruleset: Ruleset,

    /// Gameplay RNG (deck shuffles, enemy damage rolls, cue variation)
    pub rng: ChaCha12Rng,

    next_enemy_id: u32,
    last_hurt_cue: Option<SoundCue>,

    #[serde(skip, default = "CardCatalog::standard")]
    pub catalog: CardCatalog,

    #[serde(skip)]
    pub levels: LevelManager,

    #[serde(skip)]
    events: Vec<GameEvent>,

    #[serde(skip)]
    pub logger: GameLogger,
}

impl GameState {
    /// A fresh character with the class starter deck, before any level is set up
    pub fn new(class: PlayerClass, ruleset: Ruleset, seed: u64) -> Self {
        let catalog = CardCatalog::standard();
        let deck = catalog.starter_deck(class);
        Self::build(class, &deck, catalog, ruleset, seed)
    }

    /// Like `new`, but with a custom deck list (validated against the catalog)
    pub fn with_deck(
        class: PlayerClass,
        deck: &DeckList,
        ruleset: Ruleset,
        seed: u64,
    ) -> Result<Self> {
        let catalog = CardCatalog::standard();
        deck.validate(&catalog)?;
        Ok(Self::build(class, deck, catalog, ruleset, seed))
    }

    fn build(
        class: PlayerClass,
        deck: &DeckList,
        catalog: CardCatalog,
        ruleset: Ruleset,
        seed: u64,
    ) -> Self {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        let zones = PlayerZones::from_deck(deck.expand(), &mut rng);

        let mut player = Player::new(class, ruleset.max_defense);
        player.max_health = ruleset.max_health;
        player.health = ruleset.max_health;
        if class == PlayerClass::Mage {
            player.max_resource = ruleset.mage_mana_per_turn;
            player.resource = ruleset.mage_mana_per_turn;
        }

        let mut backpack = Backpack::new();
        backpack.initialize();

        GameState {
            player,
            zones,
            enemies: Vec::new(),
            attack_queue: Vec::new(),
            current_level: 0,
            previous_level: None,
            phase: TurnPhase::Exploring,
            is_level_transitioning: false,
            outcome: None,
            turn_number: 0,
            levels_cleared: 0,
            backpack,
            quests: QuestManager::new(),
            shop: Shop::scroll_merchant(),
            ruleset,
            rng,
            next_enemy_id: 1,
            last_hurt_cue: None,
            catalog,
            levels: LevelManager::standard(),
            events: Vec::new(),
            logger: GameLogger::new(),
        }
    }

    /// Set up the configured starting level
    pub fn start_campaign(&mut self) -> Result<()> {
        let level = self.ruleset.start_level;
        self.setup_level(level)
    }

    /// Replace all piles with the class starter deck, shuffled into the draw pile
    pub fn create_deck(&mut self, class: PlayerClass) {
        let deck = self.catalog.starter_deck(class);
        self.zones = PlayerZones::from_deck(deck.expand(), &mut self.rng);
    }

    pub fn is_player_turn(&self) -> bool {
        self.phase == TurnPhase::PlayerTurn
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Record an event and log it
    pub fn emit(&mut self, event: GameEvent) {
        #[cfg(feature = "verbose-logging")]
        self.logger.event(&event);
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand all pending events to the front-end
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn declare_outcome(&mut self, outcome: GameOutcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        self.phase = TurnPhase::GameOver;
        self.emit(match outcome {
            GameOutcome::Victory => GameEvent::Victory,
            GameOutcome::Defeat => GameEvent::Defeat,
        });
    }

    /// Draw one card; `None` when both draw and discard piles are empty
    pub fn draw_card(&mut self) -> Option<CardKey> {
        let card = self.zones.draw_card(&mut self.rng)?;
        self.emit(GameEvent::CardDrawn { card: card.clone() });
        Some(card)
    }

    /// Draw until the hand is full or the deck runs dry
    pub fn refill_hand(&mut self) {
        while self.zones.hand.len() < self.ruleset.hand_size {
            if self.draw_card().is_none() {
                break;
            }
        }
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Put a new enemy on the field, unless every slot is taken
    pub fn spawn_enemy(&mut self, kind: EnemyKind, health: u32) -> Option<EnemyId> {
        if self.enemies.len() >= self.ruleset.max_enemy_slots {
            return None;
        }
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id += 1;
        self.enemies.push(Enemy::new(id, kind, health));
        self.emit(GameEvent::EnemySpawned {
            enemy: id,
            kind,
            health,
        });
        Some(id)
    }

    /// Pick a hurt grunt different from the previous one
    pub(crate) fn next_hurt_cue(&mut self) -> SoundCue {
        let choices: Vec<SoundCue> = SoundCue::HURT
            .into_iter()
            .filter(|cue| Some(*cue) != self.last_hurt_cue)
            .collect();
        let cue = choices[self.rng.gen_range(0..choices.len())];
        self.last_hurt_cue = Some(cue);
        cue
    }
}
