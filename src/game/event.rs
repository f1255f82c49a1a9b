//! Game events and presentation cues
//!
//! Every state transition records one or more events. A front-end replays
//! them in order: text for the log, sound cues for audio and an advisory
//! delay for paced playback.

use crate::config::PacingConfig;
use crate::core::{CardKey, EnemyId, EnemyKind};
use serde::Serialize;
use std::fmt;

/// Named sound effects and narration clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
pub enum SoundCue {
    ShieldHit,
    Hurt1,
    Hurt2,
    Hurt3,
    NextRound1,
    NextRound2,
    Running,
    SkeletonDeath,
    ExecutionerDeath,
    WolfDeath,
    Howl,
    Fire1,
    Fire2,
    Explosion,
    Molten,
    Inferno,
    Pyroclasm,
    HeatWave,
    Click,
    ForestNarration,
    WarriorForestNarration,
    TownNarration,
    ForestExit,
}

impl SoundCue {
    /// The mage's pain grunts; consecutive hits never repeat the same one
    pub const HURT: [SoundCue; 3] = [SoundCue::Hurt1, SoundCue::Hurt2, SoundCue::Hurt3];

    pub fn id(&self) -> &'static str {
        match self {
            SoundCue::ShieldHit => "shieldHit",
            SoundCue::Hurt1 => "hurt1",
            SoundCue::Hurt2 => "hurt2",
            SoundCue::Hurt3 => "hurt3",
            SoundCue::NextRound1 => "nextRound1",
            SoundCue::NextRound2 => "nextRound2",
            SoundCue::Running => "running",
            SoundCue::SkeletonDeath => "skeledead",
            SoundCue::ExecutionerDeath => "exdeath",
            SoundCue::WolfDeath => "wolfdead",
            SoundCue::Howl => "howl",
            SoundCue::Fire1 => "fire1",
            SoundCue::Fire2 => "fire2",
            SoundCue::Explosion => "explosion",
            SoundCue::Molten => "molten",
            SoundCue::Inferno => "inferno",
            SoundCue::Pyroclasm => "pyo",
            SoundCue::HeatWave => "heatwave",
            SoundCue::Click => "click",
            SoundCue::ForestNarration => "forestnar",
            SoundCue::WarriorForestNarration => "warforest",
            SoundCue::TownNarration => "townnar",
            SoundCue::ForestExit => "forestexit",
        }
    }

    pub fn from_id(id: &str) -> Option<SoundCue> {
        use SoundCue::*;
        [
            ShieldHit,
            Hurt1,
            Hurt2,
            Hurt3,
            NextRound1,
            NextRound2,
            Running,
            SkeletonDeath,
            ExecutionerDeath,
            WolfDeath,
            Howl,
            Fire1,
            Fire2,
            Explosion,
            Molten,
            Inferno,
            Pyroclasm,
            HeatWave,
            Click,
            ForestNarration,
            WarriorForestNarration,
            TownNarration,
            ForestExit,
        ]
        .into_iter()
        .find(|cue| cue.id() == id)
    }

    /// Spell sound for a mage card, if it has one
    pub fn for_card(card: &CardKey) -> Option<SoundCue> {
        match card.as_str() {
            "fireball" => Some(SoundCue::Fire1),
            "blaze_bolt" | "flame_burst" => Some(SoundCue::Fire2),
            "molten_strike" => Some(SoundCue::Molten),
            "meteor_strike" => Some(SoundCue::Explosion),
            "inferno" => Some(SoundCue::Inferno),
            "pyroclasm" => Some(SoundCue::Pyroclasm),
            "heat_wave" => Some(SoundCue::HeatWave),
            _ => None,
        }
    }

    pub fn death_of(kind: EnemyKind) -> Option<SoundCue> {
        kind.death_cue().and_then(SoundCue::from_id)
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Something that happened in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum GameEvent {
    TurnStarted {
        turn: u32,
        resource: u32,
    },
    CardDrawn {
        card: CardKey,
    },
    CardQueued {
        card: CardKey,
        target: EnemyId,
        cost: u32,
    },
    CardUnqueued {
        card: CardKey,
        cost: u32,
    },
    /// Notification shown when a card cannot be paid for
    ResourceShortage {
        resource: &'static str,
        required: u32,
        available: u32,
    },
    CardPlayed {
        card: CardKey,
    },
    AttackResolved {
        card: CardKey,
        target: Option<EnemyId>,
    },
    EnemyDamaged {
        enemy: EnemyId,
        amount: u32,
        remaining: u32,
    },
    EnemyDefeated {
        enemy: EnemyId,
        kind: EnemyKind,
    },
    DefenseGained {
        amount: u32,
        total: u32,
    },
    EnemyTurnStarted,
    /// An enemy swings at the player
    EnemyAttackFrame {
        enemy: EnemyId,
        kind: EnemyKind,
        damage: u32,
    },
    PlayerDamaged {
        absorbed: u32,
        taken: u32,
        health: u32,
    },
    ResourceGained {
        amount: u32,
        total: u32,
    },
    LevelCleared {
        level: u32,
    },
    LevelStarted {
        level: u32,
        title: String,
        background: String,
        music: Option<String>,
    },
    EnemySpawned {
        enemy: EnemyId,
        kind: EnemyKind,
        health: u32,
    },
    QuestAdded {
        id: String,
        title: String,
    },
    QuestCompleted {
        id: String,
    },
    ShopOpened,
    ShopClosed,
    ItemPurchased {
        item: String,
        slot: usize,
    },
    ItemUsed {
        item: String,
        slot: usize,
    },
    Sound {
        cue: SoundCue,
    },
    Victory,
    Defeat,
}

impl GameEvent {
    /// How long a paced front-end should wait after showing this event
    pub fn pacing_delay_ms(&self, pacing: &PacingConfig) -> u64 {
        match self {
            GameEvent::AttackResolved { .. } => pacing.attack_windup_ms,
            GameEvent::EnemyDamaged { .. } => pacing.between_attacks_ms,
            GameEvent::EnemyTurnStarted => pacing.enemy_turn_delay_ms,
            GameEvent::EnemyAttackFrame { kind, .. } => kind.attack_duration_ms(),
            GameEvent::LevelCleared { .. } => pacing.level_exit_ms,
            GameEvent::Sound { cue } if is_narration(*cue) => pacing.narration_ms,
            _ => 0,
        }
    }

    /// Log category for this event
    pub fn category(&self) -> &'static str {
        match self {
            GameEvent::Sound { .. } => "sound",
            GameEvent::LevelCleared { .. }
            | GameEvent::LevelStarted { .. }
            | GameEvent::Victory
            | GameEvent::Defeat => "level",
            GameEvent::QuestAdded { .. }
            | GameEvent::QuestCompleted { .. }
            | GameEvent::ShopOpened
            | GameEvent::ShopClosed
            | GameEvent::ItemPurchased { .. }
            | GameEvent::ItemUsed { .. } => "town",
            _ => "combat",
        }
    }
}

fn is_narration(cue: SoundCue) -> bool {
    matches!(
        cue,
        SoundCue::ForestNarration
            | SoundCue::WarriorForestNarration
            | SoundCue::TownNarration
            | SoundCue::ForestExit
    )
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::TurnStarted { turn, resource } => {
                write!(f, "Turn {turn} begins ({resource} resource)")
            }
            GameEvent::CardDrawn { card } => write!(f, "Drew {card}"),
            GameEvent::CardQueued { card, target, cost } => {
                write!(f, "Queued {card} at enemy {target} (cost {cost})")
            }
            GameEvent::CardUnqueued { card, cost } => {
                write!(f, "Took {card} back out of the queue (+{cost})")
            }
            GameEvent::ResourceShortage {
                resource,
                required,
                available,
            } => write!(f, "Not enough {resource}! Need {required}, have {available}"),
            GameEvent::CardPlayed { card } => write!(f, "Played {card}"),
            GameEvent::AttackResolved { card, target } => match target {
                Some(t) => write!(f, "{card} strikes enemy {t}"),
                None => write!(f, "{card} strikes every enemy"),
            },
            GameEvent::EnemyDamaged {
                enemy,
                amount,
                remaining,
            } => write!(f, "Enemy {enemy} takes {amount} damage ({remaining} left)"),
            GameEvent::EnemyDefeated { enemy, kind } => write!(f, "{kind} {enemy} is defeated"),
            GameEvent::DefenseGained { amount, total } => {
                write!(f, "Defense +{amount} (now {total})")
            }
            GameEvent::EnemyTurnStarted => write!(f, "Enemy turn"),
            GameEvent::EnemyAttackFrame {
                enemy,
                kind,
                damage,
            } => write!(f, "{kind} {enemy} attacks for {damage}"),
            GameEvent::PlayerDamaged {
                absorbed,
                taken,
                health,
            } => write!(
                f,
                "Player blocks {absorbed}, takes {taken} (health {health})"
            ),
            GameEvent::ResourceGained { amount, total } => {
                write!(f, "Resource +{amount} (now {total})")
            }
            GameEvent::LevelCleared { level } => write!(f, "Level {level} cleared"),
            GameEvent::LevelStarted { level, title, .. } => write!(f, "Level {level}: {title}"),
            GameEvent::EnemySpawned {
                enemy,
                kind,
                health,
            } => write!(f, "{kind} {enemy} appears ({health} hp)"),
            GameEvent::QuestAdded { title, .. } => write!(f, "New quest: {title}"),
            GameEvent::QuestCompleted { id } => write!(f, "Quest complete: {id}"),
            GameEvent::ShopOpened => write!(f, "The merchant shows their wares"),
            GameEvent::ShopClosed => write!(f, "Leaving the shop"),
            GameEvent::ItemPurchased { item, slot } => {
                write!(f, "Bought {item} (backpack slot {slot})")
            }
            GameEvent::ItemUsed { item, slot } => write!(f, "Used {item} from slot {slot}"),
            GameEvent::Sound { cue } => write!(f, "[sound: {cue}]"),
            GameEvent::Victory => write!(f, "Victory!"),
            GameEvent::Defeat => write!(f, "You have fallen."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_ids_round_trip() {
        for cue in SoundCue::HURT {
            assert_eq!(SoundCue::from_id(cue.id()), Some(cue));
        }
        assert_eq!(SoundCue::from_id("pyo"), Some(SoundCue::Pyroclasm));
        assert_eq!(SoundCue::from_id("nope"), None);
    }

    #[test]
    fn test_death_cues() {
        assert_eq!(
            SoundCue::death_of(EnemyKind::Executioner),
            Some(SoundCue::ExecutionerDeath)
        );
        assert_eq!(SoundCue::death_of(EnemyKind::FlyingDemon), None);
    }

    #[test]
    fn test_pacing_delays() {
        let pacing = PacingConfig::default();
        let windup = GameEvent::AttackResolved {
            card: CardKey::new("strike"),
            target: None,
        };
        assert_eq!(windup.pacing_delay_ms(&pacing), 800);
        assert_eq!(GameEvent::EnemyTurnStarted.pacing_delay_ms(&pacing), 1000);

        let demon = GameEvent::EnemyAttackFrame {
            enemy: EnemyId::new(1),
            kind: EnemyKind::FlyingDemon,
            damage: 3,
        };
        assert_eq!(demon.pacing_delay_ms(&pacing), 1200);
        assert_eq!(GameEvent::Victory.pacing_delay_ms(&pacing), 0);
    }

    #[test]
    fn test_shortage_text() {
        let event = GameEvent::ResourceShortage {
            resource: "Mana",
            required: 6,
            available: 2,
        };
        assert_eq!(event.to_string(), "Not enough Mana! Need 6, have 2");
    }
}
