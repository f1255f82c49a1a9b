//! Level table and level transitions
//!
//! Levels 1-7 are the graveyard and forest fights. From level 8 on the
//! player reaches town: story screens, the inn, the town square and the
//! scroll merchant, with one more fight in the inn room at night.

use crate::core::{EnemyKind, PlayerClass};
use crate::game::event::{GameEvent, SoundCue};
use crate::game::phase::{GameOutcome, TurnPhase};
use crate::game::state::GameState;
use crate::game::town::{HotZone, HotZoneAction, ZoneRect};
use crate::{GameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    Combat,
    /// A story screen with a single way forward
    Narrative,
    Town,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub health: u32,
}

impl EnemySpawn {
    pub const fn new(kind: EnemyKind, health: u32) -> Self {
        EnemySpawn { kind, health }
    }
}

/// Narration clip played on entering a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Narration {
    pub warrior: SoundCue,
    pub mage: SoundCue,
    /// Stay quiet when arriving from this level
    pub skip_if_from: Option<u32>,
}

impl Narration {
    const fn same(cue: SoundCue) -> Self {
        Narration {
            warrior: cue,
            mage: cue,
            skip_if_from: None,
        }
    }

    pub fn cue_for(&self, class: PlayerClass, previous_level: Option<u32>) -> Option<SoundCue> {
        if self.skip_if_from.is_some() && self.skip_if_from == previous_level {
            return None;
        }
        Some(match class {
            PlayerClass::Warrior => self.warrior,
            PlayerClass::Mage => self.mage,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub number: u32,
    pub title: &'static str,
    pub kind: LevelKind,
    pub background: &'static str,
    /// Music to switch to; `None` keeps whatever is playing
    pub music: Option<&'static str>,
    pub narration: Option<Narration>,
    pub spawns: Vec<EnemySpawn>,
    pub hot_zones: Vec<HotZone>,
    pub quest: Option<QuestTemplate>,
    /// Where a cleared combat level leads; `None` ends the campaign
    pub next: Option<u32>,
}

impl LevelDefinition {
    fn new(number: u32, title: &'static str, kind: LevelKind, background: &'static str) -> Self {
        LevelDefinition {
            number,
            title,
            kind,
            background,
            music: None,
            narration: None,
            spawns: Vec::new(),
            hot_zones: Vec::new(),
            quest: None,
            next: None,
        }
    }

    fn music(mut self, track: &'static str) -> Self {
        self.music = Some(track);
        self
    }

    fn narration(mut self, narration: Narration) -> Self {
        self.narration = Some(narration);
        self
    }

    fn spawn(mut self, kind: EnemyKind, health: u32) -> Self {
        self.spawns.push(EnemySpawn::new(kind, health));
        self
    }

    fn zone(mut self, label: &'static str, rect: ZoneRect, action: HotZoneAction) -> Self {
        self.hot_zones.push(HotZone::new(label, rect, action));
        self
    }

    fn quest(mut self, quest: QuestTemplate) -> Self {
        self.quest = Some(quest);
        self
    }

    fn then(mut self, next: u32) -> Self {
        self.next = Some(next);
        self
    }
}

const NIGHT_NOTE: QuestTemplate = QuestTemplate {
    id: "shop_note_9",
    title: "Mysterious Shop Note",
    description: "A strange note has appeared near the shop. Perhaps it contains important information?",
};

const DAY_NOTE: QuestTemplate = QuestTemplate {
    id: "shop_note_16",
    title: "Shop Note in Town",
    description: "There seems to be a note near the shop in town. It might be worth checking out.",
};

/// The full campaign, indexed by level number
#[derive(Debug, Clone)]
pub struct LevelManager {
    levels: Vec<LevelDefinition>,
}

impl Default for LevelManager {
    fn default() -> Self {
        Self::standard()
    }
}

impl LevelManager {
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        LevelManager { levels }
    }

    pub fn standard() -> Self {
        use EnemyKind::*;
        use HotZoneAction::*;
        use LevelKind::*;

        let continue_rect = ZoneRect::new(40.0, 85.0, 20.0, 10.0);

        let levels = vec![
            LevelDefinition::new(1, "The Graveyard", Combat, "gy")
                .music("level1")
                .spawn(Executioner, 100)
                .then(2),
            LevelDefinition::new(2, "Deeper Graves", Combat, "graveyard2")
                .spawn(Executioner, 100)
                .spawn(Executioner, 100)
                .then(3),
            LevelDefinition::new(3, "The Ossuary Gate", Combat, "graveyard3")
                .spawn(Executioner, 100)
                .spawn(Skeleton, 80)
                .spawn(Skeleton, 80)
                .then(4),
            LevelDefinition::new(4, "Forest Edge", Combat, "forest")
                .spawn(Skeleton, 80)
                .spawn(FlyingDemon, 60)
                .then(5),
            LevelDefinition::new(5, "The Dark Wood", Combat, "forest2")
                .music("forestmusic")
                .narration(Narration {
                    warrior: SoundCue::WarriorForestNarration,
                    mage: SoundCue::ForestNarration,
                    skip_if_from: None,
                })
                .spawn(FlyingDemon, 60)
                .spawn(FlyingDemon, 60)
                .spawn(Skeleton, 80)
                .then(6),
            LevelDefinition::new(6, "Howling Clearing", Combat, "forest3")
                .spawn(Werewolf, 120)
                .then(7),
            LevelDefinition::new(7, "The Pack", Combat, "forest5")
                .spawn(Werewolf, 120)
                .spawn(Werewolf, 120)
                .spawn(Werewolf, 120)
                .then(8),
            LevelDefinition::new(8, "Leaving the Forest", Narrative, "ftown")
                .narration(Narration::same(SoundCue::ForestExit))
                .zone("Enter Town", continue_rect, GoToLevel(9))
                .then(9),
            LevelDefinition::new(9, "Town at Night", Town, "level9")
                .music("nighttown")
                .narration(Narration {
                    skip_if_from: Some(10),
                    ..Narration::same(SoundCue::TownNarration)
                })
                .quest(NIGHT_NOTE)
                .zone("Inn", ZoneRect::new(20.0, 55.0, 10.0, 25.0), GoToLevel(10))
                .zone("Shop Note", ZoneRect::new(71.0, 77.0, 4.0, 6.0), ReadNote(NIGHT_NOTE.id)),
            LevelDefinition::new(10, "The Inn", Town, "innnight")
                .zone("Rent a Room", ZoneRect::new(45.0, 40.0, 15.0, 20.0), GoToLevel(11))
                .zone("Leave the Inn", ZoneRect::new(5.0, 85.0, 20.0, 10.0), GoToLevel(9)),
            LevelDefinition::new(11, "The Innkeeper", Narrative, "innkeeper")
                .zone("Continue", continue_rect, GoToLevel(12))
                .then(12),
            LevelDefinition::new(12, "Intruders in the Night", Combat, "innroom")
                .spawn(Skeleton, 80)
                .spawn(Skeleton, 80)
                .then(13),
            LevelDefinition::new(13, "Morning", Narrative, "roomday")
                .zone("Go Downstairs", continue_rect, GoToLevel(14))
                .then(14),
            LevelDefinition::new(14, "The Innkeeper, by Day", Town, "innkeeper2")
                .zone("Leave the Inn", ZoneRect::new(5.0, 85.0, 20.0, 10.0), GoToLevel(15)),
            LevelDefinition::new(15, "Outside the Inn", Town, "innday")
                .zone("Back to Town", ZoneRect::new(60.0, 65.0, 25.0, 20.0), GoToLevel(16))
                .zone("Inn", ZoneRect::new(35.0, 65.0, 5.0, 20.0), GoToLevel(14)),
            LevelDefinition::new(16, "Town Square", Town, "townday")
                .music("towntheme")
                .quest(DAY_NOTE)
                .zone("2", ZoneRect::new(40.0, 50.0, 6.0, 18.0), GoToLevel(18))
                .zone("1", ZoneRect::new(20.0, 50.0, 6.0, 18.0), GoToLevel(17))
                .zone("3", ZoneRect::new(60.0, 50.0, 6.0, 18.0), Inert)
                .zone("Shop Note", ZoneRect::new(68.0, 80.0, 4.0, 6.0), ReadNote(DAY_NOTE.id))
                .zone("Back to Inn", ZoneRect::new(5.0, 85.0, 20.0, 10.0), GoToLevel(15)),
            LevelDefinition::new(17, "The Scroll Merchant", Town, "pmerch")
                .zone("Browse Scrolls", ZoneRect::new(40.0, 40.0, 20.0, 20.0), OpenShop)
                .zone("Leave", ZoneRect::new(5.0, 85.0, 20.0, 10.0), GoToLevel(16)),
            LevelDefinition::new(18, "The Town Gate", Town, "gate")
                .zone("Through the Gate", ZoneRect::new(40.0, 30.0, 20.0, 40.0), GoToLevel(19))
                .zone("Back", ZoneRect::new(5.0, 85.0, 20.0, 10.0), GoToLevel(16)),
            LevelDefinition::new(19, "The Road Beyond", Town, "road")
                .zone("Set Out", ZoneRect::new(70.0, 40.0, 20.0, 20.0), FinishCampaign)
                .zone("Back to Town", ZoneRect::new(5.0, 85.0, 20.0, 10.0), GoToLevel(15)),
        ];

        LevelManager::new(levels)
    }

    pub fn get(&self, level: u32) -> Result<&LevelDefinition> {
        self.levels
            .iter()
            .find(|def| def.number == level)
            .ok_or(GameError::InvalidLevel(level))
    }

    pub fn contains(&self, level: u32) -> bool {
        self.levels.iter().any(|def| def.number == level)
    }

    pub fn max_level(&self) -> u32 {
        self.levels.iter().map(|def| def.number).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl GameState {
    pub fn current_level_kind(&self) -> Option<LevelKind> {
        self.levels.get(self.current_level).ok().map(|def| def.kind)
    }

    /// Lay out a level: enemies, cues, quest and the opening hand
    pub fn setup_level(&mut self, level: u32) -> Result<()> {
        let def = self.levels.get(level)?.clone();

        self.enemies.clear();
        self.attack_queue.clear();
        self.player.reserved = 0;
        self.current_level = level;

        self.emit(GameEvent::LevelStarted {
            level,
            title: def.title.to_string(),
            background: def.background.to_string(),
            music: def.music.map(str::to_string),
        });
        if let Some(cue) = def
            .narration
            .and_then(|n| n.cue_for(self.player.class, self.previous_level))
        {
            self.emit(GameEvent::Sound { cue });
        }

        for spawn in def.spawns.iter().take(self.ruleset.max_enemy_slots) {
            self.spawn_enemy(spawn.kind, spawn.health);
        }
        if def.spawns.iter().any(|s| s.kind == EnemyKind::Werewolf) {
            self.emit(GameEvent::Sound {
                cue: SoundCue::Howl,
            });
        }

        if let Some(quest) = def.quest {
            if self.quests.add_quest(quest.id, quest.title, quest.description) {
                self.emit(GameEvent::QuestAdded {
                    id: quest.id.to_string(),
                    title: quest.title.to_string(),
                });
            }
        }

        match def.kind {
            LevelKind::Combat => self.start_player_turn(),
            LevelKind::Narrative | LevelKind::Town => {
                self.phase = TurnPhase::Exploring;
                self.refill_hand();
            }
        }
        Ok(())
    }

    /// Start the level transition once the field of a combat level is clear
    ///
    /// Returns true only on the call that actually starts it.
    pub fn check_level_completion(&mut self) -> bool {
        if self.current_level_kind() != Some(LevelKind::Combat)
            || !self.enemies.is_empty()
            || self.is_level_transitioning
            || self.outcome.is_some()
        {
            return false;
        }
        self.is_level_transitioning = true;
        self.levels_cleared += 1;
        self.emit(GameEvent::LevelCleared {
            level: self.current_level,
        });
        // the mage runs off the right edge before the next level loads
        if self.player.class == PlayerClass::Mage {
            self.emit(GameEvent::Sound {
                cue: SoundCue::Running,
            });
        }
        true
    }

    /// Move on from a cleared level
    pub fn finish_level_transition(&mut self) -> Result<()> {
        if !self.is_level_transitioning {
            return Err(GameError::InvalidAction(
                "no level transition in progress".into(),
            ));
        }
        let next = self.levels.get(self.current_level)?.next;

        match self.current_level {
            1 => self.emit(GameEvent::Sound {
                cue: SoundCue::NextRound1,
            }),
            2 => self.emit(GameEvent::Sound {
                cue: SoundCue::NextRound2,
            }),
            _ => {}
        }

        match next {
            Some(level) => {
                self.previous_level = Some(self.current_level);
                self.setup_level(level)?;
            }
            None => self.declare_outcome(GameOutcome::Victory),
        }
        self.is_level_transitioning = false;
        Ok(())
    }

    /// Leave the current level for another one (town doors, debug jumps)
    pub fn go_to_level(&mut self, level: u32) -> Result<()> {
        if !self.levels.contains(level) {
            return Err(GameError::InvalidLevel(level));
        }
        self.previous_level = Some(self.current_level);
        self.is_level_transitioning = false;
        self.setup_level(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Ruleset;

    #[test]
    fn test_standard_table() {
        let levels = LevelManager::standard();
        assert_eq!(levels.len(), 19);
        assert_eq!(levels.max_level(), 19);
        assert!(levels.get(20).is_err());

        let first = levels.get(1).unwrap();
        assert_eq!(first.kind, LevelKind::Combat);
        assert_eq!(first.spawns, vec![EnemySpawn::new(EnemyKind::Executioner, 100)]);

        let third = levels.get(3).unwrap();
        assert_eq!(third.spawns.len(), 3);
        assert_eq!(third.spawns[1], EnemySpawn::new(EnemyKind::Skeleton, 80));

        assert_eq!(levels.get(7).unwrap().spawns.len(), 3);
    }

    #[test]
    fn test_every_destination_exists() {
        let levels = LevelManager::standard();
        for n in 1..=levels.max_level() {
            let def = levels.get(n).unwrap();
            if let Some(next) = def.next {
                assert!(levels.contains(next), "level {} leads to missing {}", n, next);
            }
            for zone in &def.hot_zones {
                if let HotZoneAction::GoToLevel(target) = zone.action {
                    assert!(levels.contains(target), "zone '{}' on {} is dangling", zone.label, n);
                }
            }
        }
    }

    #[test]
    fn test_town_graph() {
        let levels = LevelManager::standard();
        let targets = |n: u32| -> Vec<HotZoneAction> {
            levels
                .get(n)
                .unwrap()
                .hot_zones
                .iter()
                .map(|z| z.action.clone())
                .collect()
        };

        let fifteen = targets(15);
        assert!(fifteen.contains(&HotZoneAction::GoToLevel(14)));
        assert!(fifteen.contains(&HotZoneAction::GoToLevel(16)));

        let sixteen = targets(16);
        assert!(sixteen.contains(&HotZoneAction::GoToLevel(17)));
        assert!(sixteen.contains(&HotZoneAction::GoToLevel(18)));
        assert!(sixteen.contains(&HotZoneAction::Inert));
        assert!(sixteen.contains(&HotZoneAction::GoToLevel(15)));

        assert!(targets(19).contains(&HotZoneAction::GoToLevel(15)));
    }

    #[test]
    fn test_town_levels_never_complete() {
        let mut game = GameState::new(PlayerClass::Warrior, Ruleset::default(), 2);
        game.start_campaign().unwrap();
        game.jump_to_level(9).unwrap();
        assert!(game.enemies.is_empty());

        assert!(!game.check_level_completion());
        assert!(!game.is_level_transitioning);
        assert_eq!(game.levels_cleared, 0);
    }

    #[test]
    fn test_mage_runs_off_a_cleared_level() {
        for (class, expected) in [(PlayerClass::Mage, 1), (PlayerClass::Warrior, 0)] {
            let mut game = GameState::new(class, Ruleset::default(), 6);
            game.start_campaign().unwrap();
            game.enemies.clear();
            game.drain_events();

            assert!(game.check_level_completion());
            let running = game
                .drain_events()
                .into_iter()
                .filter(|e| matches!(e, GameEvent::Sound { cue: SoundCue::Running }))
                .count();
            assert_eq!(running, expected, "{:?}", class);
        }
    }

    #[test]
    fn test_narration_rules() {
        let levels = LevelManager::standard();
        let forest = levels.get(5).unwrap().narration.unwrap();
        assert_eq!(
            forest.cue_for(PlayerClass::Mage, Some(4)),
            Some(SoundCue::ForestNarration)
        );
        assert_eq!(
            forest.cue_for(PlayerClass::Warrior, Some(4)),
            Some(SoundCue::WarriorForestNarration)
        );

        let town = levels.get(9).unwrap().narration.unwrap();
        assert_eq!(town.cue_for(PlayerClass::Mage, Some(8)), Some(SoundCue::TownNarration));
        assert_eq!(town.cue_for(PlayerClass::Mage, Some(10)), None);
    }
}
