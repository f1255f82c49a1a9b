//! Town and inn hot-zones
//!
//! Non-combat screens are navigated by clicking labelled rectangles. Rects
//! are in percent of the playfield so they survive any window size.

use crate::game::event::{GameEvent, SoundCue};
use crate::game::phase::GameOutcome;
use crate::game::state::GameState;
use crate::game::VerbosityLevel;
use crate::{GameError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ZoneRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        ZoneRect {
            left,
            top,
            width,
            height,
        }
    }

    /// Half-open on the right and bottom edges
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HotZoneAction {
    GoToLevel(u32),
    /// Read a note; completes the named quest
    ReadNote(&'static str),
    OpenShop,
    /// Leave town for good
    FinishCampaign,
    /// Decorative, does nothing
    Inert,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotZone {
    pub label: &'static str,
    pub rect: ZoneRect,
    pub action: HotZoneAction,
}

impl HotZone {
    pub const fn new(label: &'static str, rect: ZoneRect, action: HotZoneAction) -> Self {
        HotZone {
            label,
            rect,
            action,
        }
    }
}

/// Index of the topmost zone under a point (later zones draw on top)
pub fn hit_test(zones: &[HotZone], x: f32, y: f32) -> Option<usize> {
    zones.iter().rposition(|z| z.rect.contains(x, y))
}

impl GameState {
    /// Hot-zones of the current level
    pub fn hot_zones(&self) -> &[HotZone] {
        self.levels
            .get(self.current_level)
            .map(|def| def.hot_zones.as_slice())
            .unwrap_or(&[])
    }

    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        hit_test(self.hot_zones(), x, y)
    }

    /// Click a hot-zone on the current screen
    pub fn activate_hot_zone(&mut self, index: usize) -> Result<HotZoneAction> {
        if self.outcome.is_some() {
            return Err(GameError::InvalidAction("the game is over".into()));
        }
        let zone = self
            .hot_zones()
            .get(index)
            .cloned()
            .ok_or_else(|| GameError::InvalidAction(format!("no hot-zone {}", index)))?;

        self.logger.log_fmt(
            VerbosityLevel::Verbose,
            Some("town"),
            format_args!("Clicked '{}'", zone.label),
        );

        match &zone.action {
            HotZoneAction::GoToLevel(level) => {
                self.shop.is_open = false;
                self.go_to_level(*level)?;
            }
            HotZoneAction::ReadNote(quest_id) => {
                self.emit(GameEvent::Sound {
                    cue: SoundCue::Click,
                });
                if self.quests.complete_quest(quest_id) {
                    self.emit(GameEvent::QuestCompleted {
                        id: quest_id.to_string(),
                    });
                }
            }
            HotZoneAction::OpenShop => {
                if !self.shop.is_open {
                    self.shop.is_open = true;
                    self.emit(GameEvent::ShopOpened);
                }
            }
            HotZoneAction::FinishCampaign => {
                self.declare_outcome(GameOutcome::Victory);
            }
            HotZoneAction::Inert => {}
        }
        Ok(zone.action)
    }
}
