//! Quest log

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: QuestStatus,
}

/// All quests the player has picked up, in the order they were added
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestManager {
    quests: Vec<Quest>,
}

impl QuestManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quest; returns false if a quest with this id already exists
    pub fn add_quest(&mut self, id: &str, title: &str, description: &str) -> bool {
        if self.get(id).is_some() {
            return false;
        }
        self.quests.push(Quest {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            status: QuestStatus::Active,
        });
        true
    }

    /// Mark a quest complete; returns true only on the first completion
    pub fn complete_quest(&mut self, id: &str) -> bool {
        match self.quests.iter_mut().find(|q| q.id == id) {
            Some(quest) if quest.status == QuestStatus::Active => {
                quest.status = QuestStatus::Completed;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.get(id)
            .is_some_and(|q| q.status == QuestStatus::Completed)
    }

    pub fn active(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter().filter(|q| q.status == QuestStatus::Active)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Quest> {
        self.quests
            .iter()
            .filter(|q| q.status == QuestStatus::Completed)
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}
