//! Backpack items: potions, scrolls and plain markers

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotionKind {
    Health,
    Mana,
}

/// A single-use restorative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potion {
    pub kind: PotionKind,
    pub amount: u32,
}

impl Potion {
    pub fn health(amount: u32) -> Self {
        Potion {
            kind: PotionKind::Health,
            amount,
        }
    }

    pub fn mana(amount: u32) -> Self {
        Potion {
            kind: PotionKind::Mana,
            amount,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self.kind {
            PotionKind::Health => "Health Potion",
            PotionKind::Mana => "Mana Potion",
        }
    }

    pub fn description(&self) -> String {
        match self.kind {
            PotionKind::Health => format!("Restores {} health points", self.amount),
            PotionKind::Mana => format!("Restores {} mana points", self.amount),
        }
    }
}

/// What reading a scroll does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollEffect {
    /// Blank parchment
    Nothing,
    /// Damage every enemy on the field
    DamageAllEnemies(u32),
    /// Add player defense
    Ward(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scroll {
    /// Flavour tag ("base", "fire", "ice", ...)
    pub kind: String,
    pub effect: ScrollEffect,
}

impl Scroll {
    pub fn base() -> Self {
        Scroll {
            kind: "base".to_string(),
            effect: ScrollEffect::Nothing,
        }
    }

    pub fn fire(damage: u32) -> Self {
        Scroll {
            kind: "fire".to_string(),
            effect: ScrollEffect::DamageAllEnemies(damage),
        }
    }

    pub fn ice(defense: u32) -> Self {
        Scroll {
            kind: "ice".to_string(),
            effect: ScrollEffect::Ward(defense),
        }
    }

    /// "fire" becomes "Fire Scroll"
    pub fn display_name(&self) -> String {
        let mut chars = self.kind.chars();
        match chars.next() {
            Some(first) => format!("{}{} Scroll", first.to_uppercase(), chars.as_str()),
            None => "Scroll".to_string(),
        }
    }

    pub fn description(&self) -> String {
        match self.effect {
            ScrollEffect::Nothing => "A mysterious scroll.".to_string(),
            ScrollEffect::DamageAllEnemies(n) => format!("Scorches every enemy for {n} damage"),
            ScrollEffect::Ward(n) => format!("Wraps you in a {n}-point ward"),
        }
    }
}

/// Anything that can sit in a backpack slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    Scroll(Scroll),
    Potion(Potion),
    /// Quest trinkets and other inert items
    Marker(String),
}

impl Item {
    pub fn is_scroll(&self) -> bool {
        matches!(self, Item::Scroll(_))
    }

    pub fn display_name(&self) -> String {
        match self {
            Item::Scroll(s) => s.display_name(),
            Item::Potion(p) => p.display_name().to_string(),
            Item::Marker(name) => name.clone(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Item request as accepted by `Backpack::add_item`
///
/// Short names match the shop and level scripts: `basescroll`,
/// `healthpotion`, `manapotion`. Anything else becomes a marker item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemSpec {
    BaseScroll,
    HealthPotion,
    ManaPotion,
    Scroll(Scroll),
    Marker(String),
}

impl ItemSpec {
    pub fn is_scroll(&self) -> bool {
        matches!(self, ItemSpec::BaseScroll | ItemSpec::Scroll(_))
    }

    pub fn into_item(self) -> Item {
        match self {
            ItemSpec::BaseScroll => Item::Scroll(Scroll::base()),
            ItemSpec::HealthPotion => Item::Potion(Potion::health(30)),
            ItemSpec::ManaPotion => Item::Potion(Potion::mana(5)),
            ItemSpec::Scroll(scroll) => Item::Scroll(scroll),
            ItemSpec::Marker(name) => Item::Marker(name),
        }
    }
}

impl std::str::FromStr for ItemSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "basescroll" => ItemSpec::BaseScroll,
            "healthpotion" => ItemSpec::HealthPotion,
            "manapotion" => ItemSpec::ManaPotion,
            other => ItemSpec::Marker(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_spec_parsing() {
        assert_eq!("healthpotion".parse::<ItemSpec>().unwrap(), ItemSpec::HealthPotion);
        assert_eq!(
            "old key".parse::<ItemSpec>().unwrap(),
            ItemSpec::Marker("old key".to_string())
        );
        assert!("basescroll".parse::<ItemSpec>().unwrap().is_scroll());
    }

    #[test]
    fn test_potion_amounts() {
        assert_eq!(ItemSpec::HealthPotion.into_item(), Item::Potion(Potion::health(30)));
        assert_eq!(ItemSpec::ManaPotion.into_item(), Item::Potion(Potion::mana(5)));
    }

    #[test]
    fn test_scroll_names() {
        assert_eq!(Scroll::base().display_name(), "Base Scroll");
        assert_eq!(Scroll::fire(10).display_name(), "Fire Scroll");
        assert_eq!(Scroll::base().description(), "A mysterious scroll.");
    }
}
