//! Scroll merchant
//!
//! There is no currency; every offer has a finite stock and goes straight
//! into the first backpack slot that accepts it.

use crate::inventory::{Backpack, ItemSpec, Scroll};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopOffer {
    pub item: ItemSpec,
    pub stock: u32,
}

impl ShopOffer {
    pub fn label(&self) -> String {
        self.item.clone().into_item().display_name()
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shop {
    offers: Vec<ShopOffer>,
    pub is_open: bool,
}

impl Shop {
    pub fn new(offers: Vec<ShopOffer>) -> Self {
        Shop {
            offers,
            is_open: false,
        }
    }

    /// The town's scroll merchant
    pub fn scroll_merchant() -> Self {
        Shop::new(vec![
            ShopOffer {
                item: ItemSpec::Scroll(Scroll::fire(20)),
                stock: 2,
            },
            ShopOffer {
                item: ItemSpec::Scroll(Scroll::ice(15)),
                stock: 2,
            },
            ShopOffer {
                item: ItemSpec::HealthPotion,
                stock: 3,
            },
            ShopOffer {
                item: ItemSpec::ManaPotion,
                stock: 3,
            },
        ])
    }

    pub fn offers(&self) -> &[ShopOffer] {
        &self.offers
    }

    /// Take one unit of an offer and put it in the backpack
    ///
    /// Stock is only decremented once the item has a slot.
    pub fn buy(&mut self, index: usize, backpack: &mut Backpack) -> Result<usize> {
        let offer = self
            .offers
            .get_mut(index)
            .ok_or_else(|| GameError::InvalidAction(format!("no shop offer {}", index)))?;
        if !offer.in_stock() {
            return Err(GameError::InvalidAction(format!("{} is sold out", offer.label())));
        }
        let slot = backpack.add_to_free_slot(offer.item.clone())?;
        offer.stock -= 1;
        Ok(slot)
    }
}
