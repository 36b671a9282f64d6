//! Ship-wide item store shared by hull work, weapon stations and converters.

use std::collections::BTreeMap;

use hullbreach_core::enums::Item;
use hullbreach_core::events::GameEvent;

#[derive(Debug, Clone, Default)]
pub struct Cargo {
    items: BTreeMap<Item, u32>,
}

impl Cargo {
    /// Seed the hold without emitting notifications.
    pub fn with_items(items: &[Item]) -> Self {
        let mut cargo = Self::default();
        for &item in items {
            *cargo.items.entry(item).or_insert(0) += 1;
        }
        cargo
    }

    pub fn count(&self, item: Item) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Items with a non-zero count, in `Item` order.
    pub fn iter(&self) -> impl Iterator<Item = (Item, u32)> + '_ {
        self.items
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&item, &count)| (item, count))
    }

    pub fn add(&mut self, item: Item, events: &mut Vec<GameEvent>) {
        let count = self.items.entry(item).or_insert(0);
        *count += 1;
        events.push(GameEvent::CargoChanged {
            item,
            count: *count,
        });
    }

    /// Remove one `item`. Returns false if none is held.
    pub fn take(&mut self, item: Item, events: &mut Vec<GameEvent>) -> bool {
        match self.items.get_mut(&item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                events.push(GameEvent::CargoChanged {
                    item,
                    count: *count,
                });
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hullbreach_core::enums::AmmoType;

    #[test]
    fn test_take_and_add() {
        let mut cargo = Cargo::with_items(&[Item::Scrap, Item::Scrap]);
        let mut events = Vec::new();
        assert!(cargo.take(Item::Scrap, &mut events));
        assert!(!cargo.take(Item::HullPlate, &mut events));
        cargo.add(Item::Ammo(AmmoType::Laser), &mut events);
        assert_eq!(cargo.count(Item::Scrap), 1);
        assert_eq!(
            events,
            vec![
                GameEvent::CargoChanged {
                    item: Item::Scrap,
                    count: 1
                },
                GameEvent::CargoChanged {
                    item: Item::Ammo(AmmoType::Laser),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_iter_skips_empty() {
        let mut cargo = Cargo::with_items(&[Item::HullPlate]);
        let mut events = Vec::new();
        cargo.take(Item::HullPlate, &mut events);
        assert_eq!(cargo.iter().count(), 0);
    }
}
