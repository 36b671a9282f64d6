//! Exterior hull segments.

use tracing::debug;

use hullbreach_core::config::HullSegmentConfig;
use hullbreach_core::enums::{HullState, Item};
use hullbreach_core::events::GameEvent;
use hullbreach_core::types::SegmentId;

#[derive(Debug, Clone)]
pub struct HullSegment {
    id: SegmentId,
    state: HullState,
    scrap_yield: Item,
    repair_item: Item,
}

impl HullSegment {
    pub fn new(id: SegmentId, config: &HullSegmentConfig) -> Self {
        Self {
            id,
            state: config.initial_state,
            scrap_yield: config.scrap_yield,
            repair_item: config.repair_item,
        }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn state(&self) -> HullState {
        self.state
    }

    pub fn scrap_yield(&self) -> Item {
        self.scrap_yield
    }

    pub fn repair_item(&self) -> Item {
        self.repair_item
    }

    pub fn can_be_damaged(&self) -> bool {
        self.state != HullState::Breached
    }

    pub fn can_be_scrapped(&self) -> bool {
        self.state == HullState::Armored
    }

    pub fn can_be_repaired(&self) -> bool {
        self.state != HullState::Armored
    }

    pub fn is_breached(&self) -> bool {
        self.state == HullState::Breached
    }

    /// Armored → Damaged → Breached. No-op once breached.
    pub fn damage(&mut self, events: &mut Vec<GameEvent>) -> bool {
        let next = match self.state {
            HullState::Armored => HullState::Damaged,
            HullState::Damaged => HullState::Breached,
            HullState::Breached => return false,
        };
        self.state = next;
        events.push(GameEvent::HullDamaged {
            segment: self.id,
            state: next,
        });
        if next == HullState::Breached {
            debug!("hull segment {} breached", self.id.0);
            events.push(GameEvent::HullBreached { segment: self.id });
        }
        true
    }

    /// Breached → Damaged → Armored. No-op when armored.
    pub fn repair(&mut self, events: &mut Vec<GameEvent>) -> bool {
        let next = match self.state {
            HullState::Breached => HullState::Damaged,
            HullState::Damaged => HullState::Armored,
            HullState::Armored => return false,
        };
        let was_breached = self.state == HullState::Breached;
        self.state = next;
        events.push(GameEvent::HullRepaired {
            segment: self.id,
            state: next,
        });
        if was_breached {
            debug!("hull segment {} breach contained", self.id.0);
            events.push(GameEvent::BreachContained { segment: self.id });
        }
        true
    }
}
