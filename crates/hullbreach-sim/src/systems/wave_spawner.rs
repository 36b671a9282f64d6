//! Encounter scheduling. Dequeues spawn entries and instantiates enemies.

use hecs::World;
use tracing::debug;

use hullbreach_core::config::SpawnEntry;
use hullbreach_core::events::GameEvent;

use crate::world_setup;

/// The encounter's ordered spawn list and its cursor.
#[derive(Debug, Clone, Default)]
pub struct EncounterSchedule {
    entries: Vec<SpawnEntry>,
    /// Next entry to dequeue. Only ever increases.
    cursor: usize,
    /// Index of the dequeued entry waiting out its spawn delay.
    pending: Option<usize>,
    pending_counter: f64,
    spawned: u32,
    victory_signalled: bool,
}

impl EncounterSchedule {
    pub fn new(entries: Vec<SpawnEntry>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    pub fn total(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Seconds until the pending entry spawns. 0 with nothing pending.
    pub fn pending_remaining_secs(&self) -> f64 {
        self.pending
            .and_then(|i| self.entries.get(i))
            .map(|entry| (entry.spawn_delay - self.pending_counter).max(0.0))
            .unwrap_or(0.0)
    }

    /// Every entry dequeued and spawned.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.entries.len() && self.pending.is_none()
    }
}

/// Dequeue the next entry when allowed and spawn the pending one when its delay is up.
pub fn run(
    world: &mut World,
    schedule: &mut EncounterSchedule,
    next_enemy_id: &mut u32,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    if schedule.pending.is_none() && schedule.cursor < schedule.entries.len() {
        let entry = &schedule.entries[schedule.cursor];
        // wait_for_clear entries hold until the field is empty.
        let blocked = entry.wait_for_clear && world_setup::active_enemy_count(world) > 0;
        if !blocked {
            debug!(
                "encounter entry {} '{}' queued ({}s)",
                schedule.cursor, entry.enemy.name, entry.spawn_delay
            );
            schedule.pending = Some(schedule.cursor);
            schedule.cursor += 1;
            schedule.pending_counter = 0.0;
        }
    }

    let Some(index) = schedule.pending else {
        return;
    };
    schedule.pending_counter += dt;
    let entry = &schedule.entries[index];
    if schedule.pending_counter >= entry.spawn_delay {
        world_setup::spawn_enemy(world, &entry.enemy, next_enemy_id, events);
        schedule.spawned += 1;
        schedule.pending = None;
        schedule.pending_counter = 0.0;
    }
}

/// True exactly once: the schedule is exhausted and no enemy is left.
pub fn check_victory(world: &World, schedule: &mut EncounterSchedule) -> bool {
    if schedule.victory_signalled || !schedule.is_exhausted() {
        return false;
    }
    if world_setup::active_enemy_count(world) > 0 {
        return false;
    }
    schedule.victory_signalled = true;
    true
}
