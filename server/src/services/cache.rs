//! Pin list cache.
//!
//! DESIGN
//! ======
//! A single time-bounded slot holding the last pin list read from Postgres.
//! Reads within the TTL are served from memory; every successful placement
//! invalidates the slot so the next read sees the write.
//!
//! Invalidation also bumps a generation counter. A loader captures the
//! generation before querying and stores only if it is unchanged, so a read
//! that raced a write cannot repopulate the slot with pre-write rows.
//!
//! TRADE-OFFS
//! ==========
//! A `std::sync::Mutex` is enough: the critical section is a clone of an
//! `Arc` and never spans an await point.

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::pins::PinRecord;

struct Entry {
    pins: Arc<Vec<PinRecord>>,
    stored_at: Instant,
}

#[derive(Default)]
struct Slot {
    entry: Option<Entry>,
    generation: u64,
}

#[derive(Clone)]
pub struct PinCache {
    slot: Arc<Mutex<Slot>>,
    ttl: Duration,
}

impl PinCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { slot: Arc::new(Mutex::new(Slot::default())), ttl }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached pins, if stored less than one TTL ago.
    #[must_use]
    pub fn get(&self) -> Option<Arc<Vec<PinRecord>>> {
        self.get_at(Instant::now())
    }

    fn get_at(&self, now: Instant) -> Option<Arc<Vec<PinRecord>>> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.entry
            .as_ref()
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| Arc::clone(&entry.pins))
    }

    /// Current invalidation generation. Capture before loading.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).generation
    }

    /// Cache `pins` if no invalidation happened since `generation` was read.
    /// The list is returned either way.
    pub fn store(&self, pins: Vec<PinRecord>, generation: u64) -> Arc<Vec<PinRecord>> {
        self.store_at(pins, generation, Instant::now())
    }

    fn store_at(&self, pins: Vec<PinRecord>, generation: u64, now: Instant) -> Arc<Vec<PinRecord>> {
        let pins = Arc::new(pins);
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.generation == generation {
            slot.entry = Some(Entry { pins: Arc::clone(&pins), stored_at: now });
        }
        pins
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.entry = None;
        slot.generation = slot.generation.wrapping_add(1);
    }
}
