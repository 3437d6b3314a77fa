//! Optimistic placement bookkeeping.
//!
//! A placement or drag commit moves the pin locally right away and hands the
//! host a sequence number. The host persists the move and reports back with
//! that number. Only the newest commit for a pin may settle it; responses to
//! older commits are superseded and ignored.
//!
//! Each pending entry remembers the last confirmed coordinate so a failed
//! write can roll the pin back. A superseding commit keeps the rollback
//! coordinate of the entry it replaces.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::HashMap;

use crate::camera::Point;
use crate::doc::{Coords, PinId};

/// An unconfirmed coordinate write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pending {
    /// Sequence number handed to the host for this write.
    pub seq: u64,
    /// Coordinate applied optimistically.
    pub candidate: Point,
    /// Last confirmed raw coordinates, restored verbatim on failure.
    pub rollback: Coords,
}

/// Outcome of matching a host response against the pending table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// The response settles the newest write for this pin.
    Current(Pending),
    /// A newer write superseded this one, or nothing is pending.
    Superseded,
}

/// Pending writes keyed by pin.
#[derive(Debug, Default)]
pub struct PendingPlacements {
    next_seq: u64,
    pending: HashMap<PinId, Pending>,
}

impl PendingPlacements {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new optimistic write and return its sequence number.
    pub fn begin(&mut self, id: &PinId, candidate: Point, confirmed: Coords) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        let rollback = self.pending.get(id).map_or(confirmed, |p| p.rollback);
        self.pending.insert(id.clone(), Pending { seq, candidate, rollback });
        seq
    }

    /// Match a host response. A current match removes the entry.
    pub fn resolve(&mut self, id: &PinId, seq: u64) -> Resolution {
        match self.pending.get(id) {
            Some(p) if p.seq == seq => self.pending.remove(id).map_or(Resolution::Superseded, Resolution::Current),
            _ => Resolution::Superseded,
        }
    }

    /// The pending entry for `id`, if a write is in flight.
    #[must_use]
    pub fn get(&self, id: &PinId) -> Option<&Pending> {
        self.pending.get(id)
    }

    /// Adopt a freshly loaded coordinate as the rollback target for `id`.
    pub fn rebase(&mut self, id: &PinId, confirmed: Coords) {
        if let Some(p) = self.pending.get_mut(id) {
            p.rollback = confirmed;
        }
    }

    /// Drop entries for pins that no longer exist.
    pub fn retain_known(&mut self, mut known: impl FnMut(&PinId) -> bool) {
        self.pending.retain(|id, _| known(id));
    }

    /// All in-flight writes.
    pub fn iter(&self) -> impl Iterator<Item = (&PinId, &Pending)> {
        self.pending.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
