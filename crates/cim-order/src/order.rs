//! `PassingOrder` — a candidate crossing sequence and its adjustment state.
//!
//! # Resolution algorithm
//!
//! [`PassingOrder::resolve`] is a sequential fixed point per position,
//! left to right over the order:
//!
//! 1. For position `i`, scan predecessors nearest first (`i-1 … 0`).  The
//!    first predecessor whose route collides with vehicle `i`'s and whose
//!    adjusted distance is within the threshold declares a conflict.
//! 2. On conflict, every vehicle at position ≥ `i` that occupies the same
//!    current edge as vehicle `i` gets `adjustment += 1` — trailing
//!    vehicles on the same approach must slow down together or they would
//!    pile into the one being delayed.
//! 3. Re-check position `i` with the new adjusted distances; advance only
//!    once it is conflict-free.
//!
//! Each round strictly increases at least one adjustment (vehicle `i`'s own,
//! since it shares its edge with itself), pushing its adjusted distance away
//! from the conflicting predecessor until `far_enough` holds — so the loop
//! terminates.  The scan is a deliberate greedy approximation: it resolves
//! one nearest conflict per round rather than minimising the global total.

use cim_core::{EdgeId, RouteId, Snapshot, VehicleId, VehicleState};

use crate::ConflictModel;

// ── OrderEntry ────────────────────────────────────────────────────────────────

/// One vehicle's slot in a candidate crossing sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderEntry {
    pub vehicle: VehicleId,
    pub route: RouteId,
    /// Live lane/edge at the snapshot — the equality key for deciding which
    /// trailing vehicles share an adjustment.
    pub edge: EdgeId,
    pub distance: f64,
}

impl OrderEntry {
    /// Build an entry from a snapshot record.
    pub fn from_state(vehicle: VehicleId, state: &VehicleState) -> Self {
        Self {
            vehicle,
            route: state.route,
            edge: state.edge.clone(),
            distance: state.distance,
        }
    }
}

// ── PassingOrder ──────────────────────────────────────────────────────────────

/// An ordered crossing sequence plus per-vehicle adjustment counts.
///
/// Adjustments start at zero and only ever increase; `total_adjustment` is
/// the sum of every increment applied and equals `Σ adjustment` at all
/// times.
#[derive(Clone, Debug)]
pub struct PassingOrder {
    entries: Vec<OrderEntry>,
    /// Parallel to `entries`; non-decreasing once resolution begins.
    adjustments: Vec<u32>,
    total_adjustment: u64,
}

impl PassingOrder {
    /// Build from an explicit entry sequence, all adjustments zero.
    pub fn new(entries: Vec<OrderEntry>) -> Self {
        let adjustments = vec![0; entries.len()];
        Self { entries, adjustments, total_adjustment: 0 }
    }

    /// Build from a snapshot in capture order (no sorting, no search).
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::new(
            snapshot
                .iter()
                .map(|(v, s)| OrderEntry::from_state(v.clone(), s))
                .collect(),
        )
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in crossing order.
    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    /// Per-entry adjustment counts, parallel to [`entries`][Self::entries].
    pub fn adjustments(&self) -> &[u32] {
        &self.adjustments
    }

    /// Adjustment count for one vehicle, or `None` if it is not in the order.
    pub fn adjustment_of(&self, vehicle: &VehicleId) -> Option<u32> {
        self.entries
            .iter()
            .position(|e| e.vehicle == *vehicle)
            .map(|i| self.adjustments[i])
    }

    /// Sum of all adjustment increments ever applied.
    pub fn total_adjustment(&self) -> u64 {
        self.total_adjustment
    }

    /// Comma-joined vehicle IDs — the order-sensitive consensus ballot key.
    pub fn signature(&self) -> String {
        let ids: Vec<&str> = self.entries.iter().map(|e| e.vehicle.as_str()).collect();
        ids.join(",")
    }

    // ── Resolution ────────────────────────────────────────────────────────

    /// Resolve all conflicts in place, applying the minimal greedy
    /// adjustment increments.  Idempotent: re-resolving an already-resolved
    /// order applies nothing.
    pub fn resolve(&mut self, model: &ConflictModel) {
        for i in 0..self.entries.len() {
            while self.conflict_at(i, model) {
                self.bump_edge_group(i);
            }
        }
    }

    /// Whether the vehicle at position `i` is on a colliding trajectory with
    /// any predecessor, nearest first, under current adjusted distances.
    fn conflict_at(&self, i: usize, model: &ConflictModel) -> bool {
        let dist_i = self.adjusted_distance(i, model);
        for j in (0..i).rev() {
            let dist_j = self.adjusted_distance(j, model);
            if model.requires_adjustment(
                self.entries[i].route,
                dist_i,
                self.entries[j].route,
                dist_j,
            ) {
                return true;
            }
        }
        false
    }

    /// Increment the adjustment of every vehicle at position ≥ `i` whose
    /// current edge matches the edge of the vehicle at `i`.
    fn bump_edge_group(&mut self, i: usize) {
        let edge = self.entries[i].edge.clone();
        for j in i..self.entries.len() {
            if self.entries[j].edge == edge {
                self.adjustments[j] += 1;
                self.total_adjustment += 1;
            }
        }
    }

    /// Effective distance once scheduled delay is accounted for.
    #[inline]
    fn adjusted_distance(&self, i: usize, model: &ConflictModel) -> f64 {
        self.entries[i].distance + model.threshold() * self.adjustments[i] as f64
    }
}
