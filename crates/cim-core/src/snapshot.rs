//! The planning snapshot: per-vehicle state captured once per cycle.
//!
//! # Capture model
//!
//! The external layer observes every approaching vehicle at a fixed instant
//! and hands the planner one `Snapshot`.  The snapshot is immutable after
//! capture: the planner never re-validates vehicle existence or refreshes
//! positions — a vehicle present in the snapshot is crossing-eligible,
//! full stop.
//!
//! Entries preserve capture order.  That order is the deterministic
//! tie-break for everything downstream (stable FCFS sorting, action
//! enumeration during search), so two planners fed the same snapshot agree
//! bit-for-bit.

use crate::{EdgeId, RouteId, VehicleId};

// ── VehicleState ──────────────────────────────────────────────────────────────

/// One vehicle's observed state at the planning snapshot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleState {
    /// Planned path — the key into the colliding-route-pair set.
    pub route: RouteId,
    /// Current lane/edge the vehicle occupies right now.
    pub edge: EdgeId,
    /// Distance to the conflict zone, metres, ≥ 0.
    pub distance: f64,
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// All vehicles observed at one planning instant, in capture order.
///
/// Behaves as a map keyed by `VehicleId` but iterates in insertion order.
/// Snapshots are small (tens of vehicles), so lookups are linear scans.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    entries: Vec<(VehicleId, VehicleState)>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one vehicle.  A duplicate `VehicleId` replaces the earlier
    /// entry in place (the feed re-reported the same vehicle).
    pub fn insert(&mut self, vehicle: VehicleId, state: VehicleState) {
        match self.entries.iter_mut().find(|(v, _)| *v == vehicle) {
            Some((_, s)) => *s = state,
            None => self.entries.push((vehicle, state)),
        }
    }

    /// Look up a vehicle's state.
    pub fn get(&self, vehicle: &VehicleId) -> Option<&VehicleState> {
        self.entries
            .iter()
            .find(|(v, _)| v == vehicle)
            .map(|(_, s)| s)
    }

    /// Iterate entries in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&VehicleId, &VehicleState)> {
        self.entries.iter().map(|(v, s)| (v, s))
    }

    /// All vehicle IDs in capture order.
    pub fn vehicle_ids(&self) -> impl Iterator<Item = &VehicleId> {
        self.entries.iter().map(|(v, _)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(VehicleId, VehicleState)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (VehicleId, VehicleState)>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for (vehicle, state) in iter {
            snapshot.insert(vehicle, state);
        }
        snapshot
    }
}
