//! `IntersectionState` — a partial crossing order as a search state.
//!
//! # Action rule
//!
//! From any state, only the *lead* vehicle of each approach edge — the
//! remaining vehicle with the smallest distance on that edge — may be
//! scheduled next.  Anything else would order a trailing vehicle through
//! the zone before the one physically ahead of it on the same lane, which
//! no amount of delay can realise.
//!
//! # Ownership
//!
//! The remaining set and chosen prefix are value-copied on every
//! transition, so no two tree branches ever alias mutable data.  The
//! conflict model is a shared immutable borrow.

use cim_core::{Snapshot, VehicleId};
use cim_order::{ConflictModel, OrderEntry, PassingOrder};
use cim_search::SearchState;

/// A partial crossing-order assignment.
///
/// `remaining` and `prefix` are disjoint and together always hold exactly
/// the snapshot's vehicle set; the state is terminal once `remaining` is
/// empty.
#[derive(Clone)]
pub struct IntersectionState<'a> {
    model: &'a ConflictModel,
    /// Vehicles not yet scheduled, in snapshot capture order.
    remaining: Vec<OrderEntry>,
    /// The crossing order chosen so far.
    prefix: Vec<OrderEntry>,
}

impl<'a> IntersectionState<'a> {
    /// Start a search with every snapshot vehicle unscheduled.
    pub fn from_snapshot(snapshot: &Snapshot, model: &'a ConflictModel) -> Self {
        Self {
            model,
            remaining: snapshot
                .iter()
                .map(|(v, s)| OrderEntry::from_state(v.clone(), s))
                .collect(),
            prefix: Vec::new(),
        }
    }

    /// Number of vehicles not yet scheduled.
    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    /// Consume a terminal state into its complete passing order
    /// (adjustments unresolved, all zero).
    pub fn into_order(self) -> PassingOrder {
        PassingOrder::new(self.prefix)
    }
}

impl SearchState for IntersectionState<'_> {
    type Action = VehicleId;

    /// The lead vehicle of each distinct edge, in first-seen-edge order.
    fn possible_actions(&self) -> Vec<VehicleId> {
        let mut leads: Vec<usize> = Vec::new();
        for (i, entry) in self.remaining.iter().enumerate() {
            match leads
                .iter_mut()
                .find(|lead| self.remaining[**lead].edge == entry.edge)
            {
                Some(lead) => {
                    if entry.distance < self.remaining[*lead].distance {
                        *lead = i;
                    }
                }
                None => leads.push(i),
            }
        }
        leads
            .into_iter()
            .map(|i| self.remaining[i].vehicle.clone())
            .collect()
    }

    fn apply(&self, action: &VehicleId) -> Self {
        let mut next = self.clone();
        match next.remaining.iter().position(|e| e.vehicle == *action) {
            Some(pos) => {
                let entry = next.remaining.remove(pos);
                next.prefix.push(entry);
            }
            None => debug_assert!(false, "action {action} is not an unscheduled vehicle"),
        }
        next
    }

    fn is_terminal(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Negated total adjustment of the resolved prefix — lower delay cost
    /// is a higher reward.
    fn reward(&self) -> f64 {
        let mut order = PassingOrder::new(self.prefix.clone());
        order.resolve(self.model);
        -(order.total_adjustment() as f64)
    }
}
