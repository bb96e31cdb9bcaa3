//! `cim-plan` — passing-order generation and consensus.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`state`]     | `IntersectionState` — the crossing-order search space    |
//! | [`generator`] | `OrderStrategy`, `OrderGenerator`                        |
//! | [`consensus`] | `ConsensusAggregator`, `ConsensusOutcome`, multi-agent   |
//! | [`loader`]    | `load_snapshot_csv`, `load_snapshot_reader`              |
//! | [`error`]     | `PlanError`, `PlanResult<T>`                             |
//!
//! # Planning cycle (summary)
//!
//! One call to [`plan_snapshot`] is one planning cycle: the external layer
//! captures a [`Snapshot`][cim_core::Snapshot], the generator produces a
//! candidate order (distance-sorted, or searched), the evaluator resolves
//! its conflicts, and — in MCTS mode — one independent search per voting
//! agent feeds a majority vote with a cost tie-break.  The winning
//! [`PassingOrder`][cim_order::PassingOrder] goes back to the external
//! actuation layer; the planner never touches simulation state itself.

pub mod consensus;
pub mod error;
pub mod generator;
pub mod loader;
pub mod state;

#[cfg(test)]
mod tests;

pub use consensus::{plan_with_consensus, ConsensusAggregator, ConsensusOutcome};
pub use error::{PlanError, PlanResult};
pub use generator::{OrderGenerator, OrderStrategy};
pub use loader::{load_snapshot_csv, load_snapshot_reader};
pub use state::IntersectionState;

use cim_core::{OrderMode, PlanConfig, SearchRng, Snapshot};
use cim_order::PassingOrder;

/// Run one full planning cycle for `snapshot` under `config`.
///
/// FCFS mode produces a single order with a vote count of 0 (no voting
/// occurred).  MCTS mode runs one search per vehicle in the snapshot —
/// every participant gets a vote — and returns the consensus winner.
pub fn plan_snapshot(config: &PlanConfig, snapshot: &Snapshot) -> PlanResult<ConsensusOutcome> {
    let generator = OrderGenerator::from_config(config);
    let mut rng = SearchRng::new(config.seed);

    if snapshot.is_empty() {
        return Ok(ConsensusOutcome { order: PassingOrder::new(vec![]), votes: 0 });
    }

    match config.mode {
        OrderMode::FirstComeFirstServed => {
            let order = generator.plan(snapshot, rng.child(0))?;
            Ok(ConsensusOutcome { order, votes: 0 })
        }
        OrderMode::MonteCarloTreeSearch => {
            plan_with_consensus(&generator, snapshot, snapshot.len(), &mut rng)
        }
    }
}
