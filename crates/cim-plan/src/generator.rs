//! Order generation strategies.

use cim_core::{OrderMode, PlanConfig, SearchRng, Snapshot};
use cim_order::{ConflictModel, OrderEntry, PassingOrder};
use cim_search::{Mcts, MctsConfig};

use crate::{IntersectionState, PlanResult};

// ── OrderStrategy ─────────────────────────────────────────────────────────────

/// How to produce the candidate crossing order.
///
/// A tagged enum rather than a trait object: there are exactly two
/// strategies and dispatch stays match-checked.
#[derive(Clone, Debug)]
pub enum OrderStrategy {
    /// Sort by ascending distance to the conflict zone (first come, first
    /// served).  Deterministic; ties keep snapshot capture order.
    Fcfs,
    /// Search the order space with MCTS under the given budget.
    Mcts(MctsConfig),
}

// ── OrderGenerator ────────────────────────────────────────────────────────────

/// Produces a conflict-resolved [`PassingOrder`] from a snapshot.
pub struct OrderGenerator {
    model: ConflictModel,
    strategy: OrderStrategy,
}

impl OrderGenerator {
    pub fn new(model: ConflictModel, strategy: OrderStrategy) -> Self {
        Self { model, strategy }
    }

    /// Derive model and strategy from the planner configuration.
    pub fn from_config(config: &PlanConfig) -> Self {
        let strategy = match config.mode {
            OrderMode::FirstComeFirstServed => OrderStrategy::Fcfs,
            OrderMode::MonteCarloTreeSearch => {
                OrderStrategy::Mcts(MctsConfig::time_limited(config.mcts_time_ms))
            }
        };
        Self::new(ConflictModel::from_config(config), strategy)
    }

    pub fn model(&self) -> &ConflictModel {
        &self.model
    }

    /// Build one candidate order and resolve its conflicts.
    ///
    /// The MCTS path re-resolves the returned order even though every
    /// rollout already evaluated it — the caller gets a freshly resolved
    /// object either way.
    pub fn plan(&self, snapshot: &Snapshot, rng: SearchRng) -> PlanResult<PassingOrder> {
        let mut order = match &self.strategy {
            OrderStrategy::Fcfs => {
                let mut entries: Vec<OrderEntry> = snapshot
                    .iter()
                    .map(|(v, s)| OrderEntry::from_state(v.clone(), s))
                    .collect();
                entries.sort_by(|a, b| a.distance.total_cmp(&b.distance));
                PassingOrder::new(entries)
            }
            OrderStrategy::Mcts(config) => {
                let mut mcts = Mcts::new(config, rng)?;
                let initial = IntersectionState::from_snapshot(snapshot, &self.model);
                mcts.search(initial)?.into_order()
            }
        };

        order.resolve(&self.model);
        Ok(order)
    }
}
