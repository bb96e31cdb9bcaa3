//! Planner configuration.
//!
//! Typically loaded from a TOML/JSON file by the application crate and
//! passed to the order generator.  Route pairs are stored unordered — the
//! conflict model checks both orderings.

use crate::RouteId;

// ── OrderMode ─────────────────────────────────────────────────────────────────

/// Which passing-order strategy to run.
///
/// Exactly two strategies exist; a tagged enum keeps dispatch explicit and
/// match-checked (no trait objects).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OrderMode {
    /// Sort by ascending distance to the conflict zone.
    #[default]
    FirstComeFirstServed,
    /// Monte Carlo tree search over crossing orders, with consensus voting.
    MonteCarloTreeSearch,
}

// ── PlanConfig ────────────────────────────────────────────────────────────────

/// Top-level planner configuration for one run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanConfig {
    /// Safety separation, metres.  Two vehicles on colliding routes must be
    /// strictly further apart than this to cross without an adjustment.
    pub collision_distance_thresh: f64,

    /// Unordered pairs of routes whose paths cross inside the conflict zone.
    pub colliding_routes: Vec<(RouteId, RouteId)>,

    /// Strategy selector.
    pub mode: OrderMode,

    /// Wall-clock budget for each MCTS run, milliseconds.
    /// Ignored in FCFS mode.
    pub mcts_time_ms: u64,

    /// Master RNG seed.  The same seed always produces identical plans.
    pub seed: u64,
}
