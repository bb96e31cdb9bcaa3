//! Consensus voting over independently computed orders.
//!
//! Each voting agent runs its own search over the same snapshot with
//! independent randomness and casts its resulting order as a ballot, keyed
//! by the order's signature (the comma-joined vehicle-ID sequence — order-
//! sensitive, route-insensitive).  The winner is the signature with the
//! most votes; ties among leaders go to the lowest total adjustment.
//!
//! Ballots are tallied in a `BTreeMap` so iteration — and therefore the
//! remaining tie-break among equal-cost leaders — is deterministic.

use std::collections::BTreeMap;

use cim_core::{SearchRng, Snapshot};
use cim_order::PassingOrder;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{OrderGenerator, PlanError, PlanResult};

// ── ConsensusOutcome ──────────────────────────────────────────────────────────

/// The agreed order and how many agents voted for it.
#[derive(Clone, Debug)]
pub struct ConsensusOutcome {
    pub order: PassingOrder,
    /// Winning vote count; 0 when no voting occurred (FCFS mode).
    pub votes: u32,
}

// ── ConsensusAggregator ───────────────────────────────────────────────────────

struct Ballot {
    votes: u32,
    order: PassingOrder,
}

/// Tallies ballots and picks the winner.
#[derive(Default)]
pub struct ConsensusAggregator {
    ballots: BTreeMap<String, Ballot>,
}

impl ConsensusAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cast one agent's order.  The first order seen for a signature is the
    /// one kept — identical signatures resolve to identical adjustments, so
    /// later copies add nothing but the vote.
    pub fn cast(&mut self, order: PassingOrder) {
        self.ballots
            .entry(order.signature())
            .and_modify(|b| b.votes += 1)
            .or_insert(Ballot { votes: 1, order });
    }

    /// Number of distinct candidate orders seen so far.
    pub fn candidate_count(&self) -> usize {
        self.ballots.len()
    }

    /// The winning outcome: highest vote count, ties broken by the lowest
    /// total adjustment.  `None` if no ballot was cast.
    pub fn winner(self) -> Option<ConsensusOutcome> {
        let top = self.ballots.values().map(|b| b.votes).max()?;
        self.ballots
            .into_values()
            .filter(|b| b.votes == top)
            .min_by_key(|b| b.order.total_adjustment())
            .map(|b| ConsensusOutcome { order: b.order, votes: top })
    }
}

// ── Multi-agent planning ──────────────────────────────────────────────────────

/// Run one independent plan per voting agent and return the consensus
/// winner.
///
/// Every agent seed is derived from `rng` up front, so agent runs have no
/// shared mutable state and the `parallel` feature can fan them out over a
/// Rayon pool without changing the result.
pub fn plan_with_consensus(
    generator: &OrderGenerator,
    snapshot: &Snapshot,
    agents: usize,
    rng: &mut SearchRng,
) -> PlanResult<ConsensusOutcome> {
    if agents == 0 {
        return Err(PlanError::Config("consensus requires at least one voting agent".into()));
    }

    let agent_rngs: Vec<SearchRng> = (0..agents).map(|i| rng.child(i as u64)).collect();

    #[cfg(feature = "parallel")]
    let orders: Vec<PassingOrder> = agent_rngs
        .into_par_iter()
        .map(|agent_rng| generator.plan(snapshot, agent_rng))
        .collect::<PlanResult<_>>()?;

    #[cfg(not(feature = "parallel"))]
    let orders: Vec<PassingOrder> = agent_rngs
        .into_iter()
        .map(|agent_rng| generator.plan(snapshot, agent_rng))
        .collect::<PlanResult<_>>()?;

    let mut tally = ConsensusAggregator::new();
    for order in orders {
        tally.cast(order);
    }

    // At least one agent voted, so a winner always exists.
    tally
        .winner()
        .ok_or_else(|| PlanError::Config("no ballots were cast".into()))
}
