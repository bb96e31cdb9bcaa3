//! The MCTS engine: configuration, UCB1 selection, rollouts, best-so-far.

use std::f64::consts::FRAC_1_SQRT_2;
use std::time::{Duration, Instant};

use cim_core::SearchRng;

use crate::tree::{NodeIdx, Tree};
use crate::{SearchError, SearchResult, SearchState};

// ── MctsConfig ────────────────────────────────────────────────────────────────

/// Search budget and exploration settings.
///
/// Exactly one of `time_limit_ms` / `iteration_limit` must be set;
/// [`Mcts::new`] rejects both-or-neither as a configuration error.
#[derive(Clone, Debug)]
pub struct MctsConfig {
    /// Wall-clock budget in milliseconds.
    pub time_limit_ms: Option<u64>,
    /// Fixed number of search rounds.  Must be ≥ 1 if set.
    pub iteration_limit: Option<u64>,
    /// UCB1 exploration constant.  Default `1/√2`.
    pub exploration: f64,
}

impl MctsConfig {
    /// A wall-clock-bounded search.
    pub fn time_limited(ms: u64) -> Self {
        Self {
            time_limit_ms: Some(ms),
            iteration_limit: None,
            exploration: FRAC_1_SQRT_2,
        }
    }

    /// A fixed-round-count search.
    pub fn iteration_limited(rounds: u64) -> Self {
        Self {
            time_limit_ms: None,
            iteration_limit: Some(rounds),
            exploration: FRAC_1_SQRT_2,
        }
    }

    /// Override the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }
}

// ── Budget ────────────────────────────────────────────────────────────────────

/// Validated search budget.
#[derive(Copy, Clone, Debug)]
enum Budget {
    Deadline(Duration),
    Rounds(u64),
}

impl Budget {
    fn from_config(config: &MctsConfig) -> SearchResult<Budget> {
        match (config.time_limit_ms, config.iteration_limit) {
            (Some(_), Some(_)) => Err(SearchError::Config(
                "cannot have both a time limit and an iteration limit".into(),
            )),
            (None, None) => Err(SearchError::Config(
                "must have either a time limit or an iteration limit".into(),
            )),
            (Some(ms), None) => Ok(Budget::Deadline(Duration::from_millis(ms))),
            (None, Some(rounds)) => {
                if rounds < 1 {
                    return Err(SearchError::Config(
                        "iteration limit must be at least one".into(),
                    ));
                }
                Ok(Budget::Rounds(rounds))
            }
        }
    }
}

// ── Mcts ──────────────────────────────────────────────────────────────────────

/// An anytime Monte Carlo tree searcher over any [`SearchState`].
///
/// The engine owns its RNG and the running best-so-far result; the tree is
/// built fresh inside each [`search`][Self::search] call and discarded when
/// it returns.  One round = selection → expansion → rollout →
/// backpropagation; a round is never interrupted mid-way, the time budget
/// is only re-checked between rounds.
#[derive(Debug)]
pub struct Mcts<S: SearchState> {
    budget: Budget,
    exploration: f64,
    rng: SearchRng,
    /// Best rollout outcome so far.  Strict improvement replaces it, so
    /// ties keep the earlier result.
    best_reward: f64,
    best_state: Option<S>,
}

impl<S: SearchState> Mcts<S> {
    /// Validate `config` and build an engine.  Fails fast on an invalid
    /// budget — nothing is searched.
    pub fn new(config: &MctsConfig, rng: SearchRng) -> SearchResult<Self> {
        Ok(Self {
            budget: Budget::from_config(config)?,
            exploration: config.exploration,
            rng,
            best_reward: f64::NEG_INFINITY,
            best_state: None,
        })
    }

    /// Run the search from `initial` and return the best terminal state
    /// observed across all rollouts.
    ///
    /// At least one round always completes, even under a zero time budget.
    /// Any [`SearchError::NoActions`] aborts the whole search: a partial
    /// result over an inconsistent state space is not trustworthy.
    pub fn search(&mut self, initial: S) -> SearchResult<S> {
        self.best_reward = f64::NEG_INFINITY;
        self.best_state = None;

        let mut tree = Tree::new(initial);

        match self.budget {
            Budget::Deadline(limit) => {
                let deadline = Instant::now() + limit;
                loop {
                    self.round(&mut tree)?;
                    if Instant::now() >= deadline {
                        break;
                    }
                }
            }
            Budget::Rounds(rounds) => {
                for _ in 0..rounds {
                    self.round(&mut tree)?;
                }
            }
        }

        self.best_state
            .take()
            .ok_or_else(|| SearchError::Config("search ended before any rollout".into()))
    }

    /// Reward of the best state found by the last `search` call.
    pub fn best_reward(&self) -> f64 {
        self.best_reward
    }

    // ── One round ─────────────────────────────────────────────────────────

    fn round(&mut self, tree: &mut Tree<S>) -> SearchResult<()> {
        let node = self.select(tree)?;
        let terminal = self.rollout(tree.node(node).state.clone())?;
        let reward = terminal.reward();

        if reward > self.best_reward {
            self.best_reward = reward;
            self.best_state = Some(terminal);
        }

        tree.backpropagate(node, reward);
        Ok(())
    }

    // ── Selection ─────────────────────────────────────────────────────────

    /// Descend from the root through fully expanded nodes via UCB1; stop at
    /// the first expandable node and expand it, or at a terminal node.
    fn select(&mut self, tree: &mut Tree<S>) -> SearchResult<NodeIdx> {
        let mut current = NodeIdx::ROOT;
        loop {
            let node = tree.node(current);
            if node.terminal {
                return Ok(current);
            }
            if node.fully_expanded {
                current = self.best_child(tree, current)?;
            } else {
                return self.expand(tree, current);
            }
        }
    }

    /// Create a child for the first action that does not have one yet,
    /// in `possible_actions()` order.
    fn expand(&mut self, tree: &mut Tree<S>, idx: NodeIdx) -> SearchResult<NodeIdx> {
        let actions = tree.node(idx).state.possible_actions();

        let untried = actions
            .iter()
            .find(|a| !tree.node(idx).children.iter().any(|(tried, _)| tried == *a))
            .cloned()
            // A non-terminal node with nothing left to expand means the
            // state produced no actions — a snapshot inconsistency.
            .ok_or(SearchError::NoActions)?;

        let child_state = tree.node(idx).state.apply(&untried);
        let child = tree.alloc(child_state, Some(idx));

        let node = tree.node_mut(idx);
        node.children.push((untried, child));
        if node.children.len() == actions.len() {
            node.fully_expanded = true;
        }

        Ok(child)
    }

    /// UCB1 over the children of a fully expanded node, uniform random
    /// tie-break among the maximizers.
    fn best_child(&mut self, tree: &Tree<S>, idx: NodeIdx) -> SearchResult<NodeIdx> {
        let node = tree.node(idx);
        let parent_visits = node.visits.max(1) as f64;

        let mut best_value = f64::NEG_INFINITY;
        let mut best_nodes: Vec<NodeIdx> = Vec::new();

        for &(_, child_idx) in &node.children {
            let child = tree.node(child_idx);
            let visits = child.visits as f64;
            let value = child.total_reward / visits
                + self.exploration * (2.0 * parent_visits.ln() / visits).sqrt();

            if value > best_value {
                best_value = value;
                best_nodes.clear();
                best_nodes.push(child_idx);
            } else if value == best_value {
                best_nodes.push(child_idx);
            }
        }

        // Empty children on a fully expanded non-terminal node is the same
        // snapshot inconsistency as an empty action list.
        self.rng
            .choose(&best_nodes)
            .copied()
            .ok_or(SearchError::NoActions)
    }

    // ── Rollout ───────────────────────────────────────────────────────────

    /// Play uniformly random actions from `state` until terminal.
    fn rollout(&mut self, mut state: S) -> SearchResult<S> {
        while !state.is_terminal() {
            let actions = state.possible_actions();
            let action = self.rng.choose(&actions).ok_or(SearchError::NoActions)?;
            state = state.apply(action);
        }
        Ok(state)
    }
}
