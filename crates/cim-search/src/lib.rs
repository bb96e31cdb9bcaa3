//! `cim-search` — a generic, anytime Monte Carlo tree search.
//!
//! # Crate layout
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`state`]  | `SearchState` trait — the domain extension point       |
//! | [`tree`]   | arena-allocated search tree (`NodeIdx`, `Node`)        |
//! | [`engine`] | `Mcts`, `MctsConfig`, UCB1 selection, rollouts         |
//! | [`error`]  | `SearchError`, `SearchResult<T>`                       |
//!
//! # Search model (summary)
//!
//! The engine is state-type-agnostic: anything implementing [`SearchState`]
//! can be searched.  Each round runs selection (UCB1 descent through fully
//! expanded nodes), expansion (first untried action), a uniformly random
//! rollout to a terminal state, and backpropagation of the terminal reward
//! to the root.
//!
//! Unlike a move-by-move game searcher, [`Mcts::search`] returns the best
//! *terminal state* observed across all rollouts — the planning horizon is
//! the complete outcome, not the next action.  The budget is either a
//! wall-clock deadline (checked once per completed round, rounds are never
//! interrupted) or a fixed round count.

pub mod engine;
pub mod error;
pub mod state;
pub mod tree;


pub use engine::{Mcts, MctsConfig};
pub use error::{SearchError, SearchResult};
pub use state::SearchState;
