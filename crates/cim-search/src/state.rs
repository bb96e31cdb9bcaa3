//! The `SearchState` trait — the domain extension point for the engine.

/// A point in the search space: a partial assignment plus the actions that
/// extend it.
///
/// # Contract
///
/// - States are value types.  [`apply`][Self::apply] returns a *new* state;
///   no state is mutated after creation and no two tree branches may alias
///   mutable data.  Cloning must therefore be a deep copy of anything the
///   state can reach mutably (cheap shared borrows of immutable inputs are
///   fine).
/// - A non-terminal state must always offer at least one action.  The
///   engine treats an empty action list on a non-terminal state as a fatal
///   invariant violation, not a dead end to route around.
/// - [`reward`][Self::reward] is only meaningful on terminal states; higher
///   is better.
pub trait SearchState: Clone {
    /// A transition out of this state.
    type Action: Clone + PartialEq;

    /// All legal actions from this state, in a deterministic order.
    /// Expansion tries them in exactly this order.
    fn possible_actions(&self) -> Vec<Self::Action>;

    /// The successor state reached by taking `action`.
    fn apply(&self, action: &Self::Action) -> Self;

    /// `true` once no further actions remain.
    fn is_terminal(&self) -> bool;

    /// Quality of a terminal state; higher is better.
    fn reward(&self) -> f64;
}
