//! Arena-allocated search tree.
//!
//! Nodes live in one `Vec` and refer to each other by index: the parent is
//! an `Option<NodeIdx>` back-reference and children are `(action, NodeIdx)`
//! pairs, so there is no cyclic ownership and no reference counting.  The
//! child list doubles as the action→node mapping; it is a `Vec` rather than
//! a hash map so expansion order stays deterministic.  A tree is built
//! fresh for every search and dropped afterwards.

use std::fmt;

use crate::SearchState;

// ── NodeIdx ───────────────────────────────────────────────────────────────────

/// Index of a node in the search-tree arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct NodeIdx(pub u32);

impl NodeIdx {
    /// The root is always the first node allocated.
    pub const ROOT: NodeIdx = NodeIdx(0);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeIdx({})", self.0)
    }
}

// ── Node ──────────────────────────────────────────────────────────────────────

/// One search-tree node: a state plus visit statistics.
pub struct Node<S: SearchState> {
    pub state: S,
    pub parent: Option<NodeIdx>,
    pub visits: u64,
    pub total_reward: f64,
    /// Children in expansion order; doubles as the action→node mapping.
    pub children: Vec<(S::Action, NodeIdx)>,
    pub terminal: bool,
    pub fully_expanded: bool,
}

// ── Tree ──────────────────────────────────────────────────────────────────────

/// The arena.  Index with [`NodeIdx`]; the root is node 0.
pub struct Tree<S: SearchState> {
    nodes: Vec<Node<S>>,
}

impl<S: SearchState> Tree<S> {
    /// Create a tree holding only the root.
    pub fn new(root_state: S) -> Self {
        let mut tree = Tree { nodes: Vec::new() };
        tree.alloc(root_state, None);
        tree
    }

    /// Allocate a node for `state` under `parent` and return its index.
    ///
    /// Terminal states are born fully expanded — there is nothing to try.
    pub fn alloc(&mut self, state: S, parent: Option<NodeIdx>) -> NodeIdx {
        let terminal = state.is_terminal();
        let idx = NodeIdx(self.nodes.len() as u32);
        self.nodes.push(Node {
            state,
            parent,
            visits: 0,
            total_reward: 0.0,
            children: Vec::new(),
            terminal,
            fully_expanded: terminal,
        });
        idx
    }

    #[inline]
    pub fn node(&self, idx: NodeIdx) -> &Node<S> {
        &self.nodes[idx.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, idx: NodeIdx) -> &mut Node<S> {
        &mut self.nodes[idx.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add `reward` to `node` and every ancestor up to the root.
    pub fn backpropagate(&mut self, node: NodeIdx, reward: f64) {
        let mut current = Some(node);
        while let Some(idx) = current {
            let n = self.node_mut(idx);
            n.visits += 1;
            n.total_reward += reward;
            current = n.parent;
        }
    }
}
