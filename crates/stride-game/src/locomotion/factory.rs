//! State table construction

use super::state::StateId;

/// One state instance with its links into the hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateNode {
    pub(crate) id: StateId,
    pub(crate) is_root: bool,
    /// Super-state this state is active under, set when it becomes a sub-state
    pub parent: Option<StateId>,
    /// Currently active sub-state
    pub sub_state: Option<StateId>,
}

impl StateNode {
    fn new(id: StateId) -> Self {
        Self {
            id,
            is_root: id.is_root(),
            parent: None,
            sub_state: None,
        }
    }
}

/// Owns one node per state kind for the whole session.
///
/// States refer to each other only through [`StateId`] handles, so the
/// parent/child links never form an ownership cycle.
#[derive(Debug, Clone)]
pub struct StateFactory {
    nodes: [StateNode; 5],
}

impl StateFactory {
    pub fn new() -> Self {
        Self {
            nodes: StateId::ALL.map(StateNode::new),
        }
    }

    pub fn grounded(&self) -> StateId {
        self.nodes[StateId::Grounded.index()].id
    }

    pub fn jumping(&self) -> StateId {
        self.nodes[StateId::Jumping.index()].id
    }

    pub fn idle(&self) -> StateId {
        self.nodes[StateId::Idle.index()].id
    }

    pub fn walk(&self) -> StateId {
        self.nodes[StateId::Walk.index()].id
    }

    pub fn run(&self) -> StateId {
        self.nodes[StateId::Run.index()].id
    }

    pub fn node(&self, id: StateId) -> &StateNode {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: StateId) -> &mut StateNode {
        &mut self.nodes[id.index()]
    }
}

impl Default for StateFactory {
    fn default() -> Self {
        Self::new()
    }
}
