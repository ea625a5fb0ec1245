//! Depth-first topological ordering that tolerates cycles.
//!
//! A node is emitted once all of its outgoing edges have been followed, so an
//! edge target always precedes its source in the result. Edges that lead back
//! into a node still being visited close a cycle; they are skipped and
//! counted, never reported as an error.

use petgraph::graph::NodeIndex;
use petgraph::Direction;
use tracing::debug;

use crate::core::graph::DependencyGraph;
use crate::models::PriorityOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Finished,
}

/// Ordering plus the number of cyclic edges that were ignored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderOutcome {
    pub order: PriorityOrder,
    pub skipped_edges: usize,
}

/// Topologically order `graph`, dependencies first
pub fn topological_order(graph: &DependencyGraph) -> PriorityOrder {
    topological_order_with_stats(graph).order
}

/// Like [`topological_order`], also reporting skipped cyclic edges
///
/// Roots are taken in the graph's key enumeration order and each node's
/// edges are followed in insertion order. Runs in O(V + E) with an explicit
/// stack, so deep chains cannot overflow the call stack.
pub fn topological_order_with_stats(graph: &DependencyGraph) -> OrderOutcome {
    let inner = graph.inner();
    let mut state = vec![VisitState::Unvisited; inner.node_count()];
    let mut order: PriorityOrder = Vec::with_capacity(inner.node_count());
    let mut skipped_edges = 0;

    // petgraph yields neighbors newest-first, so popping from the back of
    // the collected list follows edges oldest-first
    let pending = |node: NodeIndex| -> Vec<NodeIndex> {
        inner.neighbors_directed(node, Direction::Outgoing).collect()
    };

    let mut stack: Vec<(NodeIndex, Vec<NodeIndex>)> = Vec::new();

    for root in inner.node_indices() {
        if state[root.index()] != VisitState::Unvisited {
            continue;
        }
        state[root.index()] = VisitState::InProgress;
        stack.push((root, pending(root)));

        while let Some((node, targets)) = stack.last_mut() {
            let Some(target) = targets.pop() else {
                let node = *node;
                stack.pop();
                state[node.index()] = VisitState::Finished;
                order.push(inner[node].clone());
                continue;
            };

            match state[target.index()] {
                VisitState::Unvisited => {
                    state[target.index()] = VisitState::InProgress;
                    stack.push((target, pending(target)));
                }
                VisitState::InProgress => skipped_edges += 1,
                VisitState::Finished => {}
            }
        }
    }

    if skipped_edges > 0 {
        debug!("Skipped {} cyclic edges while ordering {} nodes", skipped_edges, inner.node_count());
    }

    OrderOutcome { order, skipped_edges }
}
