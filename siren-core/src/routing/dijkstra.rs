use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::{Distance, model::RoadNetwork};

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: Distance,
    node: NodeIndex,
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap).
        // Equal costs settle in ascending node-index order, which keeps
        // equal-cost path choice stable for identical input graphs.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path between two nodes: ordered node indices from start to
/// target inclusive, and the accumulated cost in metres.
#[derive(Debug, Clone)]
pub struct ShortestPath {
    pub nodes: Vec<NodeIndex>,
    pub cost: Distance,
}

/// Dijkstra's algorithm over the road network.
///
/// Returns `None` when `target` is unreachable from `start`. When
/// `start == target` the result is the trivial single-node path with
/// zero cost; callers that need an actual traversal must check for it.
pub fn shortest_path(
    network: &RoadNetwork,
    start: NodeIndex,
    target: NodeIndex,
) -> Option<ShortestPath> {
    let estimated_nodes = network.graph.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, Distance> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    // Start node has distance 0
    heap.push(State {
        cost: 0,
        node: start,
    });
    distances.insert(start, 0);

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            break;
        }

        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node) {
            if cost > best {
                continue;
            }
        }

        // Examine neighbors
        for edge in network.graph.edges(node) {
            let next = edge.target();
            let next_cost = cost.saturating_add(edge.weight().weight);

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, node);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, node);
                    }
                }
            }
        }
    }

    let cost = *distances.get(&target)?;
    if target != start && !predecessors.contains_key(&target) {
        return None;
    }

    // Follow predecessors backward from target to start
    let mut nodes = Vec::new();
    let mut current = target;
    while current != start {
        nodes.push(current);
        match predecessors.get(&current) {
            Some(&prev) => current = prev,
            None => return None,
        }
    }
    nodes.push(start);
    nodes.reverse();

    Some(ShortestPath { nodes, cost })
}
