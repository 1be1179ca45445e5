//! Indexed road-network graph
//!
//! Wraps the petgraph graph with an R-tree over node positions for
//! coordinate snapping and a dataset-id lookup table. Built once by the
//! loading module; all routing runs read-only against it.

use geo::{Distance as _, Haversine, Point};
use hashbrown::HashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use rstar::{RTree, primitives::GeomWithData};

use crate::NodeId;

use super::components::{RoadEdge, RoadNode};

/// Shortest metre length of one degree of latitude (at the equator).
/// Used to turn degree-space index distances into a conservative
/// great-circle lower bound.
const MIN_DEGREE_METRES: f64 = 110_574.0;

/// R-tree entry: node position in (lng, lat) order with its graph index
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Weighted road-network graph with a spatial index over its nodes
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub graph: DiGraph<RoadNode, RoadEdge>,
    rtree: RTree<IndexedPoint>,
    id_index: HashMap<NodeId, NodeIndex>,
}

impl RoadNetwork {
    /// Builds the network from an already-validated graph. Node ids are
    /// expected to be unique; the last occurrence wins otherwise.
    pub fn new(graph: DiGraph<RoadNode, RoadEdge>) -> Self {
        let entries: Vec<IndexedPoint> = graph
            .node_indices()
            .map(|idx| {
                let point = graph[idx].geometry;
                IndexedPoint::new([point.x(), point.y()], idx)
            })
            .collect();

        let id_index = graph
            .node_indices()
            .map(|idx| (graph[idx].id, idx))
            .collect();

        Self {
            graph,
            rtree: RTree::bulk_load(entries),
            id_index,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Graph index of a node by its dataset id
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    /// Position of a node, if the index is still valid
    pub fn position(&self, index: NodeIndex) -> Option<Point<f64>> {
        self.graph.node_weight(index).map(|node| node.geometry)
    }

    /// Finds the nearest node to `point` within `max_distance` metres,
    /// never returning any index in `exclude`.
    ///
    /// The R-tree yields candidates in degree-space order, which is not
    /// great-circle order away from the equator (longitude degrees shrink
    /// by the cosine of the latitude). Each candidate is re-evaluated
    /// with exact Haversine distance, and the walk continues until the
    /// degree-space lower bound, converted to metres at the query
    /// latitude, rules out every remaining candidate — so the winner is
    /// the true great-circle nearest. Equidistant candidates are
    /// resolved in favour of the lowest dataset id.
    pub fn nearest_node(
        &self,
        point: &Point<f64>,
        max_distance: f64,
        exclude: &[NodeIndex],
    ) -> Option<(NodeIndex, f64)> {
        let query = [point.x(), point.y()];
        let cos_lat = point.y().to_radians().cos();
        let mut best: Option<(NodeIndex, f64)> = None;

        for (candidate, degree_distance_2) in
            self.rtree.nearest_neighbor_iter_with_distance_2(&query)
        {
            let lower_bound = degree_distance_2.sqrt() * MIN_DEGREE_METRES * cos_lat;
            if lower_bound > max_distance {
                break;
            }
            if let Some((_, best_metres)) = best {
                if lower_bound > best_metres {
                    break;
                }
            }
            if exclude.contains(&candidate.data) {
                continue;
            }

            let node = &self.graph[candidate.data];
            let metres = Haversine.distance(node.geometry, *point);
            if metres > max_distance {
                continue;
            }

            let better = match best {
                None => true,
                Some((index, best_metres)) => metres
                    .total_cmp(&best_metres)
                    .then_with(|| self.graph[candidate.data].id.cmp(&self.graph[index].id))
                    .is_lt(),
            };
            if better {
                best = Some((candidate.data, metres));
            }
        }

        best
    }
}
