use std::fs;

use geo::Point;
use hashbrown::HashMap;
use log::info;
use petgraph::graph::{DiGraph, NodeIndex};

use super::config::RoadNetworkConfig;
use super::dataset::RawGraph;
use crate::{Error, NodeId, model::{RoadEdge, RoadNetwork, RoadNode}};

/// Upper bound for a single edge weight: Earth's circumference in
/// metres. No road segment is longer, and capped weights keep summed
/// `u32` path costs far from overflow.
const MAX_EDGE_WEIGHT_METRES: f64 = 40_075_000.0;

/// Creates the road network from the configured dataset
///
/// # Errors
///
/// Returns an error if the dataset cannot be read, is not valid JSON,
/// references unknown node ids, or carries non-finite or negative weights.
pub fn create_road_network(config: &RoadNetworkConfig) -> Result<RoadNetwork, Error> {
    validate_config(config)?;

    info!(
        "Loading road-network dataset: {}",
        config.graph_path.display()
    );

    let raw = fs::read_to_string(&config.graph_path)?;
    let network = road_network_from_json(&raw)?;

    info!(
        "Road network loaded: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );

    Ok(network)
}

/// Parses a JSON graph dataset into a ready-to-query network
///
/// # Errors
///
/// Returns an error on malformed JSON, duplicate node ids, unknown edge
/// endpoints, or non-finite/negative weights.
pub fn road_network_from_json(raw: &str) -> Result<RoadNetwork, Error> {
    let dataset: RawGraph = serde_json::from_str(raw)
        .map_err(|e| Error::InvalidData(format!("Malformed graph dataset: {e}")))?;
    build_network(dataset)
}

fn validate_config(config: &RoadNetworkConfig) -> Result<(), Error> {
    if !config.graph_path.exists() {
        return Err(Error::InvalidData(format!(
            "Graph dataset not found: {}",
            config.graph_path.display()
        )));
    }
    Ok(())
}

fn build_network(dataset: RawGraph) -> Result<RoadNetwork, Error> {
    let mut graph = DiGraph::with_capacity(dataset.nodes.len(), dataset.edges.len() * 2);
    let mut indices: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(dataset.nodes.len());

    for node in &dataset.nodes {
        let index = graph.add_node(RoadNode {
            id: node.id,
            geometry: Point::new(node.lng, node.lat),
        });
        if indices.insert(node.id, index).is_some() {
            return Err(Error::InvalidData(format!(
                "Duplicate node id {} in dataset",
                node.id
            )));
        }
    }

    for edge in &dataset.edges {
        if !edge.weight.is_finite() || edge.weight < 0.0 || edge.weight > MAX_EDGE_WEIGHT_METRES {
            return Err(Error::InvalidData(format!(
                "Edge {} -> {} has invalid weight {}",
                edge.from, edge.to, edge.weight
            )));
        }

        let from = resolve(&indices, edge.from)?;
        let to = resolve(&indices, edge.to)?;
        let weight = edge.weight.round() as u32;

        graph.add_edge(from, to, RoadEdge { weight });
        if !edge.oneway {
            graph.add_edge(to, from, RoadEdge { weight });
        }
    }

    Ok(RoadNetwork::new(graph))
}

fn resolve(indices: &HashMap<NodeId, NodeIndex>, id: NodeId) -> Result<NodeIndex, Error> {
    indices
        .get(&id)
        .copied()
        .ok_or_else(|| Error::InvalidData(format!("Edge references unknown node id {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<RoadNetwork, Error> {
        let dataset: RawGraph = serde_json::from_str(json).unwrap();
        build_network(dataset)
    }

    #[test]
    fn builds_undirected_edges_by_default() {
        let network = parse(
            r#"{
                "nodes": [
                    { "id": 1, "lat": 0.0, "lng": 0.0 },
                    { "id": 2, "lat": 0.0, "lng": 0.001 }
                ],
                "edges": [{ "from": 1, "to": 2, "weight": 111.0 }]
            }"#,
        )
        .unwrap();

        assert_eq!(network.node_count(), 2);
        assert_eq!(network.edge_count(), 2);
    }

    #[test]
    fn oneway_edges_insert_a_single_arc() {
        let network = parse(
            r#"{
                "nodes": [
                    { "id": 1, "lat": 0.0, "lng": 0.0 },
                    { "id": 2, "lat": 0.0, "lng": 0.001 }
                ],
                "edges": [{ "from": 1, "to": 2, "weight": 111.0, "oneway": true }]
            }"#,
        )
        .unwrap();

        assert_eq!(network.edge_count(), 1);
    }

    #[test]
    fn unknown_edge_endpoint_is_rejected() {
        let result = parse(
            r#"{
                "nodes": [{ "id": 1, "lat": 0.0, "lng": 0.0 }],
                "edges": [{ "from": 1, "to": 9, "weight": 10.0 }]
            }"#,
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn absurdly_large_weight_is_rejected() {
        let result = parse(
            r#"{
                "nodes": [
                    { "id": 1, "lat": 0.0, "lng": 0.0 },
                    { "id": 2, "lat": 0.0, "lng": 0.001 }
                ],
                "edges": [{ "from": 1, "to": 2, "weight": 1e12 }]
            }"#,
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let result = parse(
            r#"{
                "nodes": [
                    { "id": 1, "lat": 0.0, "lng": 0.0 },
                    { "id": 2, "lat": 0.0, "lng": 0.001 }
                ],
                "edges": [{ "from": 1, "to": 2, "weight": -5.0 }]
            }"#,
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let result = parse(
            r#"{
                "nodes": [
                    { "id": 1, "lat": 0.0, "lng": 0.0 },
                    { "id": 1, "lat": 0.0, "lng": 0.001 }
                ],
                "edges": []
            }"#,
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn missing_file_is_reported_as_invalid_data() {
        let config = RoadNetworkConfig::new("/definitely/not/here.json");
        assert!(matches!(
            create_road_network(&config),
            Err(Error::InvalidData(_))
        ));
    }
}
