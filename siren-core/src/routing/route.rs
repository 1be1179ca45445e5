//! Route pipeline: snap both endpoints to the network, solve, and map
//! the node path back to coordinates.

use geo::{Distance as _, Haversine, LineString, Point};
use geojson::{Feature, Geometry, JsonObject, Value as GeoJsonValue};
use itertools::Itertools;

use crate::{Distance, Error, model::RoadNetwork};

use super::dijkstra::shortest_path;

/// Tunable knobs for a route query
#[derive(Debug, Clone)]
pub struct RoutingParams {
    /// Maximum snap distance between a requested coordinate and its
    /// network node, in metres. Beyond this the coordinate is treated
    /// as having no usable node nearby.
    pub max_snap_distance: f64,
}

impl Default for RoutingParams {
    fn default() -> Self {
        Self {
            max_snap_distance: 2_000.0,
        }
    }
}

/// A computed route: ordered coordinates from start to end and the
/// accumulated edge cost in metres.
#[derive(Debug, Clone)]
pub struct Route {
    pub points: Vec<Point<f64>>,
    pub cost: Distance,
}

impl Route {
    /// Great-circle length of the route geometry in metres. Usually close
    /// to `cost`, but dataset weights may encode detours or penalties.
    pub fn length_metres(&self) -> f64 {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| Haversine.distance(*a, *b))
            .sum()
    }

    /// GeoJSON `LineString` feature of the route, for map display
    pub fn to_geojson(&self) -> Feature {
        let line = LineString::from(self.points.clone());
        let geometry = Geometry::new(GeoJsonValue::from(&line));

        let mut properties = JsonObject::new();
        properties.insert("cost_m".to_string(), self.cost.into());

        Feature {
            geometry: Some(geometry),
            properties: Some(properties),
            ..Default::default()
        }
    }
}

/// Computes a route between two arbitrary coordinates.
///
/// Endpoints are resolved with the same locator invoked twice: the start
/// without exclusions, the end with the start node excluded so both
/// endpoints can never collapse onto one node. The pipeline short-circuits
/// on the first failure:
///
/// - no usable node near an endpoint -> [`Error::NoNearbyNode`]
/// - the end only resolves to the excluded start node -> [`Error::EndpointsTooClose`]
/// - the solver finds no actual traversal -> [`Error::NoRouteFound`]
pub fn plan_route(
    network: &RoadNetwork,
    start: Point<f64>,
    end: Point<f64>,
    params: &RoutingParams,
) -> Result<Route, Error> {
    let (start_node, start_snap) = network
        .nearest_node(&start, params.max_snap_distance, &[])
        .ok_or(Error::NoNearbyNode)?;

    let end_node = match network.nearest_node(&end, params.max_snap_distance, &[start_node]) {
        Some((node, _)) => node,
        // No alternative to the start node within range: distinguish an
        // unusable area from endpoints the graph cannot tell apart.
        None => {
            let error = match network.nearest_node(&end, params.max_snap_distance, &[]) {
                Some(_) => Error::EndpointsTooClose,
                None => Error::NoNearbyNode,
            };
            return Err(error);
        }
    };

    log::debug!(
        "route query snapped to nodes {start_id} -> {end_id} ({start_snap:.0} m from start)",
        start_id = network.graph[start_node].id,
        end_id = network.graph[end_node].id,
    );

    let path = shortest_path(network, start_node, end_node).ok_or(Error::NoRouteFound)?;
    if path.nodes.len() <= 1 {
        return Err(Error::NoRouteFound);
    }

    // Defensive filter: drop indices that no longer resolve to a node
    let points: Vec<Point<f64>> = path
        .nodes
        .iter()
        .filter_map(|&index| network.position(index))
        .collect();

    Ok(Route {
        points,
        cost: path.cost,
    })
}
