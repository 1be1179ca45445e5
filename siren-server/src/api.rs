//! HTTP boundary for the route pipeline
//!
//! `POST /route` takes `{ "start": { "lat", "lng" }, "end": { "lat", "lng" } }`
//! and answers `{ "success": true, "route": [...] }` or
//! `{ "success": false, "error": "..." }` with a status matching the
//! failure: 503 while the graph is still loading, 400 for unusable or
//! indistinguishable endpoints, 404 when the graph is disconnected
//! between them.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    error_handling::HandleErrorLayer,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use geo::Point;
use serde::{Deserialize, Serialize};
use siren_core::{Error, routing::plan_route};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Build the Axum router
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .concurrency_limit(64)
        .timeout(Duration::from_secs(10));

    Router::new()
        .route("/route", post(route))
        .route("/health", get(health))
        .layer(middleware)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub start: LatLng,
    pub end: LatLng,
}

#[derive(Debug, Serialize)]
struct RouteSuccess {
    success: bool,
    route: Vec<LatLng>,
}

#[derive(Debug, Serialize)]
struct RouteFailure {
    success: bool,
    error: String,
}

/// Calculate a route between two coordinates
async fn route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Response {
    let Some(network) = state.network() else {
        return failure(&Error::GraphNotLoaded);
    };

    let start = Point::new(request.start.lng, request.start.lat);
    let end = Point::new(request.end.lng, request.end.lat);

    match plan_route(&network, start, end, state.params()) {
        Ok(route) => {
            let route: Vec<LatLng> = route
                .points
                .iter()
                .map(|point| LatLng {
                    lat: point.y(),
                    lng: point.x(),
                })
                .collect();
            Json(RouteSuccess {
                success: true,
                route,
            })
            .into_response()
        }
        Err(error) => failure(&error),
    }
}

fn failure(error: &Error) -> Response {
    let status = match error {
        Error::GraphNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
        Error::NoNearbyNode | Error::EndpointsTooClose => StatusCode::BAD_REQUEST,
        Error::NoRouteFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    tracing::debug!(%error, %status, "route request failed");

    (
        status,
        Json(RouteFailure {
            success: false,
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn handle_middleware_error(error: tower::BoxError) -> Response {
    if error.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(RouteFailure {
                success: false,
                error: "Request timed out".to_string(),
            }),
        )
            .into_response()
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RouteFailure {
                success: false,
                error: format!("Internal error: {error}"),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use siren_core::{loading::road_network_from_json, routing::RoutingParams};
    use tower::ServiceExt;

    fn line_state() -> Arc<AppState> {
        let network = road_network_from_json(
            r#"{
                "nodes": [
                    { "id": 1, "lat": 0.0, "lng": 0.0 },
                    { "id": 2, "lat": 0.0, "lng": 1.0 },
                    { "id": 3, "lat": 0.0, "lng": 2.0 }
                ],
                "edges": [
                    { "from": 1, "to": 2, "weight": 1.0 },
                    { "from": 2, "to": 3, "weight": 1.0 }
                ]
            }"#,
        )
        .unwrap();

        let state = Arc::new(AppState::empty(RoutingParams::default()));
        state.install(network);
        state
    }

    fn route_request(start: (f64, f64), end: (f64, f64)) -> Request<Body> {
        let body = serde_json::json!({
            "start": { "lat": start.0, "lng": start.1 },
            "end": { "lat": end.0, "lng": end.1 },
        });
        Request::builder()
            .method("POST")
            .uri("/route")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn request_before_graph_load_is_service_unavailable() {
        let state = Arc::new(AppState::empty(RoutingParams::default()));
        let app = build_router(state);

        let response = app
            .oneshot(route_request((0.0, 0.0), (0.0, 2.0)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["error"], serde_json::json!("Graph data not loaded yet."));
    }

    #[tokio::test]
    async fn successful_route_lists_coordinates_in_order() {
        let app = build_router(line_state());

        let response = app
            .oneshot(route_request((0.0, 0.0), (0.0, 2.000001)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], serde_json::json!(true));
        let route = body["route"].as_array().unwrap();
        assert_eq!(route.len(), 3);
        assert_eq!(route[0]["lng"], serde_json::json!(0.0));
        assert_eq!(route[2]["lng"], serde_json::json!(2.0));
    }

    #[tokio::test]
    async fn coincident_endpoints_are_a_bad_request() {
        let app = build_router(line_state());

        let response = app
            .oneshot(route_request((0.0, 0.0), (0.0001, 0.0)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], serde_json::json!(false));
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("too close together")
        );
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = build_router(line_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
