//! HTTP status endpoints for an opal compute node.
//!
//! - `GET /status` -> `{"status": "idle"}`
//! - `GET /specs`  -> service name, version, status and the registered
//!   algorithms grouped by module.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use opal_core::algorithm::AlgorithmRegistry;

/// Status reported by a node that is serving but not running a job.
pub const STATUS_IDLE: &str = "idle";

const SERVICE_NAME: &str = "opal";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Everything `/specs` reports about this node.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NodeSpecs {
    pub service: &'static str,
    pub version: String,
    pub status: &'static str,
    /// Module name -> class names, both sorted.
    pub algorithms: BTreeMap<String, Vec<String>>,
}

impl NodeSpecs {
    /// Snapshot the registry's module and class names.
    pub fn from_registry(registry: &AlgorithmRegistry, version: impl Into<String>) -> Self {
        let algorithms = registry
            .modules()
            .into_iter()
            .map(|module| {
                let classes = registry
                    .classes(module)
                    .unwrap_or_default()
                    .into_iter()
                    .map(str::to_owned)
                    .collect();
                (module.to_owned(), classes)
            })
            .collect();

        Self {
            service: SERVICE_NAME,
            version: version.into(),
            status: STATUS_IDLE,
            algorithms,
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the status router. `cors` adds permissive CORS headers.
pub fn build_router(specs: NodeSpecs, cors: bool) -> Router {
    let router = Router::new()
        .route("/status", get(get_status))
        .route("/specs", get(get_specs))
        .with_state(Arc::new(specs));

    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(specs: NodeSpecs, bind: &str, port: u16, cors: bool) -> Result<()> {
    let app = build_router(specs, cors);
    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {bind}:{port}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("opal status listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("opal status shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_status(State(specs): State<Arc<NodeSpecs>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: specs.status,
    })
}

async fn get_specs(State(specs): State<Arc<NodeSpecs>>) -> Json<NodeSpecs> {
    Json(specs.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;

    fn builtin_specs() -> NodeSpecs {
        NodeSpecs::from_registry(&AlgorithmRegistry::with_builtins(), "9.9.9")
    }

    async fn send_request(app: Router, request: Request<Body>) -> axum::response::Response {
        app.oneshot(request).await.unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1_048_576)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn specs_group_classes_by_module() {
        let specs = builtin_specs();
        assert_eq!(specs.service, "opal");
        assert_eq!(specs.version, "9.9.9");
        assert_eq!(
            specs.algorithms.get("builtin"),
            Some(&vec!["Echo".to_string()])
        );
    }

    #[tokio::test]
    async fn status_reports_idle() {
        let resp = send_request(build_router(builtin_specs(), false), get_request("/status")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({ "status": "idle" }));
    }

    #[tokio::test]
    async fn specs_lists_version_and_algorithms() {
        let resp = send_request(build_router(builtin_specs(), false), get_request("/specs")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({
                "service": "opal",
                "version": "9.9.9",
                "status": "idle",
                "algorithms": { "builtin": ["Echo"] },
            })
        );
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let resp = send_request(build_router(builtin_specs(), false), get_request("/jobs")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_header_only_when_enabled() {
        let with_origin = || {
            Request::builder()
                .uri("/status")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap()
        };

        let resp = send_request(build_router(builtin_specs(), true), with_origin()).await;
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .map(|v| v.to_str().unwrap()),
            Some("*")
        );

        let resp = send_request(build_router(builtin_specs(), false), with_origin()).await;
        assert!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
