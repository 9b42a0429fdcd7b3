//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the axum Router with the catch-all root handler
//! - Wire up middleware (tracing, CORS headers)
//! - Bind server to listener, serve with graceful shutdown
//! - Dispatch each request: path check → OPTIONS short-circuit →
//!   normalize → present → log → respond

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::http::cors;
use crate::normalize;
use crate::present;
use crate::state::ServerState;

/// Upper bound for buffering a request body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub state: Arc<ServerState>,
}

/// HTTP server for the request catcher.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around the shared process state.
    pub fn new(state: Arc<ServerState>) -> Self {
        let router = Self::build_router(AppState { state });
        Self { router }
    }

    /// Build the axum router. The CORS layers sit outside the routes so the
    /// 404 fallback carries the headers as well.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(catch_handler))
            .fallback(not_found_handler)
            .with_state(state)
            .layer(cors::allow_origin_layer())
            .layer(cors::allow_methods_layer())
            .layer(cors::allow_headers_layer())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Root handler: every method on `/` lands here.
async fn catch_handler(
    State(app): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    // CORS preflight: headers come from the router layers, no record is
    // built and no body is written.
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(error) => {
            // Fatal for this request only; no response headers have been
            // written yet, so a clean 500 is still possible.
            tracing::error!(%error, "Failed to read request body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let sequence = app.state.next_sequence();
    let record = normalize::normalize(
        sequence,
        &parts.method,
        &parts.uri,
        remote,
        &parts.headers,
        &bytes,
    );

    if let Err(error) = present::print_record(&record, &mut std::io::stdout().lock()) {
        tracing::warn!(sequence, %error, "Failed to render record to console");
    }

    // Awaited before responding; failures inside the sink are absorbed.
    app.state.sink().append(&record).await;

    (StatusCode::OK, Json(record)).into_response()
}

/// Any path other than root: plain-text 404, no record, no counter advance.
async fn not_found_handler() -> Response {
    (StatusCode::NOT_FOUND, "404 not found.").into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
