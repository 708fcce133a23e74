//! HTTP surface - the JSON API and the server-rendered dashboard.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /api/data` - the whole document.
//! - `GET|POST /api/:collection` - list / create.
//! - `GET|PATCH|DELETE /api/:collection/:id` - read / shallow-merge / remove.
//! - `GET /api/analytics/{descriptive,predictive,prescriptive}` - reports as JSON.
//! - `GET /health` - `{ "ok": true, "collections": [...] }`.
//! - HTML pages from [`presentation`](crate::presentation).
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use shop_analytics::{http, CollectionRepository, JsonFileStore};
//!
//! let repo = Arc::new(CollectionRepository::new(JsonFileStore::open_or_init("data/database.json")?));
//!
//! // Compose with other axum routes
//! let app = http::router(repo.clone());
//!
//! // Or serve directly
//! http::serve(repo, "127.0.0.1:3000".parse()?).await?;
//! ```

mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::presentation;
use crate::repository::CollectionRepository;
use crate::store::DocumentStore;

pub use error::{ApiError, ApiResult};

/// JSON API routes only.
pub fn api_router<S: DocumentStore + 'static>(repo: Arc<CollectionRepository<S>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/data", get(handlers::snapshot::<S>))
        .route(
            "/api/analytics/descriptive",
            get(handlers::descriptive_report::<S>),
        )
        .route(
            "/api/analytics/predictive",
            get(handlers::predictive_report::<S>),
        )
        .route(
            "/api/analytics/prescriptive",
            get(handlers::prescriptive_report::<S>),
        )
        .route(
            "/api/:collection",
            get(handlers::list_records::<S>).post(handlers::create_record::<S>),
        )
        .route(
            "/api/:collection/:id",
            get(handlers::get_record::<S>)
                .patch(handlers::patch_record::<S>)
                .delete(handlers::delete_record::<S>),
        )
        .with_state(repo)
}

/// The full application: JSON API, HTML pages and request tracing.
pub fn router<S: DocumentStore + 'static>(repo: Arc<CollectionRepository<S>>) -> Router {
    api_router(repo.clone())
        .merge(presentation::router(repo))
        .layer(TraceLayer::new_for_http())
}

/// Serve the application at `addr` until the process receives Ctrl-C.
pub async fn serve<S: DocumentStore + 'static>(
    repo: Arc<CollectionRepository<S>>,
    addr: SocketAddr,
) -> Result<(), std::io::Error> {
    let app = router(repo);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
