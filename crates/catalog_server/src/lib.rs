//! HTTP surface for the product catalog.
//!
//! # Responsibility
//! - Assemble the axum router, API key middleware and product handlers.
//! - Own the process-wide state: one SQLite connection and one immutable gate.
//!
//! # Invariants
//! - Every request passes the API key gate before routing.
//! - The connection lock is held only for one catalog operation.

pub mod config;
pub mod error;
mod middleware;
mod routes;

use axum::routing::get;
use axum::Router;
use catalog_core::{ApiKeyGate, CatalogResult, CatalogService, SqliteProductRepository};
use error::ApiError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};

pub use config::{ConfigError, ServerConfig};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    gate: Arc<ApiKeyGate>,
}

impl AppState {
    /// Takes ownership of a migrated connection and a configured gate.
    pub fn new(conn: Connection, gate: ApiKeyGate) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            gate: Arc::new(gate),
        }
    }

    pub fn gate(&self) -> &ApiKeyGate {
        &self.gate
    }

    /// Runs one catalog operation against the shared connection.
    ///
    /// The lock and the SQLite call happen on tokio's blocking pool so a busy
    /// connection never parks async worker threads.
    pub(crate) async fn with_catalog<T, F>(&self, operation: F) -> Result<T, ApiError>
    where
        F: FnOnce(&CatalogService<SqliteProductRepository<'_>>) -> CatalogResult<T>
            + Send
            + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let outcome = tokio::task::spawn_blocking(move || {
            // Each operation is a single statement, so a panic elsewhere cannot
            // leave the connection mid-transaction.
            let conn = db.lock().unwrap_or_else(PoisonError::into_inner);
            let catalog = CatalogService::new(SqliteProductRepository::new(&conn));
            operation(&catalog)
        })
        .await;

        match outcome {
            Ok(result) => Ok(result?),
            Err(err) => Err(ApiError::Worker(err.to_string())),
        }
    }
}

/// Builds the full application router.
///
/// Product routes are nested under the gate's protected prefix, so the
/// configured prefix always covers them. Layer order: access logging wraps
/// the API key gate, which wraps routing, so rejected requests are still
/// logged.
pub fn build_router(state: AppState) -> Router {
    let products = Router::new()
        .route(
            "/products",
            get(routes::list_products).post(routes::create_product),
        )
        .route("/products/search", get(routes::search_products))
        .route(
            "/products/:id",
            get(routes::get_product)
                .put(routes::update_product)
                .delete(routes::delete_product),
        );

    let prefix = state.gate().protected_prefix().to_string();
    let router = Router::new().route("/health", get(routes::health));
    let router = if prefix.is_empty() {
        router.merge(products)
    } else {
        router.nest(&prefix, products)
    };

    router
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_api_key,
        ))
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::{build_router, AppState};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use catalog_core::db::open_db_in_memory;
    use catalog_core::ApiKeyGate;
    use std::time::Duration;
    use tower::ServiceExt;

    #[tokio::test(flavor = "current_thread")]
    async fn health_answers_while_the_connection_is_locked() {
        let state = AppState::new(
            open_db_in_memory().expect("in-memory db"),
            ApiKeyGate::new("k").expect("valid gate"),
        );
        let app = build_router(state.clone());
        let guard = state.db.lock().expect("fresh lock");

        let list = tokio::spawn(app.clone().oneshot(
            Request::builder()
                .uri("/api/products")
                .header("X-API-Key", "k")
                .body(Body::empty())
                .expect("request"),
        ));
        tokio::task::yield_now().await;

        let health = tokio::time::timeout(
            Duration::from_secs(5),
            app.oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request")),
        )
        .await
        .expect("health must not wait for the connection lock")
        .expect("router is infallible");
        assert_eq!(health.status(), StatusCode::OK);

        drop(guard);
        let listed = tokio::time::timeout(Duration::from_secs(5), list)
            .await
            .expect("list completes once the lock is released")
            .expect("task joins")
            .expect("router is infallible");
        assert_eq!(listed.status(), StatusCode::OK);
    }
}
