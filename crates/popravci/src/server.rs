use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;
use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};

pub mod directory;
pub mod error;

pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    catalog: Catalog,
}

impl Server {
    /// Builds the catalog from `config` and starts serving on its bind address.
    pub async fn start(config: &ServiceConfig) -> ServiceResult<Self> {
        let source = config.build_source()?;
        let taxonomy = config.load_taxonomy()?;
        let catalog = Catalog::new(source, taxonomy, config.cache_ttl());
        Self::new(catalog, &config.bind_address).await
    }

    /// Serves `catalog` on `bind_address`; port 0 picks a free port.
    pub async fn new(catalog: Catalog, bind_address: &str) -> ServiceResult<Self> {
        let app = router(catalog.clone());
        let listener = TcpListener::bind(bind_address)
            .await
            .map_err(|error| ServiceError::Server(format!("failed to bind {bind_address}: {error}")))?;
        let addr = listener
            .local_addr()
            .map_err(|error| ServiceError::Server(error.to_string()))?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                tracing::error!("server stopped with error: {error}");
            }
        });

        tracing::info!("directory server listening on http://{addr} source={}", catalog.source_label());

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
            catalog,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> ServiceResult<()> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| ServiceError::Server("failed to send server shutdown signal".to_string()))
        } else {
            Ok(())
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

/// All routes, with permissive CORS and request tracing.
pub fn router(catalog: Catalog) -> Router {
    let state = Arc::new(ServerState { catalog });
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/health", get(health))
        .route("/majstori/search", post(directory::search))
        .route("/majstori/facets", get(directory::facets))
        .route("/majstori/status", get(directory::status))
        .route("/majstori/refresh", post(directory::refresh))
        .route("/majstori/:id", get(directory::profile))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}

pub(crate) struct ServerState {
    pub(crate) catalog: Catalog,
}
