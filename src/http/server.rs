//! HTTP server setup.
//!
//! # Responsibilities
//! - Compose the fetcher stack (instrumentation around the mock backend)
//! - Mount the dispatcher-wrapped price handler on the configured path
//! - Bind and serve until shutdown

use std::sync::Arc;

use axum::{routing::any, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{CorrelationIdKind, ServiceConfig};
use crate::context::{
    CorrelationIdGenerator, RequestContext, SequentialGenerator, UuidGenerator,
};
use crate::fetcher::{InstrumentedFetcher, MockFetcher, PriceFetcher};
use crate::http::dispatcher::{serve_request, Dispatcher};
use crate::http::handlers::PriceHandler;

type PriceDispatcher = Dispatcher<PriceHandler<Arc<dyn PriceFetcher>>>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind the listen address. Failure here is meant to be fatal.
pub async fn bind(addr: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })
}

/// HTTP server for the price service.
pub struct PriceServer {
    router: Router,
    config: ServiceConfig,
}

impl PriceServer {
    /// Server backed by the configured mock, wrapped in instrumentation.
    pub fn from_config(config: ServiceConfig) -> Self {
        let backend = MockFetcher::from_config(&config.backend);
        let fetcher: Arc<dyn PriceFetcher> = Arc::new(InstrumentedFetcher::new(backend));
        Self::new(config, fetcher)
    }

    pub fn new(config: ServiceConfig, fetcher: Arc<dyn PriceFetcher>) -> Self {
        let ids: Arc<dyn CorrelationIdGenerator> = match config.observability.correlation_ids {
            CorrelationIdKind::Uuid => Arc::new(UuidGenerator),
            CorrelationIdKind::Sequential => Arc::new(SequentialGenerator::new()),
        };
        Self::with_id_generator(config, fetcher, ids)
    }

    pub fn with_id_generator(
        config: ServiceConfig,
        fetcher: Arc<dyn PriceFetcher>,
        ids: Arc<dyn CorrelationIdGenerator>,
    ) -> Self {
        let handler =
            PriceHandler::new(fetcher).normalize_symbols(config.backend.normalize_symbols);
        let dispatcher = Arc::new(Dispatcher::new(
            handler,
            RequestContext::base(config.server.service_name.as_str()),
            ids,
            config.server.request_timeout(),
        ));

        let router = Self::build_router(&config.server.path, dispatcher);
        Self { router, config }
    }

    /// `/` also catches every sub-path.
    fn build_router(path: &str, dispatcher: Arc<PriceDispatcher>) -> Router {
        let handler = any(serve_request::<PriceHandler<Arc<dyn PriceFetcher>>>);

        let mut router = Router::new().route(path, handler.clone());
        if path == "/" {
            router = router.route("/{*rest}", handler);
        }

        router
            .with_state(dispatcher)
            .layer(TraceLayer::new_for_http())
    }

    /// Router for in-process use (tests, embedding).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.server.path,
            "Price server listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Price server stopped");
        Ok(())
    }
}
