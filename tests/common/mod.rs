//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use price_service::config::ServiceConfig;
use price_service::fetcher::{InstrumentedFetcher, MockFetcher, PriceFetcher};
use price_service::observability::MemorySink;
use price_service::{PriceServer, Shutdown};

pub struct TestServer {
    pub addr: SocketAddr,
    pub sink: Arc<MemorySink>,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config with a short simulated latency so concurrent requests overlap.
#[allow(dead_code)]
pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.backend.latency_ms = 20;
    config
}

/// Start a server on an ephemeral port with fetch records captured in memory.
pub async fn start_server(config: ServiceConfig) -> TestServer {
    let sink = Arc::new(MemorySink::new());
    let backend = MockFetcher::from_config(&config.backend);
    let fetcher: Arc<dyn PriceFetcher> =
        Arc::new(InstrumentedFetcher::with_sink(backend, sink.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = PriceServer::new(config, fetcher);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    wait_until_accepting(addr).await;

    TestServer {
        addr,
        sink,
        shutdown,
    }
}

async fn wait_until_accepting(addr: SocketAddr) {
    for _ in 0..50 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("server at {addr} never started accepting");
}
