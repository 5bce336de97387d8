/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for binance-futures-adapter tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use binance_futures_adapter::{ClientConfig, Credentials, FuturesClient};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_API_SECRET: &str = "test-api-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server, using the local clock for timestamps
pub fn test_client(server: &MockServer) -> FuturesClient {
    test_client_with(server, |_| {})
}

/// Client pointed at the mock server with extra config tweaks
pub fn test_client_with(server: &MockServer, tweak: impl FnOnce(&mut ClientConfig)) -> FuturesClient {
    let mut config = ClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        recv_window: Some(5000),
        sync_server_time: false,
    };
    tweak(&mut config);
    FuturesClient::with_config(config, Credentials::new(TEST_API_KEY, TEST_API_SECRET))
        .expect("client init")
}

/// Counts ERROR events emitted by this crate
#[derive(Clone, Default)]
pub struct ErrorCounter {
    count: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() == Level::ERROR
            && metadata.target().starts_with("binance_futures_adapter")
        {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}
