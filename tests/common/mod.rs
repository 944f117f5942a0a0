//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use booster::config::ServiceConfig;
use booster::lifecycle::{Application, Shutdown, StartupError};
use booster::observability::NoopSettings;
use booster::reload::ConfigSource;
use tokio::task::JoinHandle;

/// A running service on an ephemeral port.
#[allow(dead_code)]
pub struct TestApp {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub client: reqwest::Client,
    pub handle: JoinHandle<Result<(), StartupError>>,
}

#[allow(dead_code)]
impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("service unreachable")
    }

    /// Poll `path` until it answers with `status`.
    pub async fn wait_for_status(&self, path: &str, status: u16, timeout: Duration) -> bool {
        self.wait_for(path, timeout, |code, _| code == status).await
    }

    /// Poll `path` until it answers 200 with a body containing `needle`.
    pub async fn wait_for_body(&self, path: &str, needle: &str, timeout: Duration) -> bool {
        self.wait_for(path, timeout, |code, body| code == 200 && body.contains(needle))
            .await
    }

    async fn wait_for(
        &self,
        path: &str,
        timeout: Duration,
        accept: impl Fn(u16, &str) -> bool,
    ) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if let Ok(res) = self.client.get(self.url(path)).send().await {
                let code = res.status().as_u16();
                let body = res.text().await.unwrap_or_default();
                if accept(code, &body) {
                    return true;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }
}

/// Config with a short reload interval, bound to an ephemeral port.
#[allow(dead_code)]
pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.reload.interval_ms = 100;
    config.reload.fetch_timeout_ms = 1000;
    config
}

/// Build and start the service, returning once it answers readiness.
pub async fn spawn_app(config: ServiceConfig, source: Arc<dyn ConfigSource>) -> TestApp {
    let app = Application::build(&config, source, Arc::new(NoopSettings))
        .await
        .expect("failed to build application");
    let addr = app.local_addr();

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(app.run(shutdown.clone()));

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let test_app = TestApp {
        addr,
        shutdown,
        client,
        handle,
    };

    let ready = test_app
        .wait_for_status("/api/health/readiness", 200, Duration::from_secs(5))
        .await;
    assert!(ready, "service did not become ready");

    test_app
}

/// Replace a file in one step, the way a mounted ConfigMap is updated.
#[allow(dead_code)]
pub fn write_atomic(path: &Path, content: &str) {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, content).unwrap();
    std::fs::rename(&tmp, path).unwrap();
}
