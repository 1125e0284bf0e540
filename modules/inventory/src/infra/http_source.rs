use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::InventoryConfig;
use crate::domain::source::{FetchError, MetricSource};

/// HTTP-backed metric source.
///
/// Talks to each host's system endpoint at
/// `http://{hostname}:{client_port}/system/api`. One shared connection pool;
/// responses are fully consumed or dropped on every path, so connections are
/// always returned to the pool.
pub struct HttpMetricSource {
    client: reqwest::Client,
    client_port: u16,
}

impl HttpMetricSource {
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &InventoryConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            client_port: config.client_port,
        })
    }

    async fn get_text(&self, hostname: &str, path: &str) -> Result<String, FetchError> {
        let url = format!(
            "http://{hostname}:{port}/system/api{path}",
            port = self.client_port
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::UnknownRoute(path.to_owned()));
        }
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }
        response.text().await.map_err(transport_error)
    }

    async fn get_number<T: FromStr>(&self, hostname: &str, path: &str) -> Result<T, FetchError> {
        let body = self.get_text(hostname, path).await?;
        body.trim().parse().map_err(|_| FetchError::Decode {
            path: path.to_owned(),
            reason: format!("not a number: {body:?}"),
        })
    }
}

fn transport_error(error: reqwest::Error) -> FetchError {
    FetchError::Unreachable(error.to_string())
}

#[async_trait]
impl MetricSource for HttpMetricSource {
    async fn property(&self, hostname: &str, name: &str) -> Result<String, FetchError> {
        self.get_text(hostname, &format!("/property/{name}")).await
    }

    async fn heap_size(&self, hostname: &str) -> Result<u64, FetchError> {
        self.get_number(hostname, "/heapsize").await
    }

    async fn memory_used(&self, hostname: &str) -> Result<u64, FetchError> {
        self.get_number(hostname, "/memoryUsed").await
    }

    async fn system_load(&self, hostname: &str) -> Result<f64, FetchError> {
        self.get_number(hostname, "/systemLoad").await
    }
}
