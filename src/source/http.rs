use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use super::retry::{is_retryable_network_error, is_retryable_status, RetryConfig};
use super::DataSource;
use crate::config::Config;
use crate::logging::{log, obj, v_num, Domain, Level};

/// Fetches the dataset over HTTP. Transient failures (retryable statuses,
/// timeouts, connection errors) are retried with backoff; anything else is
/// reported immediately so the loader can fall back.
pub struct HttpSource {
    client: Client,
    url: Url,
    retry: RetryConfig,
}

impl HttpSource {
    pub fn new(cfg: &Config) -> Result<Self> {
        let url = Url::parse(&cfg.source_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.fetch_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Ok(Self {
            client,
            url,
            retry: RetryConfig {
                max_retries: cfg.retry_max,
                base_delay_ms: cfg.retry_base_delay_ms,
                max_delay_ms: cfg.retry_max_delay_ms,
                ..RetryConfig::default()
            },
        })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch_body(&self) -> Result<String> {
        let mut last_err: Option<anyhow::Error> = None;
        for attempt in 0..=self.retry.max_retries {
            if attempt > 0 {
                let delay = self.retry.delay_for_attempt(attempt - 1);
                log(
                    Level::Warn,
                    Domain::Ingest,
                    "fetch_retry",
                    obj(&[
                        ("attempt", v_num(attempt as f64)),
                        ("delay_ms", v_num(delay.as_millis() as f64)),
                    ]),
                );
                sleep(delay).await;
            }
            match self.client.get(self.url.clone()).send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if resp.status().is_success() {
                        return Ok(resp.text().await?);
                    }
                    let err = anyhow!("source responded HTTP {}", status);
                    if !is_retryable_status(status) {
                        return Err(err);
                    }
                    last_err = Some(err);
                }
                Err(e) => {
                    let retryable = is_retryable_network_error(&e);
                    let err = anyhow!("fetch failed: {}", e);
                    if !retryable {
                        return Err(err);
                    }
                    last_err = Some(err);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| anyhow!("fetch retries exhausted")))
    }
}
