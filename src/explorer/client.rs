use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::wallet::{Btc, WalletReport};

use super::types::AddressResponse;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("explorer returned status {0}")]
    Status(u16),

    #[error("malformed explorer response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can produce a report for an address.
///
/// `None` is the only failure signal: callers cannot tell a network error
/// from an unknown address or a malformed response.
#[async_trait]
pub trait AddressSource: Send + Sync {
    async fn fetch(&self, address: &str) -> Option<WalletReport>;
}

/// Client for an Esplora-style block explorer (`GET /address/{addr}`).
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    http: Client,
    base_url: String,
}

impl ExplorerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch confirmed totals for an address. The address is passed through
    /// unvalidated.
    pub async fn fetch_stats(&self, address: &str) -> Result<WalletReport, FetchError> {
        let url = format!("{}/address/{}", self.base_url, address);
        let resp = self.http.get(&url).send().await?;

        if resp.status() != StatusCode::OK {
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        parse_address_stats(address, &body)
    }
}

#[async_trait]
impl AddressSource for ExplorerClient {
    async fn fetch(&self, address: &str) -> Option<WalletReport> {
        match self.fetch_stats(address).await {
            Ok(report) => {
                tracing::debug!(
                    address,
                    tx_count = report.tx_count,
                    "Fetched address stats"
                );
                Some(report)
            }
            Err(e) => {
                tracing::warn!(address, error = %e, "Address fetch failed");
                None
            }
        }
    }
}

/// Parse an explorer address body into a report.
pub fn parse_address_stats(address: &str, body: &str) -> Result<WalletReport, FetchError> {
    let parsed: AddressResponse = serde_json::from_str(body)?;
    let stats = parsed.chain_stats;
    Ok(WalletReport::from_totals(
        address,
        Btc::from_sats(stats.funded_txo_sum),
        Btc::from_sats(stats.spent_txo_sum),
        stats.tx_count,
    ))
}
