//! Ergo Explorer Client
//!
//! Looks up the unspent boxes of the reputation-proof contract template that
//! belong to one owner. Transient failures (transport errors, 5xx, 429) are
//! retried with exponential backoff; anything else fails the query at once.
//! An owner with more than `max_records` boxes fails the query as well.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::RawRecordSource;
use super::types::{BoxSearchPage, BoxSearchRequest, RawBox};
use crate::error::{QueryError, QueryResult};

/// Template hash of the reputation-proof contract on mainnet
pub const REPUTATION_PROOF_TEMPLATE_HASH: &str =
    "2Ud2Ryh6MkC8Lstg1BiSE86Vbs7FTBdChEMo2c3ZK3pyGaQoY2Ck9QQiz2n4vWP6";

const SEARCH_PATH: &str = "/api/v1/boxes/unspent/search";

/// Longest response body kept in a [`QueryError::Status`]
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Explorer base URL, without trailing path
    pub url: String,
    /// Contract template fingerprint to search by
    pub contract_template_hash: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Attempts per page before giving up
    pub max_retries: u32,
    /// Base delay; doubled after every failed attempt
    pub retry_delay_ms: u64,
    /// Boxes requested per page
    pub page_size: u32,
    /// Listings larger than this fail instead of being fetched
    pub max_records: usize,
    /// Refuse plain-HTTP explorer URLs
    pub require_https: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            url: "https://api.ergoplatform.com".to_string(),
            contract_template_hash: REPUTATION_PROOF_TEMPLATE_HASH.to_string(),
            timeout_secs: 30,
            max_retries: 3,
            retry_delay_ms: 200,
            page_size: 100,
            max_records: 10_000,
            require_https: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExplorerClient {
    config: ExplorerConfig,
    owner_register: String,
    http_client: Client,
}

impl ExplorerClient {
    pub fn new(config: ExplorerConfig, owner_register: impl Into<String>) -> QueryResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("reputation-proofs/0.1")
            .https_only(config.require_https)
            .build()?;

        Ok(Self {
            config,
            owner_register: owner_register.into(),
            http_client,
        })
    }

    fn search_url(&self) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), SEARCH_PATH)
    }

    /// Fetch every unspent proof box for `owner_pk`, sorted by box id
    pub async fn search_owner_boxes(&self, owner_pk: &str) -> QueryResult<Vec<RawBox>> {
        let request = BoxSearchRequest::for_owner(
            &self.config.contract_template_hash,
            &self.owner_register,
            owner_pk,
        );

        let page_size = self.config.page_size.max(1);
        let mut boxes: Vec<RawBox> = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let page = self.fetch_page(&request, offset, page_size).await?;
            let received = page.items.len();
            boxes.extend(page.items);
            offset += received as u64;

            let max = self.config.max_records;
            if boxes.len() > max || page.total > max as u64 {
                warn!(
                    "Owner {} has {} proof boxes, over the limit of {}",
                    owner_pk, page.total, max
                );
                return Err(QueryError::TooManyRecords {
                    limit: max,
                    total: page.total.max(boxes.len() as u64),
                });
            }

            if received == 0 || offset >= page.total {
                break;
            }
        }

        // The explorer does not promise a stable order between calls.
        boxes.sort_by(|a, b| a.box_id.cmp(&b.box_id));
        // A box can shift across a page boundary while the set changes.
        boxes.dedup_by(|a, b| a.box_id.is_some() && a.box_id == b.box_id);

        info!(
            "Explorer returned {} unspent proof boxes for owner {}",
            boxes.len(),
            owner_pk
        );
        Ok(boxes)
    }

    async fn fetch_page(
        &self,
        request: &BoxSearchRequest,
        offset: u64,
        limit: u32,
    ) -> QueryResult<BoxSearchPage> {
        let resp = self.retry_post(request, offset, limit).await?;
        let body = resp.text().await?;

        serde_json::from_str(&body).map_err(|e| QueryError::InvalidResponse(e.to_string()))
    }

    async fn retry_post(
        &self,
        body: &BoxSearchRequest,
        offset: u64,
        limit: u32,
    ) -> QueryResult<reqwest::Response> {
        let url = self.search_url();
        let max_retries = self.config.max_retries.max(1);
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut attempts = 0;

        loop {
            attempts += 1;

            let result = self
                .http_client
                .post(&url)
                .query(&[("offset", offset), ("limit", u64::from(limit))])
                .json(body)
                .send()
                .await;

            let last = match result {
                Ok(resp) if resp.status().is_success() => return Ok(resp),
                Ok(resp) if is_transient(resp.status()) => format!("status {}", resp.status()),
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    let mut text = resp.text().await.unwrap_or_default();
                    truncate_utf8(&mut text, MAX_ERROR_BODY);
                    return Err(QueryError::Status { status, body: text });
                }
                Err(e) => e.to_string(),
            };

            if attempts >= max_retries {
                return Err(QueryError::RetriesExhausted { attempts, last });
            }

            debug!(
                "Explorer request failed ({}), retrying ({}/{})",
                last, attempts, max_retries
            );
            tokio::time::sleep(delay).await;
            delay = delay.saturating_mul(2);
        }
    }
}

#[async_trait]
impl RawRecordSource for ExplorerClient {
    async fn fetch(&self, owner_pk: &str) -> QueryResult<Vec<RawBox>> {
        self.search_owner_boxes(owner_pk).await
    }
}

fn is_transient(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

fn truncate_utf8(text: &mut String, max: usize) {
    if text.len() > max {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
}
