//! PostgREST (Supabase) implementation of [`TableStore`].
//!
//! Each query is a single HTTP round trip against `/rest/v1/<table>`,
//! authenticated with the project's anonymous key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::debug;

use warga_core::config::StoreConfig;

use crate::error::StoreError;
use crate::store::TableStore;
use crate::types::{AnnouncementRow, TransactionRow};

const RESIDENTS_TABLE: &str = "warga";
const TRANSACTIONS_TABLE: &str = "transaksi_keuangan";
const ANNOUNCEMENTS_TABLE: &str = "pengumuman";

/// Table-store client speaking the PostgREST dialect.
#[derive(Debug, Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    base_url: String,
}

impl PostgrestStore {
    /// Build a client from the store configuration.
    ///
    /// The key is sent both as `apikey` and as a bearer token, which is what
    /// the Supabase gateway expects for anonymous access.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let key = config.anon_key.trim();
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(key)
                .map_err(|e| StoreError::InvalidHeader(format!("invalid api key: {e}")))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| StoreError::InvalidHeader(format!("invalid api key: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim().trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .client
            .get(self.table_url(table))
            .query(query)
            .send()
            .await?;
        let rows: Vec<T> = ensure_success(response).await?.json().await?;
        debug!(table, rows = rows.len(), "Table-store select completed");
        Ok(rows)
    }
}

#[async_trait]
impl TableStore for PostgrestStore {
    async fn count_residents(&self) -> Result<Option<u64>, StoreError> {
        let response = self
            .client
            .head(self.table_url(RESIDENTS_TABLE))
            .query(&[("select", "id")])
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let Some(range) = response.headers().get(CONTENT_RANGE) else {
            return Ok(None);
        };
        let range = range
            .to_str()
            .map_err(|e| StoreError::InvalidHeader(format!("content-range: {e}")))?;
        parse_content_range_total(range)
    }

    async fn list_transactions(&self) -> Result<Vec<TransactionRow>, StoreError> {
        self.select(TRANSACTIONS_TABLE, &[("select", "tipe,nominal")])
            .await
    }

    async fn latest_announcements(
        &self,
        limit: usize,
    ) -> Result<Vec<AnnouncementRow>, StoreError> {
        let limit = limit.to_string();
        self.select(
            ANNOUNCEMENTS_TABLE,
            &[
                ("select", "judul"),
                ("order", "created_at.desc"),
                ("limit", limit.as_str()),
            ],
        )
        .await
    }
}

/// Turn a non-2xx response into [`StoreError::Status`], keeping the body.
async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Extract the total from a `Content-Range` value such as `0-41/42` or `*/0`.
///
/// An unknown total (`*`) yields `None`.
pub fn parse_content_range_total(value: &str) -> Result<Option<u64>, StoreError> {
    let total = value
        .rsplit_once('/')
        .map(|(_, total)| total.trim())
        .ok_or_else(|| StoreError::InvalidHeader(format!("content-range {value:?}")))?;
    if total == "*" {
        return Ok(None);
    }
    total
        .parse::<u64>()
        .map(Some)
        .map_err(|_| StoreError::InvalidHeader(format!("content-range {value:?}")))
}
