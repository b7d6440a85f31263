//! Live community context for the system prompt.
//!
//! Runs three sequential read queries (resident count, cash ledger, latest
//! announcements) and renders them as a short text block. Failures are
//! reported as [`ContextOutcome::Unavailable`] rather than propagated, so a
//! broken table-store never fails a chat request.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use warga_storage::{StoreError, TableStore, TransactionKind, TransactionRow};

/// Number of announcements included in the context block.
pub const ANNOUNCEMENT_LIMIT: usize = 2;

/// Shown instead of titles when there are no announcements.
pub const NO_ANNOUNCEMENTS: &str = "Tidak ada";

/// Aggregates derived from the table-store for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct CommunitySnapshot {
    pub resident_count: u64,
    pub cash_balance: f64,
    /// Titles, most recent first.
    pub recent_announcements: Vec<String>,
}

impl CommunitySnapshot {
    /// Render the context block injected into the system prompt.
    pub fn render(&self) -> String {
        let announcements = if self.recent_announcements.is_empty() {
            NO_ANNOUNCEMENTS.to_string()
        } else {
            self.recent_announcements.join(", ")
        };
        format!(
            "DATA REAL-TIME SAAT INI:\n\
             - Total Warga Terdaftar: {} orang.\n\
             - Saldo Kas RT saat ini: {}\n\
             - Pengumuman Terbaru: {}",
            self.resident_count,
            format_rupiah(self.cash_balance),
            announcements
        )
    }
}

/// Result of one collection attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextOutcome {
    /// Rendered context block.
    Ready(String),
    /// The store could not be read; carries the reason for logging.
    Unavailable(String),
}

#[derive(Debug)]
struct CachedContext {
    collected_at: Instant,
    text: String,
}

/// Builds the context block from a [`TableStore`].
pub struct ContextCollector {
    store: Arc<dyn TableStore>,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedContext>>,
}

impl ContextCollector {
    /// Create a collector that queries the store on every call.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            store,
            cache_ttl: Duration::ZERO,
            cache: Mutex::new(None),
        }
    }

    /// Reuse a successfully collected block for `ttl`. Zero disables caching.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Query the store and aggregate the three values.
    pub async fn snapshot(&self) -> Result<CommunitySnapshot, StoreError> {
        let resident_count = self.store.count_residents().await?.unwrap_or(0);
        let transactions = self.store.list_transactions().await?;
        let cash_balance = cash_balance(&transactions)?;
        let recent_announcements = self
            .store
            .latest_announcements(ANNOUNCEMENT_LIMIT)
            .await?
            .into_iter()
            .take(ANNOUNCEMENT_LIMIT)
            .map(|a| a.judul)
            .collect();

        Ok(CommunitySnapshot {
            resident_count,
            cash_balance,
            recent_announcements,
        })
    }

    /// Produce the context block, or the reason it is unavailable.
    pub async fn collect(&self) -> ContextOutcome {
        if let Some(text) = self.cached() {
            debug!("Using cached community context");
            return ContextOutcome::Ready(text);
        }

        match self.snapshot().await {
            Ok(snapshot) => {
                let text = snapshot.render();
                self.store_cache(&text);
                ContextOutcome::Ready(text)
            }
            Err(e) => {
                warn!(error = %e, "Community context unavailable");
                ContextOutcome::Unavailable(e.to_string())
            }
        }
    }

    fn cached(&self) -> Option<String> {
        if self.cache_ttl.is_zero() {
            return None;
        }
        let cache = self.cache.lock().ok()?;
        cache
            .as_ref()
            .filter(|c| c.collected_at.elapsed() < self.cache_ttl)
            .map(|c| c.text.clone())
    }

    fn store_cache(&self, text: &str) {
        if self.cache_ttl.is_zero() {
            return;
        }
        if let Ok(mut cache) = self.cache.lock() {
            *cache = Some(CachedContext {
                collected_at: Instant::now(),
                text: text.to_string(),
            });
        }
    }
}

/// Sum of income minus sum of expenses. Other transaction kinds are ignored.
pub fn cash_balance(rows: &[TransactionRow]) -> Result<f64, StoreError> {
    let mut total_in = 0.0;
    let mut total_out = 0.0;
    for row in rows {
        match row.kind() {
            TransactionKind::Income => total_in += row.amount()?,
            TransactionKind::Expense => total_out += row.amount()?,
            TransactionKind::Other => {}
        }
    }
    Ok(total_in - total_out)
}

/// Format an amount as `Rp 1,234,567`, rounded to whole rupiah (ties to even).
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round_ties_even();
    let digits = (rounded.abs() as u128).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("Rp {sign}{grouped}")
}
