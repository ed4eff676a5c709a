//! Log Manager - bounded audit trail
//!
//! Records one entry per dispatched action. Records are kept in insertion
//! order; once more than `retention_limit` are held the oldest are evicted.
//! Append and eviction happen under a single write lock, so readers never see
//! the trail above its limit or a partially written record.
//!
//! Listing is chronological: index 0 is the oldest retained record and
//! `offset` counts from there.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::types::{LogPayload, LogRecord, LogStatus, McpError, McpResult};
use crate::utils::{truncate_chars, Clock, SystemClock};

/// Characters kept from each of the params and result summaries
pub const PAYLOAD_CHAR_BUDGET: usize = 200;

/// Retention used when none is configured
pub const DEFAULT_RETENTION_LIMIT: usize = 1000;

pub struct LogManager {
    records: RwLock<VecDeque<LogRecord>>,
    retention_limit: usize,
    clock: Arc<dyn Clock>,
}

impl LogManager {
    /// Create a log manager with the default retention limit
    pub fn new() -> Self {
        Self {
            records: RwLock::new(VecDeque::new()),
            retention_limit: DEFAULT_RETENTION_LIMIT,
            clock: Arc::new(SystemClock::new()),
        }
    }

    /// Create a log manager keeping at most `retention_limit` records
    pub fn with_retention(retention_limit: usize, clock: Arc<dyn Clock>) -> McpResult<Self> {
        if retention_limit == 0 {
            return Err(McpError::invalid_input(
                "log retention limit must be at least 1",
            ));
        }
        info!(retention_limit, "LogManager initialized");
        Ok(Self {
            records: RwLock::new(VecDeque::with_capacity(retention_limit.min(4096))),
            retention_limit,
            clock,
        })
    }

    pub fn retention_limit(&self) -> usize {
        self.retention_limit
    }

    /// Append a record, truncating both summaries, and evict the oldest
    /// records past the retention limit
    pub fn record(&self, action: &str, params: &str, result: &str, status: LogStatus) -> LogRecord {
        let mut records = self.records.write();

        let record = self.build(action, params, result, status);
        records.push_back(record.clone());

        let overflow = records.len().saturating_sub(self.retention_limit);
        if overflow > 0 {
            records.drain(..overflow);
            debug!(evicted = overflow, "Trimmed logs to {}", self.retention_limit);
        }

        record
    }

    /// Page through retained records, oldest first
    pub fn list(&self, limit: Option<usize>, offset: Option<usize>) -> Vec<LogRecord> {
        let records = self.records.read();
        let iter = records.iter().skip(offset.unwrap_or(0)).cloned();
        match limit {
            Some(limit) => iter.take(limit).collect(),
            None => iter.collect(),
        }
    }

    /// The `limit` most recent records, still oldest first
    pub fn recent(&self, limit: usize) -> Vec<LogRecord> {
        let records = self.records.read();
        let skip = records.len().saturating_sub(limit);
        records.iter().skip(skip).cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.records.read().len()
    }

    pub fn clear(&self) {
        self.records.write().clear();
        info!("All logs cleared");
    }

    /// Drop every record and append a single new one, under one write lock.
    /// Readers see either the old trail or just the new record.
    pub fn clear_and_record(
        &self,
        action: &str,
        params: &str,
        result: &str,
        status: LogStatus,
    ) -> LogRecord {
        let mut records = self.records.write();
        let record = self.build(action, params, result, status);
        records.clear();
        records.push_back(record.clone());
        info!(action, "Logs cleared");
        record
    }

    fn build(&self, action: &str, params: &str, result: &str, status: LogStatus) -> LogRecord {
        LogRecord {
            timestamp: self.clock.now(),
            action: action.to_string(),
            payload: LogPayload {
                params: truncate_chars(params, PAYLOAD_CHAR_BUDGET),
                result: truncate_chars(result, PAYLOAD_CHAR_BUDGET),
            },
            status,
        }
    }

    pub fn by_action(&self, action: &str) -> Vec<LogRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.action == action)
            .cloned()
            .collect()
    }

    pub fn by_status(&self, status: LogStatus) -> Vec<LogRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect()
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
