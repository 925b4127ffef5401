//! In-memory append-only query/match log

use crate::matching::aggregator::MatchResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// One submitted query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryLogEntry {
    pub id: u64,
    pub user_skill: String,
    pub submitted_at: DateTime<Utc>,
}

/// One retained match, referencing the query that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct MatchLogEntry {
    pub id: u64,
    pub query_id: u64,
    pub skill: String,
    pub method: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

/// Records queries and their retained matches as append-only log entries.
///
/// Ids come from atomically incremented counters and the logs sit behind
/// mutexes, so concurrent requests never duplicate or lose ids. Entries
/// live for the process lifetime only.
#[derive(Debug, Default)]
pub struct QueryRecorder {
    queries: Mutex<Vec<QueryLogEntry>>,
    matches: Mutex<Vec<MatchLogEntry>>,
    next_query_id: AtomicU64,
    next_match_id: AtomicU64,
}

impl QueryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query record and return its id.
    pub fn record_query(&self, user_skill: &str) -> u64 {
        let id = self.next_query_id.fetch_add(1, Ordering::SeqCst) + 1;
        let entry = QueryLogEntry {
            id,
            user_skill: user_skill.to_string(),
            submitted_at: Utc::now(),
        };
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry);
        id
    }

    /// Append a match record for a previously recorded query.
    pub fn record_match(&self, query_id: u64, result: &MatchResult) {
        let id = self.next_match_id.fetch_add(1, Ordering::SeqCst) + 1;
        let entry = MatchLogEntry {
            id,
            query_id,
            skill: result.skill.clone(),
            method: result.method.as_str().to_string(),
            score: result.score,
            created_at: Utc::now(),
        };
        self.matches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry);
    }

    /// Snapshot of all query records.
    pub fn queries(&self) -> Vec<QueryLogEntry> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Snapshot of all match records.
    pub fn matches(&self) -> Vec<MatchLogEntry> {
        self.matches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
