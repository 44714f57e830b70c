use crate::models::Resolution;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

pub const DEFAULT_RECENT_CAPACITY: usize = 5;

/// One remembered query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentQuery {
    pub query: String,
    pub issued_at: DateTime<Utc>,
}

/// Per-session view state: a bounded recent-query list, the last
/// resolution, and which citation detail view is open.
///
/// This replaces the demo's global mutable page state with an explicit
/// object the resolver and view layer are handed. The recent list keeps the
/// newest `capacity` queries and evicts the oldest past that, so session
/// state never grows without bound.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    capacity: usize,
    recent: VecDeque<RecentQuery>,
    last_resolution: Option<Resolution>,
    open_citation: Option<u32>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RECENT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            capacity: capacity.max(1),
            recent: VecDeque::new(),
            last_resolution: None,
            open_citation: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Record a completed resolution. Re-issuing a remembered query moves it
    /// to the newest slot instead of duplicating it.
    pub fn record(&mut self, resolution: Resolution) {
        self.recent
            .retain(|recent| recent.query != resolution.query);
        self.recent.push_back(RecentQuery {
            query: resolution.query.clone(),
            issued_at: Utc::now(),
        });
        while self.recent.len() > self.capacity {
            self.recent.pop_front();
        }

        self.open_citation = None;
        self.last_resolution = Some(resolution);
    }

    /// Remembered queries, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &RecentQuery> {
        self.recent.iter()
    }

    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.last_resolution.as_ref()
    }

    pub fn open_citation(&mut self, id: u32) {
        self.open_citation = Some(id);
    }

    pub fn close_citation(&mut self) {
        self.open_citation = None;
    }

    pub fn opened_citation(&self) -> Option<u32> {
        self.open_citation
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
