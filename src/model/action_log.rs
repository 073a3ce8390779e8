//! Append-only audit trail entries.

use chrono::{DateTime, Utc};
use record_actor::SequentialId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for log entries. Entries are numbered in the order they were appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LogId(pub u32);

impl Display for LogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "log_{}", self.0)
    }
}

impl SequentialId for LogId {
    fn from_sequence(seq: u32) -> Self {
        Self(seq)
    }

    fn sequence(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Create,
    Update,
    Delete,
    List,
    Unlist,
    Reprice,
    /// Batch recompute of every phone's prices.
    PriceUpdate,
    BulkImport,
    BulkList,
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActionKind::Create => "Phone Created",
            ActionKind::Update => "Phone Updated",
            ActionKind::Delete => "Phone Deleted",
            ActionKind::List => "Platform Listing",
            ActionKind::Unlist => "Platform Unlisting",
            ActionKind::Reprice => "Price Recalculated",
            ActionKind::PriceUpdate => "Price Update",
            ActionKind::BulkImport => "Bulk Upload",
            ActionKind::BulkList => "Bulk Listing",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub id: LogId,
    pub timestamp: DateTime<Utc>,
    pub action: ActionKind,
    pub details: String,
}

/// DTO for appending an entry. The timestamp is taken when the log actor accepts it.
#[derive(Debug, Clone)]
pub struct LogCreate {
    pub action: ActionKind,
    pub details: String,
}

impl LogCreate {
    pub fn new(action: ActionKind, details: impl Into<String>) -> Self {
        Self {
            action,
            details: details.into(),
        }
    }
}
