//! Ledger entry model: one immutable credit or debit record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Entry direction (credit or debit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    /// Get string representation for database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "credit" => Some(Self::Credit),
            "debit" => Some(Self::Debit),
            _ => None,
        }
    }

    /// Prefix used in generated entry references.
    pub fn reference_prefix(&self) -> &'static str {
        match self {
            Self::Credit => "CR",
            Self::Debit => "DB",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settlement status. This service only materializes `Completed`
/// entries; the other states are kept for forward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Pending,
    Completed,
    Failed,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Single wallet ledger entry. Created atomically with the balance
/// mutation it represents; never mutated or deleted afterward.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WalletEntry {
    pub entry_id: Uuid,
    pub wallet_id: Uuid,
    pub direction: String,
    pub amount: i64,
    pub description: String,
    pub status: String,
    pub reference: String,
    pub created_utc: DateTime<Utc>,
}

impl WalletEntry {
    /// Get parsed direction.
    pub fn parsed_direction(&self) -> Option<Direction> {
        Direction::from_str(&self.direction)
    }

    /// Get parsed status.
    pub fn parsed_status(&self) -> Option<EntryStatus> {
        EntryStatus::from_str(&self.status)
    }

    /// Signed amount (positive for credit, negative for debit).
    pub fn signed_amount(&self) -> i64 {
        match self.parsed_direction() {
            Some(Direction::Credit) => self.amount,
            Some(Direction::Debit) => -self.amount,
            None => 0,
        }
    }
}
