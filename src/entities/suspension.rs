//! Suspension request entity - a client's request to pause their membership.

use super::{RequestId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a request stands. Approved and rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuspensionStatus {
    /// Waiting for an admin
    Pending,
    /// Admin approved; the membership expiry was extended
    Approved,
    /// Admin rejected; nothing changed
    Rejected,
}

impl fmt::Display for SuspensionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        })
    }
}

/// A request to extend a membership by a number of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionRequest {
    /// Request id
    pub id: RequestId,
    /// Client who asked
    pub client_id: UserId,
    /// Requested pause length
    pub days: u32,
    /// Submission time
    pub submitted_at: DateTime<Utc>,
    /// Current status
    pub status: SuspensionStatus,
    /// When an admin decided, if they have
    pub resolved_at: Option<DateTime<Utc>>,
}

impl SuspensionRequest {
    /// Whether an admin has already decided on this request
    #[must_use]
    pub fn is_processed(&self) -> bool {
        self.status != SuspensionStatus::Pending
    }
}
