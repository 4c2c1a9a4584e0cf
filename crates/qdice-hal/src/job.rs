//! Job bookkeeping.
//!
//! A job only ever moves forward:
//!
//! ```text
//!   Queued ──→ Running ──→ Completed
//!                 │
//!                 └──→ Failed(reason)
//! ```
//!
//! Once `Completed` or `Failed`, the status is frozen. A backend hands out
//! a result only for a `Completed` job.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Backend-assigned job handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a job is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    /// Carries the reason the run failed.
    Failed(String),
}

impl JobStatus {
    /// `Completed` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed(_))
    }
}

/// Status of one submitted circuit plus when it was accepted and settled.
#[derive(Debug, Clone)]
pub struct Job {
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl Job {
    /// A freshly queued job.
    pub fn queued() -> Self {
        Self {
            status: JobStatus::Queued,
            submitted_at: Utc::now(),
            settled_at: None,
        }
    }

    /// Advance to `status`. A settled job keeps its status.
    pub fn transition(&mut self, status: JobStatus) {
        if self.status.is_terminal() {
            return;
        }
        if status.is_terminal() {
            self.settled_at = Some(Utc::now());
        }
        self.status = status;
    }

    /// Time from submission to settlement, once settled.
    pub fn turnaround(&self) -> Option<TimeDelta> {
        self.settled_at.map(|t| t - self.submitted_at)
    }
}
