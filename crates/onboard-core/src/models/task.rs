//! Task model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{TaskKind, TaskStatus};

/// An individual unit of work within an onboarding step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// ID of the owning step
    pub step_id: u64,

    /// Short description of the work
    pub title: String,

    /// Content kind (document, video, upload, checklist)
    pub kind: TaskKind,

    /// Current completion status
    pub status: TaskStatus,

    /// Disabled tasks are invisible to progress math
    pub enabled: bool,

    /// Order of the task within its step (0-indexed)
    pub order: u32,

    /// Optimistic locking counter, bumped on every write
    pub version: u64,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last updated (UTC)
    pub updated_at: Timestamp,
}
