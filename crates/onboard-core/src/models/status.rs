//! Status enumerations for steps and tasks, plus the task kind.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Derived status of an onboarding step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// No enabled task is done yet
    #[default]
    Pending,

    /// Some, but not all, enabled tasks are done
    InProgress,

    /// Every enabled task is completed or skipped
    Completed,
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(StepStatus::Pending),
            "inprogress" | "in_progress" => Ok(StepStatus::InProgress),
            "completed" => Ok(StepStatus::Completed),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl StepStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::InProgress => "in_progress",
            StepStatus::Completed => "completed",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use onboard_core::models::StepStatus;
    ///
    /// assert_eq!(StepStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(StepStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(StepStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Completed => "✓ Completed",
            StepStatus::InProgress => "➤ In Progress",
            StepStatus::Pending => "○ Pending",
        }
    }
}

/// Completion status of a single task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    /// Done without credit: counts toward step completion, not percentage
    Skipped,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "inprogress" | "in_progress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            "skipped" => Ok(TaskStatus::Skipped),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
        }
    }

    /// Whether the task counts as finished for step status purposes.
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Skipped)
    }

    /// Get status with a checkbox-style icon for task lists.
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "[x] Completed",
            TaskStatus::Skipped => "[-] Skipped",
            TaskStatus::InProgress => "[~] In Progress",
            TaskStatus::Pending => "[ ] Pending",
        }
    }
}

/// The kind of content a task presents to the instructor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Reading material followed by a quiz
    Document,

    /// Video followed by a quiz
    Video,

    /// The instructor uploads a file for review
    FileUpload,

    /// A list of items to tick off
    #[default]
    Checklist,
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "document" | "doc" => Ok(TaskKind::Document),
            "video" => Ok(TaskKind::Video),
            "file_upload" | "fileupload" | "upload" => Ok(TaskKind::FileUpload),
            "checklist" => Ok(TaskKind::Checklist),
            _ => Err(format!("Invalid task kind: {s}")),
        }
    }
}

impl TaskKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Document => "document",
            TaskKind::Video => "video",
            TaskKind::FileUpload => "file_upload",
            TaskKind::Checklist => "checklist",
        }
    }
}
