//! Onboarding step model and its progress rollup.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{StepStatus, StepType, Task, TaskStatus};

/// One of the six onboarding phases materialized for an instructor.
///
/// `completed_tasks`, `total_tasks` and `status` are derived from `tasks`
/// through [`OnboardingStep::update_progress`] and are never set directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingStep {
    /// Unique identifier for the step
    pub id: u64,

    /// ID of the instructor being onboarded
    pub instructor_id: u64,

    /// Position in the onboarding sequence (1..=6)
    pub step_number: u32,

    /// Title of the step
    pub title: String,

    /// How the step is run under the instructor's module
    pub step_type: StepType,

    /// Rolled-up status of the enabled tasks
    pub status: StepStatus,

    /// Enabled tasks with status Completed (Skipped excluded)
    pub completed_tasks: u32,

    /// Number of enabled tasks
    pub total_tasks: u32,

    /// Optimistic locking counter, bumped on every recomputation
    pub version: u64,

    /// Timestamp when the step was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the step was last updated (UTC)
    pub updated_at: Timestamp,

    /// Tasks ordered by position
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl OnboardingStep {
    /// Recomputes `completed_tasks`, `total_tasks` and `status` from the
    /// enabled subset of `tasks`.
    ///
    /// Skipped tasks count as done for `status` but not for
    /// `completed_tasks`, so a step can be Completed while
    /// [`progress_percentage`](Self::progress_percentage) is below 100.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jiff::Timestamp;
    /// use onboard_core::models::{
    ///     OnboardingStep, StepStatus, StepType, Task, TaskKind, TaskStatus,
    /// };
    ///
    /// let task = |id, status| Task {
    ///     id,
    ///     step_id: 1,
    ///     title: format!("Task {id}"),
    ///     kind: TaskKind::Checklist,
    ///     status,
    ///     enabled: true,
    ///     order: id as u32,
    ///     version: 0,
    ///     created_at: Timestamp::now(),
    ///     updated_at: Timestamp::now(),
    /// };
    ///
    /// let mut step = OnboardingStep {
    ///     id: 1,
    ///     instructor_id: 1,
    ///     step_number: 1,
    ///     title: "Orientation".to_string(),
    ///     step_type: StepType::PmLed,
    ///     status: StepStatus::Pending,
    ///     completed_tasks: 0,
    ///     total_tasks: 0,
    ///     version: 0,
    ///     created_at: Timestamp::now(),
    ///     updated_at: Timestamp::now(),
    ///     tasks: vec![task(1, TaskStatus::Completed), task(2, TaskStatus::Skipped)],
    /// };
    ///
    /// step.update_progress();
    /// assert_eq!(step.status, StepStatus::Completed);
    /// assert_eq!(step.progress_percentage(), 50);
    /// ```
    pub fn update_progress(&mut self) {
        if self.tasks.is_empty() {
            self.completed_tasks = 0;
            self.total_tasks = 0;
            self.status = StepStatus::Pending;
            return;
        }

        let enabled: Vec<&Task> = self.tasks.iter().filter(|task| task.enabled).collect();
        self.total_tasks = enabled.len() as u32;

        if enabled.is_empty() {
            self.completed_tasks = 0;
            self.status = StepStatus::Pending;
            return;
        }

        self.completed_tasks = enabled
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .count() as u32;

        let done = enabled.iter().filter(|task| task.status.is_done()).count() as u32;

        self.status = if done == self.total_tasks {
            StepStatus::Completed
        } else if done > 0 {
            StepStatus::InProgress
        } else {
            StepStatus::Pending
        };
    }

    /// Share of enabled tasks completed, floored to a whole percent.
    pub fn progress_percentage(&self) -> u32 {
        if self.total_tasks == 0 {
            return 0;
        }
        self.completed_tasks * 100 / self.total_tasks
    }

    /// Finds a task of this step by ID.
    pub fn task(&self, task_id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }
}
