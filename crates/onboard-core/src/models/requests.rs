//! Request types for creating and updating models.

use jiff::civil::Date;

use super::{InstructorType, OnboardingModule, StepType, TaskKind, TaskStatus, TimingVariable};

/// A fully resolved instructor registration, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInstructor {
    pub name: String,
    pub email: String,
    pub instructor_type: InstructorType,
    pub start_date: Date,
    pub timing: TimingVariable,
    pub module: OnboardingModule,
    /// Steps to materialize, in step number order
    pub steps: Vec<NewStep>,
}

/// A step to create for a new instructor, with its initial tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStep {
    pub step_number: u32,
    pub title: String,
    pub step_type: StepType,
    pub tasks: Vec<(String, TaskKind)>,
}

/// A change to a single task, applied together with the step recomputation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaskChange {
    pub status: Option<TaskStatus>,
    pub enabled: Option<bool>,
    /// When set, the write only happens if the task is still at this version
    pub expected_version: Option<u64>,
}

impl TaskChange {
    /// Whether applying the change would modify anything.
    pub fn is_noop(&self) -> bool {
        self.status.is_none() && self.enabled.is_none()
    }
}
