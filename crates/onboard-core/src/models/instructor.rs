//! Instructor model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{InstructorType, OnboardingModule, OnboardingStep, StepStatus, TimingVariable};

/// An instructor going through onboarding.
///
/// `timing` and `module` are a snapshot taken at registration; they are not
/// re-resolved when the start date draws closer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instructor {
    /// Unique identifier for the instructor
    pub id: u64,

    /// Display name
    pub name: String,

    /// Contact email, unique across instructors
    pub email: String,

    /// Experience tier
    pub instructor_type: InstructorType,

    /// First teaching day
    pub start_date: Date,

    /// Urgency as of registration
    pub timing: TimingVariable,

    /// Assigned onboarding module
    pub module: OnboardingModule,

    /// Timestamp when the instructor was registered (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the instructor or any of their steps last changed (UTC)
    pub updated_at: Timestamp,

    /// Materialized steps ordered by step number (lazy-loaded)
    #[serde(default)]
    pub steps: Vec<OnboardingStep>,
}

impl Instructor {
    /// Number of materialized steps whose status is Completed.
    pub fn completed_steps(&self) -> u32 {
        self.steps
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count() as u32
    }
}
