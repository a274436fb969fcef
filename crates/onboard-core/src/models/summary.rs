//! Instructor summary types and functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Instructor, InstructorType, OnboardingModule, TimingVariable};

/// Summary information about an instructor with step statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorSummary {
    /// Instructor ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Experience tier
    pub instructor_type: InstructorType,
    /// First teaching day
    pub start_date: Date,
    /// Urgency as of registration
    pub timing: TimingVariable,
    /// Assigned module
    pub module: OnboardingModule,
    /// Registration timestamp
    pub created_at: Timestamp,
    /// Number of materialized steps
    pub total_steps: u32,
    /// Number of completed steps
    pub completed_steps: u32,
}

impl From<&Instructor> for InstructorSummary {
    fn from(instructor: &Instructor) -> Self {
        Self {
            id: instructor.id,
            name: instructor.name.clone(),
            email: instructor.email.clone(),
            instructor_type: instructor.instructor_type,
            start_date: instructor.start_date,
            timing: instructor.timing,
            module: instructor.module,
            created_at: instructor.created_at,
            total_steps: instructor.steps.len() as u32,
            completed_steps: instructor.completed_steps(),
        }
    }
}
