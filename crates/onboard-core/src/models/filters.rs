//! Filter types for querying instructors.

use super::{InstructorType, OnboardingModule};

/// Filter options for listing instructors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstructorFilter {
    /// Only instructors assigned to this module
    pub module: Option<OnboardingModule>,

    /// Only instructors of this experience tier
    pub instructor_type: Option<InstructorType>,
}

impl InstructorFilter {
    /// Whether the filter lets every instructor through.
    pub fn is_empty(&self) -> bool {
        self.module.is_none() && self.instructor_type.is_none()
    }
}
