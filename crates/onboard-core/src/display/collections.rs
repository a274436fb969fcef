//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{InstructorSummary, OnboardingStep};

/// Newtype wrapper for displaying a list of instructor summaries.
///
/// # Examples
///
/// ```rust
/// use onboard_core::{
///     display::InstructorSummaries,
///     models::{InstructorSummary, InstructorType, OnboardingModule, TimingVariable},
/// };
/// use jiff::{civil::date, Timestamp};
///
/// let summary = InstructorSummary {
///     id: 1,
///     name: "Ada Park".to_string(),
///     email: "ada@example.com".to_string(),
///     instructor_type: InstructorType::Newbie,
///     start_date: date(2030, 9, 1),
///     timing: TimingVariable::Comfortable,
///     module: OnboardingModule::ANurturing,
///     created_at: Timestamp::now(),
///     total_steps: 6,
///     completed_steps: 2,
/// };
///
/// let output = InstructorSummaries(vec![summary]).to_string();
/// assert!(output.contains("Ada Park (ID: 1) (2/6)"));
/// ```
pub struct InstructorSummaries(pub Vec<InstructorSummary>);

impl InstructorSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, InstructorSummary> {
        self.0.iter()
    }
}

impl Index<usize> for InstructorSummaries {
    type Output = InstructorSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a InstructorSummaries {
    type Item = &'a InstructorSummary;
    type IntoIter = std::slice::Iter<'a, InstructorSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for InstructorSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No instructors found.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the steps of one instructor.
pub struct Steps<'a>(pub &'a [OnboardingStep]);

impl fmt::Display for Steps<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No steps in this onboarding.");
        }
        for step in self.0 {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
