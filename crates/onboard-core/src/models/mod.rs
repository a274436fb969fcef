//! Data models for instructors, onboarding steps and tasks.
//!
//! This module contains the domain types of the onboarding engine. Display
//! implementations live in [`crate::display::models`] so presentation stays
//! separate from the data structures.
//!
//! # Model Overview
//!
//! - [`Instructor`]: the person being onboarded, with the classification
//!   ([`InstructorType`], [`TimingVariable`]) and the [`OnboardingModule`]
//!   snapshotted at registration
//! - [`OnboardingStep`]: one of six phases, typed by [`StepType`], whose
//!   [`StepStatus`] and counters are rolled up from its tasks
//! - [`Task`]: a unit of work of some [`TaskKind`] with a [`TaskStatus`] and an
//!   enabled flag
//! - [`InstructorSummary`]: compact per-instructor progress for lists
//!
//! # Examples
//!
//! ```rust
//! use onboard_core::models::{OnboardingModule, StepStatus, TaskStatus};
//!
//! let module: OnboardingModule = "b".parse().unwrap();
//! assert_eq!(module, OnboardingModule::BSurvival);
//!
//! assert!(TaskStatus::Skipped.is_done());
//! assert_eq!(StepStatus::default(), StepStatus::Pending);
//! ```

pub mod filters;
pub mod instructor;
pub mod kinds;
pub mod requests;
pub mod status;
pub mod step;
pub mod summary;
pub mod task;


pub use filters::InstructorFilter;
pub use instructor::Instructor;
pub use kinds::{InstructorType, OnboardingModule, StepType, TimingVariable};
pub use requests::{NewInstructor, NewStep, TaskChange};
pub use status::{StepStatus, TaskKind, TaskStatus};
pub use step::OnboardingStep;
pub use summary::InstructorSummary;
pub use task::Task;
