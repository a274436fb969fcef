//! Core library for the onboard instructor onboarding tool.
//!
//! This crate classifies incoming instructors into one of six onboarding
//! modules, decides how each of the six onboarding steps is run under that
//! module, and tracks per-step progress as tasks are completed, skipped or
//! disabled.
//!
//! # Architecture
//!
//! - **Rules** ([`resolver`], [`catalog`]): pure functions and constant
//!   tables. Module resolution and step-type lookups never touch storage.
//! - **Domain Models** ([`models`]): instructors, steps and tasks. Step
//!   progress is derived by [`models::OnboardingStep::update_progress`].
//! - **Persistence** ([`db`]): SQLite storage with optimistic locking on
//!   steps and tasks.
//! - **Service** ([`service`]): the async [`Onboarding`] API used by the CLI
//!   and the MCP server.
//! - **Display** ([`display`]): markdown rendering of models and results.
//!
//! # Quick Start
//!
//! ```rust
//! use onboard_core::{
//!     models::{InstructorType, OnboardingModule, StepType, TimingVariable},
//!     resolver,
//! };
//!
//! let module = resolver::determine_module(InstructorType::Newbie, TimingVariable::Urgent);
//! assert_eq!(module, OnboardingModule::BSurvival);
//!
//! let step_type = resolver::step_type(Some(module), Some(6)).unwrap();
//! assert_eq!(step_type, StepType::Skip);
//! ```
//!
//! Persistent workflows go through the service:
//!
//! ```rust,no_run
//! use onboard_core::{params::ListInstructors, OnboardingBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let onboarding = OnboardingBuilder::new()
//!     .with_database_path(Some("onboard.db"))
//!     .build()
//!     .await?;
//!
//! let instructors = onboarding
//!     .list_instructors(&ListInstructors::default())
//!     .await?;
//! println!("{instructors}");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod resolver;
pub mod service;

pub use db::Database;
pub use display::{CreateResult, DeleteResult, InstructorSummaries, ModuleTable, UpdateResult};
pub use error::{OnboardingError, Result};
pub use models::{
    Instructor, InstructorSummary, InstructorType, OnboardingModule, OnboardingStep, StepStatus,
    StepType, Task, TaskKind, TaskStatus, TimingVariable,
};
pub use resolver::ModuleResolution;
pub use service::{Onboarding, OnboardingBuilder};
