//! High-level onboarding API.
//!
//! [`Onboarding`] is the entry point used by every interface. It combines the
//! pure rule sets ([`crate::resolver`], [`crate::models::OnboardingStep::update_progress`])
//! with SQLite persistence ([`crate::db`]).
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI / MCP      │    │   Onboarding    │    │    Database     │
//! │  (params)       │───▶│ (resolver +     │───▶│   (via db/)     │
//! │                 │    │  catalog)       │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Onboarding`] instances
//! - [`module_ops`]: Module resolution and step-type lookups (no I/O)
//! - [`instructor_ops`]: Registration, listing, lookup and deletion
//! - [`task_ops`]: Step lookup and task mutations with progress recomputation
//!
//! Database calls run on tokio's blocking pool with a fresh connection per
//! operation, so an `Onboarding` can be shared freely across tasks.
//!
//! # Example
//!
//! ```rust,no_run
//! use onboard_core::{params::RegisterInstructor, OnboardingBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let onboarding = OnboardingBuilder::new()
//!     .with_database_path(Some("/tmp/onboard.db"))
//!     .build()
//!     .await?;
//!
//! let instructor = onboarding
//!     .register_instructor(&RegisterInstructor {
//!         name: "Ada Park".to_string(),
//!         email: "ada@example.com".to_string(),
//!         instructor_type: "newbie".to_string(),
//!         start_date: "2030-09-01".to_string(),
//!         module: None,
//!     })
//!     .await?;
//! println!("{instructor}");
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use jiff::{civil::Date, Zoned};

pub mod builder;
pub mod instructor_ops;
pub mod module_ops;
pub mod task_ops;

#[cfg(test)]
mod tests;

pub use builder::OnboardingBuilder;

/// Main interface for onboarding instructors.
#[derive(Debug, Clone)]
pub struct Onboarding {
    pub(crate) db_path: PathBuf,
    pub(crate) today: Option<Date>,
}

impl Onboarding {
    /// Creates a new onboarding service for the given database path.
    pub(crate) fn new(db_path: PathBuf, today: Option<Date>) -> Self {
        Self { db_path, today }
    }

    /// The day urgency is measured from: the pinned date, or today in the
    /// system time zone.
    pub fn today(&self) -> Date {
        self.today.unwrap_or_else(|| Zoned::now().date())
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &PathBuf {
        &self.db_path
    }
}
