//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]) and
//! produce markdown. Newtype wrappers add context on top: collections handle
//! the empty case, result wrappers prepend a summary of the operation.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │ (Instructor,    │───▶│ Result Types    │───▶│    Output       │
//! │  Step, Task)    │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (InstructorSummaries, Steps)
//! - [`results`]: Operation result types (CreateResult, UpdateResult, DeleteResult)
//! - [`datetime`]: Timestamp and relative-day formatting
//! - [`models`]: Display implementations for domain models and module tables

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{InstructorSummaries, Steps};
pub use datetime::{LocalDateTime, RelativeDays};
pub use models::ModuleTable;
pub use results::{CreateResult, DeleteResult, UpdateResult};
