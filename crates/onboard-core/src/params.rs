//! Parameter structures for onboarding operations.
//!
//! These structures are shared by every interface (CLI, MCP) and carry user
//! input in its raw, string-typed form. Each one knows how to validate itself
//! into the strongly typed values the service works with, so parsing rules
//! and error messages are identical across interfaces.
//!
//! Interface layers wrap them with their own derives (clap `Args` in the CLI,
//! `serde` + `schemars` in the MCP server) and convert with `From`.
//!
//! ```rust
//! use onboard_core::params::RegisterInstructor;
//!
//! let params = RegisterInstructor {
//!     name: "Ada Park".to_string(),
//!     email: "ada@example.com".to_string(),
//!     instructor_type: "newbie".to_string(),
//!     start_date: "2030-09-01".to_string(),
//!     module: None,
//! };
//! let (instructor_type, start_date, module) = params.validate()?;
//! assert!(module.is_none());
//! # let _ = (instructor_type, start_date);
//! # Ok::<(), onboard_core::OnboardingError>(())
//! ```

use std::str::FromStr;

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{OnboardingError, Result},
    models::{InstructorFilter, InstructorType, OnboardingModule, TaskChange, TaskKind, TaskStatus},
};

/// Parses an enum-like field, turning its `FromStr` message into an
/// `InvalidInput` error on `field`.
fn parse_field<T>(field: &str, value: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    T::from_str(value).map_err(|reason| OnboardingError::invalid_input(field).with_reason(reason))
}

fn parse_date(field: &str, value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|e| {
        OnboardingError::invalid_input(field)
            .with_reason(format!("Invalid date '{value}', expected YYYY-MM-DD: {e}"))
    })
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OnboardingError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(())
}

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for previewing which module an instructor would get.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ResolveModule {
    /// Instructor type: 'newbie', 'experienced' or 're_contract'
    pub instructor_type: String,
    /// First teaching day (YYYY-MM-DD)
    pub start_date: String,
    /// Resolve as of this day instead of today (YYYY-MM-DD)
    #[serde(default)]
    pub as_of: Option<String>,
}

impl ResolveModule {
    /// Parse the instructor type, start date and optional reference day.
    pub fn validate(&self) -> Result<(InstructorType, Date, Option<Date>)> {
        let instructor_type = parse_field("instructor_type", &self.instructor_type)?;
        let start_date = parse_date("start_date", &self.start_date)?;
        let as_of = self
            .as_of
            .as_deref()
            .map(|value| parse_date("as_of", value))
            .transpose()?;
        Ok((instructor_type, start_date, as_of))
    }
}

/// Parameters for registering a new instructor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RegisterInstructor {
    /// Full name of the instructor
    pub name: String,
    /// Contact email, must be unique
    pub email: String,
    /// Instructor type: 'newbie', 'experienced' or 're_contract'
    pub instructor_type: String,
    /// First teaching day (YYYY-MM-DD)
    pub start_date: String,
    /// Module chosen by the PM; resolved automatically when omitted
    #[serde(default)]
    pub module: Option<String>,
}

impl RegisterInstructor {
    /// Validate registration input and return the parsed instructor type,
    /// start date and optional module override.
    ///
    /// # Errors
    ///
    /// * `OnboardingError::InvalidInput` - empty name, malformed email, unknown
    ///   instructor type or module, or an unparseable start date
    pub fn validate(&self) -> Result<(InstructorType, Date, Option<OnboardingModule>)> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)?;

        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => {
                return Err(OnboardingError::invalid_input("email")
                    .with_reason(format!("'{email}' is not a valid email address")))
            }
        }

        let instructor_type = parse_field("instructor_type", &self.instructor_type)?;
        let start_date = parse_date("start_date", &self.start_date)?;
        let module = self
            .module
            .as_deref()
            .map(|value| parse_field("module", value))
            .transpose()?;

        Ok((instructor_type, start_date, module))
    }
}

/// Parameters for listing instructors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListInstructors {
    /// Only list instructors in this module
    #[serde(default)]
    pub module: Option<String>,
    /// Only list instructors of this type
    #[serde(default)]
    pub instructor_type: Option<String>,
}

impl TryFrom<&ListInstructors> for InstructorFilter {
    type Error = OnboardingError;

    fn try_from(params: &ListInstructors) -> Result<Self> {
        Ok(InstructorFilter {
            module: params
                .module
                .as_deref()
                .map(|value| parse_field("module", value))
                .transpose()?,
            instructor_type: params
                .instructor_type
                .as_deref()
                .map(|value| parse_field("instructor_type", value))
                .transpose()?,
        })
    }
}

/// Parameters for deleting an instructor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteInstructor {
    /// ID of the instructor to delete
    pub id: u64,
    /// Must be true; guards against accidental deletion
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for showing one module's step table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ShowModule {
    /// Module letter (A-F), label ('Survival') or stored name ('b_survival')
    pub module: String,
}

impl ShowModule {
    pub fn validate(&self) -> Result<OnboardingModule> {
        parse_field("module", &self.module)
    }
}

/// Parameters for a step-type lookup where module and step may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepTypeQuery {
    /// Module name or letter (required for a successful lookup)
    #[serde(default)]
    pub module: Option<String>,
    /// Step number, normally 1 to 6
    #[serde(default)]
    pub step_number: Option<i64>,
}

impl StepTypeQuery {
    /// Parse the module, leaving absence for the resolver to report.
    pub fn module(&self) -> Result<Option<OnboardingModule>> {
        self.module
            .as_deref()
            .map(|value| parse_field("module", value))
            .transpose()
    }
}

/// Parameters for adding a task to a step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddTask {
    /// ID of the step to add the task to
    pub step_id: u64,
    /// Title of the task
    pub title: String,
    /// Task kind: 'document', 'video', 'file_upload' or 'checklist' (default)
    #[serde(default)]
    pub kind: Option<String>,
}

impl AddTask {
    /// Validate the title and parse the kind.
    pub fn validate(&self) -> Result<TaskKind> {
        require_text("title", &self.title)?;
        match self.kind.as_deref() {
            Some(kind) => parse_field("kind", kind),
            None => Ok(TaskKind::default()),
        }
    }
}

/// Parameters for changing a task's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTask {
    /// Task ID to update
    pub id: u64,
    /// New status: 'pending', 'in_progress', 'completed' or 'skipped'
    pub status: String,
    /// Version the caller last saw; the update is rejected if it changed
    #[serde(default)]
    pub expected_version: Option<u64>,
}

impl TryFrom<&UpdateTask> for TaskChange {
    type Error = OnboardingError;

    fn try_from(params: &UpdateTask) -> Result<Self> {
        Ok(TaskChange {
            status: Some(parse_field::<TaskStatus>("status", &params.status)?),
            enabled: None,
            expected_version: params.expected_version,
        })
    }
}

/// Parameters for enabling or disabling a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetTaskEnabled {
    /// Task ID to update
    pub id: u64,
    /// Whether the task counts toward step progress
    pub enabled: bool,
    /// Version the caller last saw; the update is rejected if it changed
    #[serde(default)]
    pub expected_version: Option<u64>,
}

impl From<&SetTaskEnabled> for TaskChange {
    fn from(params: &SetTaskEnabled) -> Self {
        TaskChange {
            status: None,
            enabled: Some(params.enabled),
            expected_version: params.expected_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegisterInstructor {
        RegisterInstructor {
            name: "Ada Park".to_string(),
            email: "ada@example.com".to_string(),
            instructor_type: "experienced".to_string(),
            start_date: "2026-05-04".to_string(),
            module: None,
        }
    }

    fn assert_invalid(result: Result<impl std::fmt::Debug>, expected_field: &str) {
        match result {
            Err(OnboardingError::InvalidInput { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidInput on {expected_field}, got {other:?}"),
        }
    }

    #[test]
    fn test_register_validate_valid() {
        let (instructor_type, start_date, module) = registration().validate().unwrap();
        assert_eq!(instructor_type, InstructorType::Experienced);
        assert_eq!(start_date, jiff::civil::date(2026, 5, 4));
        assert_eq!(module, None);
    }

    #[test]
    fn test_register_validate_module_override() {
        let mut params = registration();
        params.module = Some("F".to_string());
        let (_, _, module) = params.validate().unwrap();
        assert_eq!(module, Some(OnboardingModule::FMinimalCheck));
    }

    #[test]
    fn test_register_validate_rejects_bad_fields() {
        let mut params = registration();
        params.name = "  ".to_string();
        assert_invalid(params.validate(), "name");

        let mut params = registration();
        params.email = "not-an-email".to_string();
        assert_invalid(params.validate(), "email");

        let mut params = registration();
        params.instructor_type = "veteran".to_string();
        assert_invalid(params.validate(), "instructor_type");

        let mut params = registration();
        params.start_date = "05/04/2026".to_string();
        assert_invalid(params.validate(), "start_date");

        let mut params = registration();
        params.module = Some("z".to_string());
        assert_invalid(params.validate(), "module");
    }

    #[test]
    fn test_resolve_module_validate() {
        let params = ResolveModule {
            instructor_type: "Re-Contract".to_string(),
            start_date: "2026-05-04".to_string(),
            as_of: Some("2026-04-01".to_string()),
        };
        let (instructor_type, _, as_of) = params.validate().unwrap();
        assert_eq!(instructor_type, InstructorType::ReContract);
        assert_eq!(as_of, Some(jiff::civil::date(2026, 4, 1)));
    }

    #[test]
    fn test_list_instructors_filter() {
        let params = ListInstructors {
            module: Some("b_survival".to_string()),
            instructor_type: None,
        };
        let filter = InstructorFilter::try_from(&params).unwrap();
        assert_eq!(filter.module, Some(OnboardingModule::BSurvival));
        assert!(filter.instructor_type.is_none());

        assert!(InstructorFilter::try_from(&ListInstructors::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_update_task_conversion() {
        let params = UpdateTask {
            id: 3,
            status: "skipped".to_string(),
            expected_version: Some(2),
        };
        let change = TaskChange::try_from(&params).unwrap();
        assert_eq!(change.status, Some(TaskStatus::Skipped));
        assert_eq!(change.expected_version, Some(2));

        let params = UpdateTask {
            id: 3,
            status: "finished".to_string(),
            expected_version: None,
        };
        assert_invalid(TaskChange::try_from(&params), "status");
    }

    #[test]
    fn test_add_task_defaults_to_checklist() {
        let params = AddTask {
            step_id: 1,
            title: "Sign the code of conduct".to_string(),
            kind: None,
        };
        assert_eq!(params.validate().unwrap(), TaskKind::Checklist);

        let params = AddTask {
            step_id: 1,
            title: "Upload certificate".to_string(),
            kind: Some("file-upload".to_string()),
        };
        assert_eq!(params.validate().unwrap(), TaskKind::FileUpload);
    }

    #[test]
    fn test_step_type_query_module() {
        let query = StepTypeQuery {
            module: None,
            step_number: Some(1),
        };
        assert_eq!(query.module().unwrap(), None);

        let query = StepTypeQuery {
            module: Some("alignment".to_string()),
            step_number: Some(1),
        };
        assert_eq!(query.module().unwrap(), Some(OnboardingModule::CAlignment));
    }
}
