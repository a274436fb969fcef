//! Command-line interface definitions and command handling
//!
//! Argument structures use clap's derive API and convert into the core
//! parameter types with `From`, so validation and error messages come from
//! `onboard_core::params` and are identical to the MCP server's.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Onboarding → Markdown / JSON
//! ```

use std::fmt::Display;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use onboard_core::{
    display::{CreateResult, DeleteResult, ModuleTable, UpdateResult},
    params::*,
    Onboarding, OnboardingStep,
};
use serde::Serialize;
use serde_json::json;

use crate::renderer::TerminalRenderer;

// ============================================================================
// Module commands
// ============================================================================

/// Preview which module an instructor would be assigned
///
/// Computes the timing variable from the days left until the start date
/// (fourteen or more is comfortable) and picks the module for the instructor
/// type. Nothing is stored.
#[derive(Args)]
pub struct ResolveModuleArgs {
    /// Instructor type
    #[arg(long = "type", value_enum)]
    pub instructor_type: InstructorTypeArg,
    /// First teaching day (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: String,
    /// Resolve as of this day instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub as_of: Option<String>,
}

impl From<ResolveModuleArgs> for ResolveModule {
    fn from(val: ResolveModuleArgs) -> Self {
        ResolveModule {
            instructor_type: val.instructor_type.to_string(),
            start_date: val.start_date,
            as_of: val.as_of,
        }
    }
}

/// Show the step table of a module
#[derive(Args)]
pub struct ShowModuleArgs {
    /// Module letter (A-F) or name, e.g. 'B' or 'survival'
    pub module: String,
}

impl From<ShowModuleArgs> for ShowModule {
    fn from(val: ShowModuleArgs) -> Self {
        ShowModule { module: val.module }
    }
}

/// Look up how one step runs under a module
///
/// Unknown step numbers resolve to self-check.
#[derive(Args)]
pub struct StepTypeArgs {
    /// Module letter (A-F) or name
    pub module: String,
    /// Step number (1-6)
    #[arg(allow_negative_numbers = true)]
    pub step: i64,
}

impl From<StepTypeArgs> for StepTypeQuery {
    fn from(val: StepTypeArgs) -> Self {
        StepTypeQuery {
            module: Some(val.module),
            step_number: Some(val.step),
        }
    }
}

#[derive(Subcommand)]
pub enum ModuleCommands {
    /// Preview which module an instructor would be assigned
    #[command(alias = "r")]
    Resolve(ResolveModuleArgs),
    /// Show the step table of a module
    #[command(alias = "s")]
    Show(ShowModuleArgs),
    /// Look up how one step runs under a module
    #[command(alias = "st")]
    StepType(StepTypeArgs),
}

// ============================================================================
// Instructor commands
// ============================================================================

/// Register a new instructor
///
/// The module is resolved from the instructor type and start date unless
/// --module is given. Every step the module runs is created with its default
/// tasks.
#[derive(Args)]
pub struct RegisterInstructorArgs {
    /// Full name of the instructor
    pub name: String,
    /// Contact email, must be unique
    #[arg(long)]
    pub email: String,
    /// Instructor type
    #[arg(long = "type", value_enum)]
    pub instructor_type: InstructorTypeArg,
    /// First teaching day (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: String,
    /// Assign this module instead of resolving one
    #[arg(long)]
    pub module: Option<String>,
}

impl From<RegisterInstructorArgs> for RegisterInstructor {
    fn from(val: RegisterInstructorArgs) -> Self {
        RegisterInstructor {
            name: val.name,
            email: val.email,
            instructor_type: val.instructor_type.to_string(),
            start_date: val.start_date,
            module: val.module,
        }
    }
}

/// List instructors with their step progress
#[derive(Args)]
pub struct ListInstructorsArgs {
    /// Only list instructors in this module
    #[arg(long)]
    pub module: Option<String>,
    /// Only list instructors of this type
    #[arg(long = "type", value_enum)]
    pub instructor_type: Option<InstructorTypeArg>,
}

impl From<ListInstructorsArgs> for ListInstructors {
    fn from(val: ListInstructorsArgs) -> Self {
        ListInstructors {
            module: val.module,
            instructor_type: val.instructor_type.map(|t| t.to_string()),
        }
    }
}

/// Show an instructor with all steps and tasks
#[derive(Args)]
pub struct ShowInstructorArgs {
    /// ID of the instructor
    pub id: u64,
}

impl From<ShowInstructorArgs> for Id {
    fn from(val: ShowInstructorArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete an instructor permanently
#[derive(Args)]
pub struct DeleteInstructorArgs {
    /// ID of the instructor to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteInstructorArgs> for DeleteInstructor {
    fn from(val: DeleteInstructorArgs) -> Self {
        DeleteInstructor {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum InstructorCommands {
    /// Register a new instructor
    #[command(alias = "r")]
    Register(RegisterInstructorArgs),
    /// List instructors
    #[command(aliases = ["l", "ls"])]
    List(ListInstructorsArgs),
    /// Show an instructor with all steps and tasks
    #[command(alias = "s")]
    Show(ShowInstructorArgs),
    /// Delete an instructor permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteInstructorArgs),
}

// ============================================================================
// Step and task commands
// ============================================================================

/// Show a step with its tasks
#[derive(Args)]
pub struct ShowStepArgs {
    /// ID of the step
    pub id: u64,
}

impl From<ShowStepArgs> for Id {
    fn from(val: ShowStepArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Show a step with its tasks
    #[command(alias = "s")]
    Show(ShowStepArgs),
}

/// Show a single task with its current version
#[derive(Args)]
pub struct ShowTaskArgs {
    /// ID of the task
    pub id: u64,
}

impl From<ShowTaskArgs> for Id {
    fn from(val: ShowTaskArgs) -> Self {
        Id { id: val.id }
    }
}

/// Add a task to a step
#[derive(Args)]
pub struct AddTaskArgs {
    /// ID of the step to add the task to
    pub step_id: u64,
    /// Title of the task
    pub title: String,
    /// Kind of task
    #[arg(short, long, value_enum)]
    pub kind: Option<TaskKindArg>,
}

impl From<AddTaskArgs> for AddTask {
    fn from(val: AddTaskArgs) -> Self {
        AddTask {
            step_id: val.step_id,
            title: val.title,
            kind: val.kind.map(|k| k.to_string()),
        }
    }
}

/// Change a task's status
///
/// The owning step's progress is recomputed. Skipped tasks count as done for
/// the step status but not for the progress percentage.
#[derive(Args)]
pub struct UpdateTaskArgs {
    /// ID of the task
    pub id: u64,
    /// New status
    #[arg(short, long, value_enum)]
    pub status: TaskStatusArg,
    /// Reject the update if the task changed since this version
    #[arg(long)]
    pub expected_version: Option<u64>,
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdateTask {
            id: val.id,
            status: val.status.to_string(),
            expected_version: val.expected_version,
        }
    }
}

/// Enable or disable a task
///
/// Disabled tasks are excluded from progress entirely.
#[derive(Args)]
pub struct ToggleTaskArgs {
    /// ID of the task
    pub id: u64,
    /// Reject the update if the task changed since this version
    #[arg(long)]
    pub expected_version: Option<u64>,
}

impl ToggleTaskArgs {
    fn into_params(self, enabled: bool) -> SetTaskEnabled {
        SetTaskEnabled {
            id: self.id,
            enabled,
            expected_version: self.expected_version,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Show a task with its current version
    #[command(alias = "s")]
    Show(ShowTaskArgs),
    /// Add a task to a step
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Change a task's status
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Count a task toward its step's progress again
    Enable(ToggleTaskArgs),
    /// Exclude a task from its step's progress
    Disable(ToggleTaskArgs),
}

// ============================================================================
// Value enums
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum InstructorTypeArg {
    /// First-time instructor
    Newbie,
    /// Instructor with prior teaching experience
    Experienced,
    /// Returning instructor on a renewed contract
    ReContract,
}

impl std::fmt::Display for InstructorTypeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstructorTypeArg::Newbie => write!(f, "newbie"),
            InstructorTypeArg::Experienced => write!(f, "experienced"),
            InstructorTypeArg::ReContract => write!(f, "re_contract"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    Pending,
    InProgress,
    Completed,
    Skipped,
}

impl std::fmt::Display for TaskStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatusArg::Pending => write!(f, "pending"),
            TaskStatusArg::InProgress => write!(f, "in_progress"),
            TaskStatusArg::Completed => write!(f, "completed"),
            TaskStatusArg::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskKindArg {
    Document,
    Video,
    FileUpload,
    Checklist,
}

impl std::fmt::Display for TaskKindArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKindArg::Document => write!(f, "document"),
            TaskKindArg::Video => write!(f, "video"),
            TaskKindArg::FileUpload => write!(f, "file_upload"),
            TaskKindArg::Checklist => write!(f, "checklist"),
        }
    }
}

// ============================================================================
// Command handling
// ============================================================================

/// Executes commands against an onboarding service and prints the result.
pub struct Cli {
    onboarding: Onboarding,
    renderer: TerminalRenderer,
    json: bool,
}

impl Cli {
    pub fn new(onboarding: Onboarding, renderer: TerminalRenderer, json: bool) -> Self {
        Self {
            onboarding,
            renderer,
            json,
        }
    }

    /// Prints `data` as pretty JSON with `--json`, otherwise renders the
    /// markdown.
    fn output<T: Serialize + ?Sized>(&self, markdown: impl Display, data: &T) -> Result<()> {
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(data).context("Failed to serialize output")?
            );
            Ok(())
        } else {
            self.renderer.render(&markdown.to_string())
        }
    }

    pub async fn handle_module_command(&self, command: ModuleCommands) -> Result<()> {
        match command {
            ModuleCommands::Resolve(args) => {
                let resolution = self
                    .onboarding
                    .resolve_module(&args.into())
                    .context("Failed to resolve module")?;
                self.output(&resolution, &resolution)
            }
            ModuleCommands::Show(args) => {
                let module = ShowModule::from(args)
                    .validate()
                    .context("Failed to show module")?;
                let configuration = self.onboarding.module_configuration(module);
                self.output(
                    ModuleTable {
                        module,
                        configuration: &configuration,
                    },
                    &json!({ "module": module, "steps": configuration }),
                )
            }
            ModuleCommands::StepType(args) => {
                let query = StepTypeQuery::from(args);
                let step_type = self
                    .onboarding
                    .step_type(&query)
                    .context("Failed to look up step type")?;
                let module = query.module.unwrap_or_default();
                let step = query.step_number.unwrap_or_default();
                self.output(
                    format!("Step {step} of module {module}: {}\n", step_type.label()),
                    &json!({ "module": module, "step_number": step, "step_type": step_type }),
                )
            }
        }
    }

    pub async fn handle_instructor_command(&self, command: InstructorCommands) -> Result<()> {
        match command {
            InstructorCommands::Register(args) => {
                let instructor = self
                    .onboarding
                    .register_instructor(&args.into())
                    .await
                    .context("Failed to register instructor")?;
                self.output(CreateResult::new(instructor.clone()), &instructor)
            }
            InstructorCommands::List(args) => self.list_instructors(&args.into()).await,
            InstructorCommands::Show(args) => {
                let id = Id::from(args);
                let instructor = self
                    .onboarding
                    .get_instructor(&id)
                    .await
                    .context("Failed to get instructor")?
                    .ok_or_else(|| anyhow!("Instructor with ID {} not found", id.id))?;
                self.output(&instructor, &instructor)
            }
            InstructorCommands::Delete(args) => {
                let params = DeleteInstructor::from(args);
                let instructor = self
                    .onboarding
                    .get_instructor(&Id { id: params.id })
                    .await
                    .context("Failed to get instructor")?
                    .ok_or_else(|| anyhow!("Instructor with ID {} not found", params.id))?;
                self.onboarding
                    .delete_instructor(&params)
                    .await
                    .context("Failed to delete instructor")?;
                self.output(
                    DeleteResult::new(instructor),
                    &json!({ "deleted": params.id }),
                )
            }
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Show(args) => {
                let id = Id::from(args);
                let step = self
                    .onboarding
                    .get_step(&id)
                    .await
                    .context("Failed to get step")?
                    .ok_or_else(|| anyhow!("Step with ID {} not found", id.id))?;
                self.output(&step, &step)
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Show(args) => {
                let id = Id::from(args);
                let task = self
                    .onboarding
                    .get_task(&id)
                    .await
                    .context("Failed to get task")?
                    .ok_or_else(|| anyhow!("Task with ID {} not found", id.id))?;
                self.output(&task, &task)
            }
            TaskCommands::Add(args) => {
                let task = self
                    .onboarding
                    .add_task(&args.into())
                    .await
                    .context("Failed to add task")?;
                self.output(CreateResult::new(task.clone()), &task)
            }
            TaskCommands::Update(args) => {
                let params = UpdateTask::from(args);
                let step = self
                    .onboarding
                    .update_task(&params)
                    .await
                    .context("Failed to update task")?;
                let change = format!("Task {} status: {}", params.id, params.status);
                self.output_step_update(step, change)
            }
            TaskCommands::Enable(args) => {
                let params = args.into_params(true);
                let step = self
                    .onboarding
                    .set_task_enabled(&params)
                    .await
                    .context("Failed to enable task")?;
                self.output_step_update(step, format!("Task {} enabled", params.id))
            }
            TaskCommands::Disable(args) => {
                let params = args.into_params(false);
                let step = self
                    .onboarding
                    .set_task_enabled(&params)
                    .await
                    .context("Failed to disable task")?;
                self.output_step_update(step, format!("Task {} disabled", params.id))
            }
        }
    }

    pub async fn list_instructors(&self, params: &ListInstructors) -> Result<()> {
        let summaries = self
            .onboarding
            .list_instructors(params)
            .await
            .context("Failed to list instructors")?;
        self.output(&summaries, &summaries.0)
    }

    fn output_step_update(&self, step: OnboardingStep, change: String) -> Result<()> {
        let json = serde_json::to_value(&step).context("Failed to serialize step")?;
        self.output(UpdateResult::with_changes(step, vec![change]), &json)
    }
}
