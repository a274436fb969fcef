//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use onboard_core::{
    display::{CreateResult, DeleteResult, ModuleTable, UpdateResult},
    params as core, Onboarding,
};
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::{not_found, to_mcp_error};

/// Generic MCP wrapper for core parameter types
///
/// Adds JSON deserialization and schema generation on top of any core
/// parameter type while keeping the core free of MCP concerns.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type ResolveModule = McpParams<core::ResolveModule>;
pub type ShowModule = McpParams<core::ShowModule>;
pub type StepTypeQuery = McpParams<core::StepTypeQuery>;
pub type RegisterInstructor = McpParams<core::RegisterInstructor>;
pub type ListInstructors = McpParams<core::ListInstructors>;
pub type DeleteInstructor = McpParams<core::DeleteInstructor>;
pub type AddTask = McpParams<core::AddTask>;
pub type UpdateTask = McpParams<core::UpdateTask>;
pub type SetTaskEnabled = McpParams<core::SetTaskEnabled>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(body.to_string())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    onboarding: Arc<Onboarding>,
}

impl McpHandlers {
    pub fn new(onboarding: Arc<Onboarding>) -> Self {
        Self { onboarding }
    }

    pub async fn resolve_module(
        &self,
        Parameters(params): Parameters<ResolveModule>,
    ) -> McpResult {
        debug!("resolve_module: {params:?}");

        let resolution = self
            .onboarding
            .resolve_module(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to resolve module", &e))?;

        text(resolution)
    }

    pub async fn show_module(&self, Parameters(params): Parameters<ShowModule>) -> McpResult {
        debug!("show_module: {params:?}");

        let module = params
            .as_ref()
            .validate()
            .map_err(|e| to_mcp_error("Failed to show module", &e))?;
        let configuration = self.onboarding.module_configuration(module);

        text(ModuleTable {
            module,
            configuration: &configuration,
        })
    }

    pub async fn step_type(&self, Parameters(params): Parameters<StepTypeQuery>) -> McpResult {
        debug!("step_type: {params:?}");

        let query = params.as_ref();
        let step_type = self
            .onboarding
            .step_type(query)
            .map_err(|e| to_mcp_error("Failed to look up step type", &e))?;

        let step = query
            .step_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "(none)".to_string());
        text(format!(
            "Step {step} of module {}: {} ({})",
            query.module.as_deref().unwrap_or_default(),
            step_type.label(),
            step_type
        ))
    }

    pub async fn register_instructor(
        &self,
        Parameters(params): Parameters<RegisterInstructor>,
    ) -> McpResult {
        debug!("register_instructor: {params:?}");

        let instructor = self
            .onboarding
            .register_instructor(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to register instructor", &e))?;

        text(CreateResult::new(instructor))
    }

    pub async fn list_instructors(
        &self,
        Parameters(params): Parameters<ListInstructors>,
    ) -> McpResult {
        debug!("list_instructors: {params:?}");

        let summaries = self
            .onboarding
            .list_instructors(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list instructors", &e))?;

        if summaries.is_empty() {
            text(&summaries)
        } else {
            text(format!("# Instructors ({})\n\n{summaries}", summaries.len()))
        }
    }

    pub async fn show_instructor(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_instructor: {params:?}");

        let id = params.as_ref().id;
        let instructor = self
            .onboarding
            .get_instructor(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get instructor", &e))?
            .ok_or_else(|| not_found("Instructor", id))?;

        text(instructor)
    }

    pub async fn delete_instructor(
        &self,
        Parameters(params): Parameters<DeleteInstructor>,
    ) -> McpResult {
        debug!("delete_instructor: {params:?}");

        let id = params.as_ref().id;
        let instructor = self
            .onboarding
            .get_instructor(&core::Id { id })
            .await
            .map_err(|e| to_mcp_error("Failed to get instructor", &e))?
            .ok_or_else(|| not_found("Instructor", id))?;

        self.onboarding
            .delete_instructor(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete instructor", &e))?;

        text(DeleteResult::new(instructor))
    }

    pub async fn show_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_step: {params:?}");

        let id = params.as_ref().id;
        let step = self
            .onboarding
            .get_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get step", &e))?
            .ok_or_else(|| not_found("Step", id))?;

        text(step)
    }

    pub async fn show_task(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_task: {params:?}");

        let id = params.as_ref().id;
        let task = self
            .onboarding
            .get_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get task", &e))?
            .ok_or_else(|| not_found("Task", id))?;

        text(task)
    }

    pub async fn add_task(&self, Parameters(params): Parameters<AddTask>) -> McpResult {
        debug!("add_task: {params:?}");

        let task = self
            .onboarding
            .add_task(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;

        text(CreateResult::new(task))
    }

    pub async fn update_task(&self, Parameters(params): Parameters<UpdateTask>) -> McpResult {
        debug!("update_task: {params:?}");

        let inner = params.as_ref();
        let step = self
            .onboarding
            .update_task(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to update task", &e))?;

        let change = format!("Task {} status: {}", inner.id, inner.status);
        text(UpdateResult::with_changes(step, vec![change]))
    }

    pub async fn set_task_enabled(
        &self,
        Parameters(params): Parameters<SetTaskEnabled>,
    ) -> McpResult {
        debug!("set_task_enabled: {params:?}");

        let inner = params.as_ref();
        let step = self
            .onboarding
            .set_task_enabled(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to change task enablement", &e))?;

        let change = format!(
            "Task {} {}",
            inner.id,
            if inner.enabled { "enabled" } else { "disabled" }
        );
        text(UpdateResult::with_changes(step, vec![change]))
    }
}
