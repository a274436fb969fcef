//! MCP server implementation
//!
//! Exposes the onboarding operations as Model Context Protocol tools over
//! stdio, so AI assistants can register instructors and track their progress.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use onboard_core::Onboarding;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddTask, DeleteInstructor, Id, ListInstructors, McpResult, RegisterInstructor, ResolveModule,
    SetTaskEnabled, ShowModule, StepTypeQuery, UpdateTask,
};

const INSTRUCTIONS: &str = r#"onboard tracks the onboarding of new instructors.

## Core Concepts
- **Instructor type**: newbie, experienced or re_contract
- **Timing**: comfortable when the start date is 14 or more days away, urgent otherwise
- **Module**: A-F, chosen from instructor type and timing (A Nurturing, B Survival, C Alignment, D Quick Adaptation, E Update, F Minimal Check)
- **Steps**: six onboarding phases; each module runs a step as pm_led, self_check, delay or skip. Skipped steps are not created.
- **Tasks**: units of work inside a step with status pending, in_progress, completed or skipped

## Progress Rules
- Disabled tasks are ignored entirely.
- A step is completed when every enabled task is completed or skipped.
- The progress percentage counts only completed tasks, so a step can be completed below 100%.

## Workflow
1. Preview with `resolve_module`, then `register_instructor`
2. Review with `show_instructor` or `list_instructors`
3. Read a task's version with `show_task`, then record work with `update_task` and `set_task_enabled`; pass `expected_version` to avoid overwriting concurrent changes"#;

/// MCP server for onboarding
#[derive(Clone)]
pub struct OnboardMcpServer {
    onboarding: Arc<Onboarding>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl OnboardMcpServer {
    pub fn new(onboarding: Onboarding) -> Self {
        Self {
            onboarding: Arc::new(onboarding),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.onboarding.clone())
    }

    #[tool(
        name = "resolve_module",
        description = "Preview the onboarding module for an instructor without registering them. Requires instructor_type ('newbie', 'experienced', 're_contract') and start_date (YYYY-MM-DD); optional as_of date replaces today. Returns timing, module and the module's step table."
    )]
    async fn resolve_module(&self, params: Parameters<ResolveModule>) -> McpResult {
        self.handlers().resolve_module(params).await
    }

    #[tool(
        name = "show_module",
        description = "Show how each of the six onboarding steps runs under a module (PM-led, self-check, delayed or skipped). Accepts a letter A-F or a module name."
    )]
    async fn show_module(&self, params: Parameters<ShowModule>) -> McpResult {
        self.handlers().show_module(params).await
    }

    #[tool(
        name = "step_type",
        description = "Look up the step type for one step of a module. The module is required; a missing or unknown step number resolves to self-check."
    )]
    async fn step_type(&self, params: Parameters<StepTypeQuery>) -> McpResult {
        self.handlers().step_type(params).await
    }

    #[tool(
        name = "register_instructor",
        description = "Register an instructor. Requires name, email (unique), instructor_type and start_date. The module is resolved automatically unless 'module' is given. All steps the module runs are created with default tasks."
    )]
    async fn register_instructor(&self, params: Parameters<RegisterInstructor>) -> McpResult {
        self.handlers().register_instructor(params).await
    }

    #[tool(
        name = "list_instructors",
        description = "List instructors with completed/total step counts, newest first. Optionally filter by module or instructor_type."
    )]
    async fn list_instructors(&self, params: Parameters<ListInstructors>) -> McpResult {
        self.handlers().list_instructors(params).await
    }

    #[tool(
        name = "show_instructor",
        description = "Show an instructor with every step, its progress and its tasks including task IDs and versions."
    )]
    async fn show_instructor(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_instructor(params).await
    }

    #[tool(
        name = "delete_instructor",
        description = "Permanently delete an instructor with all steps and tasks. Requires confirmed=true. Cannot be undone."
    )]
    async fn delete_instructor(&self, params: Parameters<DeleteInstructor>) -> McpResult {
        self.handlers().delete_instructor(params).await
    }

    #[tool(
        name = "show_step",
        description = "Show a single onboarding step with its type, status, progress and tasks."
    )]
    async fn show_step(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_step(params).await
    }

    #[tool(
        name = "show_task",
        description = "Show a single task with its status, kind, enablement and current version. Use the version as expected_version for update_task or set_task_enabled."
    )]
    async fn show_task(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "add_task",
        description = "Add a pending task to a step. Requires step_id and title; kind is 'document', 'video', 'file_upload' or 'checklist' (default). A completed step becomes in progress again."
    )]
    async fn add_task(&self, params: Parameters<AddTask>) -> McpResult {
        self.handlers().add_task(params).await
    }

    #[tool(
        name = "update_task",
        description = "Set a task's status ('pending', 'in_progress', 'completed', 'skipped') and return the recomputed step. Pass expected_version to fail instead of overwriting a concurrent change."
    )]
    async fn update_task(&self, params: Parameters<UpdateTask>) -> McpResult {
        self.handlers().update_task(params).await
    }

    #[tool(
        name = "set_task_enabled",
        description = "Enable or disable a task and return the recomputed step. Disabled tasks do not count toward progress. Pass expected_version to guard against concurrent changes."
    )]
    async fn set_task_enabled(&self, params: Parameters<SetTaskEnabled>) -> McpResult {
        self.handlers().set_task_enabled(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for OnboardMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: OnboardMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting onboard MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
