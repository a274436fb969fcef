//! onboard CLI application
//!
//! Command-line interface and MCP server for instructor onboarding.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, OnboardMcpServer};
use onboard_core::{params::ListInstructors, OnboardingBuilder};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        json,
        command,
    } = Args::parse();

    let onboarding = OnboardingBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize onboarding database")?;

    info!("onboard started");

    let cli = || Cli::new(onboarding.clone(), TerminalRenderer::new(!no_color), json);

    match command {
        Some(Module { command }) => cli().handle_module_command(command).await,
        Some(Instructor { command }) => cli().handle_instructor_command(command).await,
        Some(Step { command }) => cli().handle_step_command(command).await,
        Some(Task { command }) => cli().handle_task_command(command).await,
        Some(Serve) => {
            info!("Starting onboard MCP server");
            run_stdio_server(OnboardMcpServer::new(onboarding.clone()))
                .await
                .context("MCP server failed")
        }
        None => cli().list_instructors(&ListInstructors::default()).await,
    }
}
