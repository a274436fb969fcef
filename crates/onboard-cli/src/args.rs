use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{InstructorCommands, ModuleCommands, StepCommands, TaskCommands};

/// Instructor onboarding tracker
///
/// Classifies incoming instructors into one of six onboarding modules,
/// materializes the onboarding steps that module runs, and tracks progress as
/// tasks are completed, skipped or disabled. Runs as a command-line tool or as
/// an MCP (Model Context Protocol) server for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "onboard")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/onboard/onboard.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// Without a command, registered instructors are listed.
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and inspect onboarding modules
    #[command(alias = "m")]
    Module {
        #[command(subcommand)]
        command: ModuleCommands,
    },
    /// Register and manage instructors
    #[command(alias = "i")]
    Instructor {
        #[command(subcommand)]
        command: InstructorCommands,
    },
    /// Inspect onboarding steps
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Add and update tasks within steps
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Start the MCP server
    Serve,
}
