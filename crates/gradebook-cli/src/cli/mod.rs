//! CLI for the gradebook console.

mod commands;
mod render;
mod shell;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gradebook_core::config;
use gradebook_core::Console;

use commands::{
    run_completions, run_grades, run_login, run_probe, run_shell, run_stats, run_students,
    run_username,
};

/// Top-level CLI for the gradebook console.
#[derive(Debug, Parser)]
#[command(name = "gradebook")]
#[command(about = "Gradebook: console for the student grade-management service", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub credentials: Credentials,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Service URL and login used by one-shot commands.
#[derive(Debug, Clone, Default, Args)]
pub struct Credentials {
    /// Service base URL (overrides `api_url` in config.toml).
    #[arg(long, global = true, env = "GRADEBOOK_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Login name for commands that need a session.
    #[arg(long, short = 'u', global = true, env = "GRADEBOOK_USERNAME")]
    pub username: Option<String>,

    /// Password for commands that need a session.
    #[arg(
        long,
        short = 'p',
        global = true,
        env = "GRADEBOOK_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check whether the service is reachable.
    Probe,

    /// Log in and show what the session loads (students, own grades, statistics).
    Login,

    /// Manage students (Admin).
    Students {
        #[command(subcommand)]
        action: StudentsCommand,
    },

    /// Record grades and look up grade reports.
    Grades {
        #[command(subcommand)]
        action: GradesCommand,
    },

    /// Show statistics, optionally for one subject.
    Stats {
        /// Restrict statistics to this subject.
        #[arg(long)]
        subject: Option<String>,
    },

    /// Print the username the service derives from a display name.
    Username {
        /// Display name; several words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Interactive session: log in once and run commands against it.
    Shell,

    /// Generate a shell completion script.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum StudentsCommand {
    /// List all students with their derived usernames.
    List,

    /// Create a student.
    Add {
        /// Display name.
        #[arg(long)]
        name: String,
        /// School-issued student ID.
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        email: String,
        /// Initial password for the student (at least 3 characters).
        #[arg(long, value_name = "PASSWORD")]
        new_password: String,
    },

    /// Update a student by database id.
    Update {
        /// Database id.
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        email: String,
        /// New password; omit to keep the current one.
        #[arg(long, value_name = "PASSWORD")]
        new_password: Option<String>,
    },

    /// Delete a student by database id.
    Delete {
        /// Database id.
        id: i64,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum GradesCommand {
    /// Record a grade (Admin).
    Add {
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        subject: String,
        #[arg(long, allow_hyphen_values = true)]
        score: String,
        #[arg(long, allow_hyphen_values = true)]
        max_score: String,
    },

    /// Show the logged-in student's own grades.
    Mine,

    /// Show grades by username.
    User {
        username: String,
    },

    /// Show grades by database id.
    Id {
        id: i64,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        if let Some(url) = &cli.credentials.api_url {
            cfg.api_url = url.clone();
        }
        tracing::debug!("loaded config: {:?}", cfg);
        let mut console = Console::from_config(cfg);
        let creds = &cli.credentials;

        match cli.command {
            CliCommand::Probe => run_probe(&mut console)?,
            CliCommand::Login => run_login(&mut console, creds)?,
            CliCommand::Students { action } => run_students(&mut console, creds, action)?,
            CliCommand::Grades { action } => run_grades(&mut console, creds, action)?,
            CliCommand::Stats { subject } => run_stats(&mut console, subject)?,
            CliCommand::Username { name } => run_username(&mut console, &name.join(" "))?,
            CliCommand::Shell => run_shell(console, creds)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
