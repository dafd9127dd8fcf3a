//! LifeFlow CLI - personal productivity from the terminal
//!
//! Each page of the app is a subcommand; data pages need a signed-in session.

mod auth;
mod cli;
mod commands;
mod error;
mod pages;


use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::bookmarks::run_bookmarks;
use crate::commands::common::Connection;
use crate::commands::completions::run_completions;
use crate::commands::countdown::run_countdown;
use crate::commands::dashboard::run_dashboard;
use crate::commands::expenses::run_expenses;
use crate::commands::habits::run_habits;
use crate::commands::notes::run_notes;
use crate::commands::pages::{run_faq, run_pages};
use crate::commands::profile::run_profile;
use crate::commands::tasks::run_tasks;
use crate::commands::timer::run_timer;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let directive: tracing_subscriber::filter::Directive = "lifeflow=info"
        .parse()
        .map_err(|error: tracing_subscriber::filter::ParseError| CliError::LogFilter(error.to_string()))?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    let cli = Cli::parse();
    let connection = Connection::new(cli.supabase_url, cli.supabase_anon_key);

    match cli.command {
        Commands::Auth { command } => run_auth(command, &connection).await?,
        Commands::Dashboard => run_dashboard(&connection).await?,
        Commands::Tasks { command } => run_tasks(command, &connection).await?,
        Commands::Expenses { command } => run_expenses(command, &connection).await?,
        Commands::Habits { command } => run_habits(command, &connection).await?,
        Commands::Notes { command } => run_notes(command, &connection).await?,
        Commands::Bookmarks { command } => run_bookmarks(command, &connection).await?,
        Commands::Profile { sign_out } => run_profile(sign_out, &connection).await?,
        Commands::Countdown { command } => run_countdown(command).await?,
        Commands::Timer { notify } => run_timer(notify).await?,
        Commands::Pages => run_pages(),
        Commands::Faq => run_faq(),
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
