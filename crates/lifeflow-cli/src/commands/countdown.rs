use std::time::Duration;

use chrono::Utc;
use lifeflow_core::features::countdown::Remaining;
use lifeflow_core::features::Countdown;

use crate::cli::CountdownCommands;
use crate::commands::common::{open_local_storage, today};
use crate::error::CliError;

const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

pub async fn run_countdown(command: Option<CountdownCommands>) -> Result<(), CliError> {
    let mut storage = open_local_storage()?;
    let mut countdown = Countdown::load(&mut storage, today())?;

    match command.unwrap_or(CountdownCommands::Show) {
        CountdownCommands::Show => print_countdown(&countdown),
        CountdownCommands::Set { date } => {
            countdown.set_target(&mut storage, date, today())?;
            println!("Exam date set to {}", date.format("%B %-d, %Y"));
            print_countdown(&countdown);
        }
        CountdownCommands::Watch => {
            let mut interval = tokio::time::interval(REFRESH_INTERVAL);
            loop {
                tokio::select! {
                    _ = interval.tick() => print_countdown(&countdown),
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
        }
    }
    Ok(())
}

fn print_countdown(countdown: &Countdown) {
    let remaining = countdown.remaining(Utc::now());
    println!("Exam: {}", countdown.target().format("%A, %B %-d, %Y"));
    println!("{}", format_remaining(remaining));
    println!("{}", remaining.message());
}

pub fn format_remaining(remaining: Remaining) -> String {
    format!(
        "{} days  {} hours  {} minutes",
        remaining.days, remaining.hours, remaining.minutes
    )
}
