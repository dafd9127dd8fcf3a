use lifeflow_core::features::HabitBoard;
use lifeflow_core::Habit;

use crate::cli::HabitCommands;
use crate::commands::common::{today, Connection};
use crate::error::CliError;

pub async fn run_habits(command: Option<HabitCommands>, connection: &Connection) -> Result<(), CliError> {
    let signed_in = connection.signed_in().await?;
    let mut board = HabitBoard::new(signed_in.store, &signed_in.user, today());
    board.fetch().await?;

    if let Some(HabitCommands::Toggle { habit }) = command {
        let completed = board.toggle(habit).await?;
        let state = if completed { "done" } else { "not done" };
        println!("{habit} marked {state} for today");
    }

    println!("{}", board.today().format("%A, %B %-d"));
    for habit in Habit::ALL {
        let check = if board.is_completed(habit) { "[x]" } else { "[ ]" };
        println!("{check} {habit}");
    }
    let progress = board.progress();
    println!(
        "{}/{} completed ({}%)",
        progress.completed,
        progress.total,
        progress.percent()
    );
    Ok(())
}
