use lifeflow_core::features::TaskList;

use crate::cli::TaskCommands;
use crate::commands::common::{format_task_lines, join_words, print_json, resolve_row_id, Connection};
use crate::error::CliError;

pub async fn run_tasks(command: Option<TaskCommands>, connection: &Connection) -> Result<(), CliError> {
    let signed_in = connection.signed_in().await?;
    let mut list = TaskList::new(signed_in.store, &signed_in.user);
    list.fetch().await?;

    match command.unwrap_or(TaskCommands::List { json: false }) {
        TaskCommands::List { json } => {
            if json {
                return print_json(list.tasks());
            }
            if list.tasks().is_empty() {
                println!("No tasks yet. Add one with `lifeflow tasks add <title>`.");
                return Ok(());
            }
            for line in format_task_lines(list.tasks()) {
                println!("{line}");
            }
            println!();
            println!("{}", list.summary());
        }
        TaskCommands::Add { title } => {
            let title = join_words(&title).unwrap_or_default();
            let task = list.add(&title).await?;
            println!("Task added! {}", task.title);
        }
        TaskCommands::Toggle { id } => {
            let id = resolve_row_id(list.tasks(), &id)?;
            let task = list.toggle(id).await?;
            let state = if task.completed { "done" } else { "not done" };
            println!("Marked '{}' {state}", task.title);
        }
        TaskCommands::Delete { id } => {
            let id = resolve_row_id(list.tasks(), &id)?;
            list.delete(id).await?;
            println!("Task deleted");
        }
    }
    Ok(())
}
