use lifeflow_core::features::Scratchpad;

use crate::cli::NoteCommands;
use crate::commands::common::{format_date, Connection};
use crate::error::CliError;

pub async fn run_notes(command: Option<NoteCommands>, connection: &Connection) -> Result<(), CliError> {
    let signed_in = connection.signed_in().await?;
    let mut pad = Scratchpad::new(signed_in.store, &signed_in.user);
    pad.fetch().await?;

    match command.unwrap_or(NoteCommands::Show) {
        NoteCommands::Show => match pad.note() {
            Some(note) => {
                println!("{}", note.content);
                println!();
                println!("Last saved {}", format_date(note.updated_at));
            }
            None => println!("No note yet. Save one with `lifeflow notes save <text>`."),
        },
        NoteCommands::Save { content } => {
            if content.is_empty() {
                return Err(CliError::EmptyContent);
            }
            pad.save(&content.join(" ")).await?;
            println!("Note saved!");
        }
    }
    Ok(())
}
