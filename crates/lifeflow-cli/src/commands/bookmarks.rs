use lifeflow_core::features::BookmarkShelf;

use crate::cli::BookmarkCommands;
use crate::commands::common::{format_bookmark_lines, print_json, resolve_row_id, Connection};
use crate::error::CliError;

pub async fn run_bookmarks(
    command: Option<BookmarkCommands>,
    connection: &Connection,
) -> Result<(), CliError> {
    let signed_in = connection.signed_in().await?;
    let mut shelf = BookmarkShelf::new(signed_in.store, &signed_in.user);
    shelf.fetch().await?;

    match command.unwrap_or(BookmarkCommands::List { json: false }) {
        BookmarkCommands::List { json } => {
            if json {
                return print_json(shelf.bookmarks());
            }
            if shelf.bookmarks().is_empty() {
                println!("No bookmarks yet.");
            }
            for line in format_bookmark_lines(shelf.bookmarks()) {
                println!("{line}");
            }
        }
        BookmarkCommands::Add { title, url } => {
            let bookmark = shelf.add(&title, &url).await?;
            println!("Bookmark added! {} -> {}", bookmark.title, bookmark.url);
        }
        BookmarkCommands::Delete { id } => {
            let id = resolve_row_id(shelf.bookmarks(), &id)?;
            shelf.delete(id).await?;
            println!("Bookmark deleted");
        }
    }
    Ok(())
}
