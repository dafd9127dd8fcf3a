use lifeflow_core::SessionState;

use crate::cli::AuthCommands;
use crate::commands::common::Connection;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, connection: &Connection) -> Result<(), CliError> {
    let session = connection.session().await?;
    match command {
        AuthCommands::Login { email, password } => {
            let user = session.sign_in(&email, &password).await?;
            let email_label = user.email.as_deref().unwrap_or("(no email)");
            println!("Signed in as {email_label}");
        }
        AuthCommands::Signup { email, password } => {
            let user = session.sign_up(&email, &password).await?;
            let email_label = user.email.as_deref().unwrap_or("(no email)");
            println!("Account created. Signed in as {email_label}");
        }
        AuthCommands::Status => match session.state() {
            SessionState::Authenticated(user) => {
                let email_label = user.email.as_deref().unwrap_or("(no email)");
                println!("Signed in as {email_label}");
            }
            SessionState::Anonymous | SessionState::Loading => println!("Not signed in."),
        },
        AuthCommands::Logout => {
            session.sign_out().await;
            println!("Signed out");
        }
    }
    Ok(())
}
