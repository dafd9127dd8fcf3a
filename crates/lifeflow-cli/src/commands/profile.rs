use lifeflow_core::features::Profile;

use crate::commands::common::Connection;
use crate::error::CliError;

pub async fn run_profile(sign_out: bool, connection: &Connection) -> Result<(), CliError> {
    let signed_in = connection.signed_in().await?;
    let profile = Profile::from_user(&signed_in.user);

    for line in format_profile_lines(&profile) {
        println!("{line}");
    }

    if sign_out {
        signed_in.session.sign_out().await;
        println!("Signed out");
    }
    Ok(())
}

pub fn format_profile_lines(profile: &Profile) -> Vec<String> {
    vec![
        format!("({}) {}", profile.initial(), profile.display_name),
        format!("Email         {}", profile.email),
        format!("User ID       {}", profile.short_id),
        format!("Member Since  {}", profile.member_since),
    ]
}
