//! Account details shown on the profile page.

use crate::auth::AuthUser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub email: String,
    pub display_name: String,
    pub short_id: String,
    pub member_since: String,
}

impl Profile {
    pub fn from_user(user: &AuthUser) -> Self {
        let email = user.email.clone().unwrap_or_default();
        let display_name = email.split('@').next().unwrap_or_default().to_string();
        let short_id = format!("{}...", user.id.chars().take(8).collect::<String>());
        let member_since = user
            .created_at
            .map_or_else(|| "N/A".to_string(), |created| created.format("%B %-d, %Y").to_string());

        Self {
            email,
            display_name,
            short_id,
            member_since,
        }
    }

    /// Avatar letter: first letter of the email, or `U`.
    pub fn initial(&self) -> char {
        self.email
            .chars()
            .next()
            .map_or('U', |letter| letter.to_ascii_uppercase())
    }
}
