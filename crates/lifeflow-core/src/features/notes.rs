//! Single free-text scratchpad per user.

use chrono::Utc;

use crate::auth::AuthUser;
use crate::error::{Result, ValidationError};
use crate::models::{NewNote, Note, NotePatch};
use crate::remote::{RowStore, Table};

use super::ScopedMirror;

pub struct Scratchpad<R> {
    mirror: ScopedMirror<R, Note>,
}

impl<R: RowStore> Scratchpad<R> {
    pub fn new(store: R, user: &AuthUser) -> Self {
        Self {
            mirror: ScopedMirror::new(store, Table::Notes, user.id.clone()),
        }
    }

    pub fn note(&self) -> Option<&Note> {
        self.mirror.rows().first()
    }

    /// Current text; empty when the user has never saved a note.
    pub fn content(&self) -> &str {
        self.note().map_or("", |note| note.content.as_str())
    }

    pub async fn fetch(&mut self) -> Result<Option<&Note>> {
        let query = self.mirror.scoped_query().limit(1);
        let rows = self.mirror.fetch(&query).await?;
        Ok(rows.first())
    }

    /// Update the known note, or create it the first time.
    ///
    /// When no note has been loaded yet the owner's row is looked up first,
    /// so a second device never creates a duplicate.
    pub async fn save(&mut self, content: &str) -> Result<&Note> {
        if self.note().is_none() {
            self.fetch().await?;
        }

        if let Some(id) = self.note().map(|note| note.id) {
            return self
                .mirror
                .update(
                    id,
                    &NotePatch {
                        content,
                        updated_at: Utc::now(),
                    },
                )
                .await;
        }

        if content.trim().is_empty() {
            return Err(ValidationError::EmptyText("Note").into());
        }
        let owner = self.mirror.owner().to_owned();
        self.mirror
            .create(&NewNote {
                user_id: &owner,
                content,
            })
            .await
    }
}
