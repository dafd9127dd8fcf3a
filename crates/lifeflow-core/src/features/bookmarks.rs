//! Saved links.

use crate::auth::AuthUser;
use crate::error::{Result, ValidationError};
use crate::models::{Bookmark, NewBookmark, RowId};
use crate::remote::{RowStore, Table};
use crate::util::{ensure_url_scheme, normalize_required_text};

use super::ScopedMirror;

pub struct BookmarkShelf<R> {
    mirror: ScopedMirror<R, Bookmark>,
}

impl<R: RowStore> BookmarkShelf<R> {
    pub fn new(store: R, user: &AuthUser) -> Self {
        Self {
            mirror: ScopedMirror::new(store, Table::Bookmarks, user.id.clone()),
        }
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        self.mirror.rows()
    }

    pub async fn fetch(&mut self) -> Result<&[Bookmark]> {
        let query = self.mirror.scoped_query().order_desc("created_at");
        self.mirror.fetch(&query).await
    }

    /// Add a link; URLs without an http(s) scheme get `https://`.
    pub async fn add(&mut self, title: &str, url: &str) -> Result<&Bookmark> {
        let title = normalize_required_text(title).ok_or(ValidationError::EmptyText("Title"))?;
        if url.trim().is_empty() {
            return Err(ValidationError::EmptyUrl.into());
        }
        let url = ensure_url_scheme(url);
        let owner = self.mirror.owner().to_owned();
        self.mirror
            .create(&NewBookmark {
                user_id: &owner,
                title: &title,
                url: &url,
            })
            .await
    }

    pub async fn delete(&mut self, id: RowId) -> Result<()> {
        self.mirror.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{MemoryRowStore, Operation};
    use crate::Error;

    fn user() -> AuthUser {
        AuthUser {
            id: "user-1".to_string(),
            email: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn bare_domain_gets_https_scheme() {
        let mut shelf = BookmarkShelf::new(MemoryRowStore::new(), &user());

        let bookmark = shelf.add("Example", "example.com").await.unwrap();
        assert_eq!(bookmark.url, "https://example.com");
    }

    #[tokio::test]
    async fn existing_scheme_is_kept() {
        let mut shelf = BookmarkShelf::new(MemoryRowStore::new(), &user());

        let secure = shelf.add("Docs", " https://docs.rs ").await.unwrap();
        assert_eq!(secure.url, "https://docs.rs");
        let plain = shelf.add("Local", "http://localhost:3000").await.unwrap();
        assert_eq!(plain.url, "http://localhost:3000");
    }

    #[tokio::test]
    async fn empty_fields_are_rejected_locally() {
        let store = MemoryRowStore::new();
        let mut shelf = BookmarkShelf::new(store.clone(), &user());

        assert!(matches!(
            shelf.add("", "example.com").await.unwrap_err(),
            Error::Validation(ValidationError::EmptyText("Title"))
        ));
        assert!(matches!(
            shelf.add("Example", "  ").await.unwrap_err(),
            Error::Validation(ValidationError::EmptyUrl)
        ));
        assert_eq!(store.call_count(Operation::Insert, Table::Bookmarks), 0);
    }

    #[tokio::test]
    async fn delete_of_missing_bookmark_is_ok() {
        let mut shelf = BookmarkShelf::new(MemoryRowStore::new(), &user());
        shelf.add("Example", "example.com").await.unwrap();

        shelf.delete(RowId::new()).await.unwrap();
        assert_eq!(shelf.bookmarks().len(), 1);
    }

    #[tokio::test]
    async fn failed_delete_keeps_bookmark() {
        let store = MemoryRowStore::new();
        let mut shelf = BookmarkShelf::new(store.clone(), &user());
        let id = shelf.add("Example", "example.com").await.unwrap().id;

        store.fail_next(Operation::Delete);
        assert!(shelf.delete(id).await.is_err());
        assert_eq!(shelf.bookmarks().len(), 1);
        assert_eq!(store.rows(Table::Bookmarks).len(), 1);
    }
}
