//! Todo list.

use crate::auth::AuthUser;
use crate::error::{Error, Result, ValidationError};
use crate::models::{NewTask, RowId, Task, TaskPatch};
use crate::remote::{RowStore, Table};
use crate::util::normalize_required_text;

use super::ScopedMirror;

pub struct TaskList<R> {
    mirror: ScopedMirror<R, Task>,
}

impl<R: RowStore> TaskList<R> {
    pub fn new(store: R, user: &AuthUser) -> Self {
        Self {
            mirror: ScopedMirror::new(store, Table::Tasks, user.id.clone()),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.mirror.rows()
    }

    /// Load the user's tasks, newest first.
    pub async fn fetch(&mut self) -> Result<&[Task]> {
        let query = self.mirror.scoped_query().order_desc("created_at");
        self.mirror.fetch(&query).await
    }

    pub async fn add(&mut self, title: &str) -> Result<&Task> {
        let title = normalize_required_text(title).ok_or(ValidationError::EmptyText("Task"))?;
        let owner = self.mirror.owner().to_owned();
        self.mirror
            .create(&NewTask {
                user_id: &owner,
                title: &title,
            })
            .await
    }

    /// Flip `completed` on the remote row, then mirror the result.
    pub async fn toggle(&mut self, id: RowId) -> Result<&Task> {
        let completed = match self.mirror.get(id) {
            Some(task) => task.completed,
            None => return Err(Error::RowNotFound(id)),
        };
        self.mirror
            .update(id, &TaskPatch { completed: !completed })
            .await
    }

    pub async fn delete(&mut self, id: RowId) -> Result<()> {
        self.mirror.remove(id).await
    }

    pub fn completed_count(&self) -> usize {
        self.tasks().iter().filter(|task| task.completed).count()
    }

    /// e.g. "2 of 5 tasks completed"
    pub fn summary(&self) -> String {
        format!(
            "{} of {} tasks completed",
            self.completed_count(),
            self.tasks().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::remote::{MemoryRowStore, Operation};

    fn user() -> AuthUser {
        AuthUser {
            id: "user-1".to_string(),
            email: Some("student@example.com".to_string()),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn add_toggle_delete_scenario() {
        let store = MemoryRowStore::new();
        let mut list = TaskList::new(store.clone(), &user());
        list.fetch().await.unwrap();

        let task = list.add("Read chapter 3").await.unwrap().clone();
        assert_eq!(task.title, "Read chapter 3");
        assert_eq!(task.user_id, "user-1");
        assert!(!task.completed);
        assert_eq!(list.tasks().len(), 1);

        let toggled = list.toggle(task.id).await.unwrap();
        assert!(toggled.completed);
        assert_eq!(list.summary(), "1 of 1 tasks completed");

        list.delete(task.id).await.unwrap();
        assert!(list.tasks().is_empty());
        assert!(store.rows(Table::Tasks).is_empty());
    }

    #[tokio::test]
    async fn blank_title_is_rejected_without_remote_call() {
        let store = MemoryRowStore::new();
        let mut list = TaskList::new(store.clone(), &user());

        let error = list.add("   ").await.unwrap_err();
        assert!(matches!(
            error,
            Error::Validation(ValidationError::EmptyText("Task"))
        ));
        assert_eq!(store.call_count(Operation::Insert, Table::Tasks), 0);
    }

    #[tokio::test]
    async fn newest_task_comes_first() {
        let store = MemoryRowStore::new();
        let mut list = TaskList::new(store, &user());
        list.add("first").await.unwrap();
        list.add("second").await.unwrap();

        let titles = list
            .fetch()
            .await
            .unwrap()
            .iter()
            .map(|task| task.title.clone())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn failed_insert_leaves_list_unchanged() {
        let store = MemoryRowStore::new();
        let mut list = TaskList::new(store.clone(), &user());
        list.add("kept").await.unwrap();

        store.fail_next(Operation::Insert);
        assert!(list.add("lost").await.is_err());
        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.completed_count(), 0);
    }

    #[tokio::test]
    async fn failed_delete_keeps_row() {
        let store = MemoryRowStore::new();
        let mut list = TaskList::new(store.clone(), &user());
        let id = list.add("still here").await.unwrap().id;

        store.fail_next(Operation::Delete);
        assert!(list.delete(id).await.is_err());
        assert_eq!(list.tasks().len(), 1);
        assert_eq!(store.rows(Table::Tasks).len(), 1);
    }

    #[tokio::test]
    async fn failed_toggle_keeps_completion() {
        let store = MemoryRowStore::new();
        let mut list = TaskList::new(store.clone(), &user());
        let id = list.add("Essay").await.unwrap().id;

        store.fail_next(Operation::Update);
        assert!(list.toggle(id).await.is_err());
        assert_eq!(list.completed_count(), 0);
    }
}
