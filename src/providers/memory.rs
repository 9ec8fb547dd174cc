use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, TodoApiError};
use crate::interfaces::store::TodoStore;
use crate::todo::{now_ts, CreateTodo, Todo, UpdateTodo};

/// In-memory twin of the Mongo store, used by the router tests and
/// usable anywhere a throwaway backend is enough.
#[derive(Default)]
pub struct MemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
    next_id: AtomicU64,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list(&self) -> Result<Vec<Todo>> {
        // Creation time is monotone with insertion, so reverse insertion
        // order is newest first.
        let guard = self.todos.read().await;
        Ok(guard.iter().rev().cloned().collect())
    }

    async fn create(&self, input: CreateTodo) -> Result<Todo> {
        let seq = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let todo = Todo {
            id: format!("{seq:024x}"),
            title: input.title,
            completed: input.completed,
            created_at: now_ts(),
        };
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: &str) -> Result<Todo> {
        let guard = self.todos.read().await;
        guard
            .iter()
            .find(|todo| todo.id == id)
            .cloned()
            .ok_or_else(|| TodoApiError::NotFound("task not found".to_string()))
    }

    async fn update(&self, id: &str, input: UpdateTodo) -> Result<Todo> {
        let mut guard = self.todos.write().await;
        let todo = guard
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| TodoApiError::NotFound("task not found".to_string()))?;
        if let Some(title) = input.title {
            todo.title = title;
        }
        if let Some(completed) = input.completed {
            todo.completed = completed;
        }
        Ok(todo.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut guard = self.todos.write().await;
        let pos = guard
            .iter()
            .position(|todo| todo.id == id)
            .ok_or_else(|| TodoApiError::NotFound("task not found".to_string()))?;
        guard.remove(pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> CreateTodo {
        CreateTodo {
            title: title.to_string(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn create_assigns_unique_ids_and_timestamps() {
        let store = MemoryTodoStore::new();
        let first = store.create(input("first")).await.unwrap();
        let second = store.create(input("second")).await.unwrap();
        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert!(second.created_at >= first.created_at);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = MemoryTodoStore::new();
        store.create(input("first")).await.unwrap();
        store.create(input("second")).await.unwrap();
        let todos = store.list().await.unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].title, "second");
        assert_eq!(todos[1].title, "first");
    }

    #[tokio::test]
    async fn update_merges_supplied_fields() {
        let store = MemoryTodoStore::new();
        let created = store.create(input("keep title")).await.unwrap();
        let updated = store
            .update(
                &created.id,
                UpdateTodo {
                    title: None,
                    completed: Some(true),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "keep title");
        assert!(updated.completed);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.id, created.id);
    }

    #[tokio::test]
    async fn delete_is_terminal() {
        let store = MemoryTodoStore::new();
        let created = store.create(input("gone")).await.unwrap();
        store.delete(&created.id).await.unwrap();
        assert!(matches!(
            store.get(&created.id).await,
            Err(TodoApiError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(&created.id).await,
            Err(TodoApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = MemoryTodoStore::new();
        assert!(matches!(
            store.get("missing").await,
            Err(TodoApiError::NotFound(_))
        ));
        assert!(matches!(
            store.update("missing", UpdateTodo::default()).await,
            Err(TodoApiError::NotFound(_))
        ));
    }
}
