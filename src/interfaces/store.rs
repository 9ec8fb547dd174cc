use async_trait::async_trait;

use crate::error::Result;
use crate::todo::{CreateTodo, Todo, UpdateTodo};

/// Storage seam for Todo records. Handlers hold an `Arc<dyn TodoStore>`
/// so the backend can be swapped without touching the HTTP layer.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All records, newest first by creation time.
    async fn list(&self) -> Result<Vec<Todo>>;

    /// Inserts a record; the store assigns id and creation timestamp.
    async fn create(&self, input: CreateTodo) -> Result<Todo>;

    async fn get(&self, id: &str) -> Result<Todo>;

    /// Replaces the supplied fields on the matching record and returns
    /// the updated record.
    async fn update(&self, id: &str, input: UpdateTodo) -> Result<Todo>;

    async fn delete(&self, id: &str) -> Result<()>;
}
