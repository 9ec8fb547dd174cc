pub mod daemon;
pub mod error;
pub mod interfaces;
pub mod providers;
pub mod todo;

pub use crate::error::{Result, TodoApiError};
pub use crate::interfaces::store::TodoStore;
pub use crate::todo::{CreateTodo, Todo, UpdateTodo};
