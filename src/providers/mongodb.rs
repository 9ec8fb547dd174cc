use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{ClientOptions, FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoApiError};
use crate::interfaces::store::TodoStore;
use crate::todo::{now_ts, CreateTodo, Todo, UpdateTodo};

const COLLECTION: &str = "todos";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TodoDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    completed: bool,
    #[serde(rename = "createdAt")]
    created_at: i64,
}

impl TodoDoc {
    fn into_todo(self) -> Todo {
        Todo {
            id: self.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: self.title,
            completed: self.completed,
            created_at: self.created_at,
        }
    }
}

pub struct MongoTodoStore {
    todos: Collection<TodoDoc>,
}

impl MongoTodoStore {
    /// Parses the connection string and pings the database, so a process
    /// with unreachable storage fails here instead of serving requests
    /// against a dead handle.
    pub async fn connect(connection_string: &str, database: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(connection_string)
            .await
            .map_err(|e| TodoApiError::Config(e.to_string()))?;
        options.app_name = Some("todo-api".to_string());
        let client =
            Client::with_options(options).map_err(|e| TodoApiError::Config(e.to_string()))?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| TodoApiError::Storage(e.to_string()))?;
        let todos = db.collection::<TodoDoc>(COLLECTION);
        Ok(Self { todos })
    }

    // A malformed id can never name a stored document.
    fn parse_id(id: &str) -> Result<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| TodoApiError::NotFound("task not found".to_string()))
    }
}

#[async_trait]
impl TodoStore for MongoTodoStore {
    async fn list(&self) -> Result<Vec<Todo>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .build();
        let mut cursor = self
            .todos
            .find(doc! {}, options)
            .await
            .map_err(|e| TodoApiError::Storage(e.to_string()))?;

        let mut todos = Vec::new();
        while let Some(record) = cursor
            .try_next()
            .await
            .map_err(|e| TodoApiError::Storage(e.to_string()))?
        {
            todos.push(record.into_todo());
        }
        Ok(todos)
    }

    async fn create(&self, input: CreateTodo) -> Result<Todo> {
        let record = TodoDoc {
            id: None,
            title: input.title,
            completed: input.completed,
            created_at: now_ts(),
        };
        let result = self
            .todos
            .insert_one(&record, None)
            .await
            .map_err(|e| TodoApiError::Storage(e.to_string()))?;
        let id = result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| TodoApiError::Storage("insert returned no object id".to_string()))?;
        Ok(Todo {
            id,
            title: record.title,
            completed: record.completed,
            created_at: record.created_at,
        })
    }

    async fn get(&self, id: &str) -> Result<Todo> {
        let oid = Self::parse_id(id)?;
        let record = self
            .todos
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| TodoApiError::Storage(e.to_string()))?
            .ok_or_else(|| TodoApiError::NotFound("task not found".to_string()))?;
        Ok(record.into_todo())
    }

    async fn update(&self, id: &str, input: UpdateTodo) -> Result<Todo> {
        if input.is_empty() {
            // An empty $set is rejected by the server.
            return self.get(id).await;
        }
        let oid = Self::parse_id(id)?;
        let mut set = Document::new();
        if let Some(title) = input.title {
            set.insert("title", title);
        }
        if let Some(completed) = input.completed {
            set.insert("completed", completed);
        }
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let record = self
            .todos
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set }, options)
            .await
            .map_err(|e| TodoApiError::Storage(e.to_string()))?
            .ok_or_else(|| TodoApiError::NotFound("task not found".to_string()))?;
        Ok(record.into_todo())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let oid = Self::parse_id(id)?;
        self.todos
            .find_one_and_delete(doc! { "_id": oid }, None)
            .await
            .map_err(|e| TodoApiError::Storage(e.to_string()))?
            .ok_or_else(|| TodoApiError::NotFound("task not found".to_string()))?;
        Ok(())
    }
}
