use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{Result, TodoApiError};
use crate::interfaces::store::TodoStore;
use crate::todo::{CreateTodo, Todo, UpdateTodo};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

#[derive(Serialize)]
struct TodoResponse {
    success: bool,
    data: Todo,
}

#[derive(Serialize)]
struct TodoListResponse {
    success: bool,
    count: usize,
    data: Vec<Todo>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

async fn root() -> &'static str {
    "todo api is running"
}

async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoListResponse>> {
    let todos = state.store.list().await?;
    Ok(Json(TodoListResponse {
        success: true,
        count: todos.len(),
        data: todos,
    }))
}

async fn create_todo(
    State(state): State<AppState>,
    Json(payload): Json<CreateTodo>,
) -> Result<(StatusCode, Json<TodoResponse>)> {
    payload.validate()?;
    let todo = state.store.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(TodoResponse {
            success: true,
            data: todo,
        }),
    ))
}

async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>> {
    let todo = state.store.get(&id).await?;
    Ok(Json(TodoResponse {
        success: true,
        data: todo,
    }))
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTodo>,
) -> Result<Json<TodoResponse>> {
    payload.validate()?;
    let todo = state.store.update(&id, payload).await?;
    Ok(Json(TodoResponse {
        success: true,
        data: todo,
    }))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    state.store.delete(&id).await?;
    Ok(Json(json!({ "success": true, "data": {} })))
}

pub async fn run(host: &str, port: u16, store: Arc<dyn TodoStore>) -> Result<()> {
    let app = build_router(AppState { store });

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TodoApiError::Runtime(e.to_string()))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| TodoApiError::Runtime(e.to_string()))?;

    Ok(())
}
