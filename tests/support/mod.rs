//! In-process stand-in for the overlay REST backend.
//!
//! Mirrors the production handlers: creation-order list, defaults applied
//! on create, partial updates over an allow-list of columns, and
//! `{success: false, error: "Overlay not found"}` for unknown ids.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use tokio::sync::Mutex;

const UPDATABLE: [&str; 8] = ["type", "content", "position_x", "position_y", "width", "height", "font_size", "color"];

#[derive(Clone, Default)]
pub struct Backend {
    rows: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<Mutex<u64>>,
    last_post: Arc<Mutex<Option<Value>>>,
    last_put: Arc<Mutex<Option<Value>>>,
}

impl Backend {
    pub async fn rows(&self) -> Vec<Value> {
        self.rows.lock().await.clone()
    }

    /// Store a row as-is, bypassing create defaults.
    pub async fn insert_raw(&self, row: Value) {
        self.rows.lock().await.push(row);
    }

    pub async fn last_post(&self) -> Option<Value> {
        self.last_post.lock().await.clone()
    }

    pub async fn last_put(&self) -> Option<Value> {
        self.last_put.lock().await.clone()
    }
}

/// Start the backend on an ephemeral port. Returns the API root
/// (`http://127.0.0.1:PORT/api`), the broken-endpoint root and a handle.
pub async fn spawn_backend() -> (String, String, Backend) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let backend = Backend::default();
    let app = Router::new()
        .route("/api/overlays", get(list_overlays).post(create_overlay))
        .route("/api/overlays/{id}", get(get_overlay).put(update_overlay).delete(delete_overlay))
        .route("/broken/api/overlays", get(bad_gateway).post(success_without_data))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), format!("http://{addr}/broken/api"), backend)
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "success": false, "error": "Overlay not found" })))
}

async fn list_overlays(State(backend): State<Backend>) -> Json<Value> {
    let rows = backend.rows.lock().await;
    Json(json!({ "success": true, "data": *rows }))
}

async fn create_overlay(State(backend): State<Backend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    *backend.last_post.lock().await = Some(body.clone());

    let id = {
        let mut next = backend.next_id.lock().await;
        *next += 1;
        format!("ovl-{next}")
    };
    let field = |key: &str, default: Value| body.get(key).cloned().unwrap_or(default);
    let row = json!({
        "id": id,
        "type": field("type", Value::Null),
        "content": field("content", Value::Null),
        "position_x": field("position_x", json!(50)),
        "position_y": field("position_y", json!(50)),
        "width": field("width", json!(200)),
        "height": field("height", json!(100)),
        "font_size": field("font_size", json!(24)),
        "color": field("color", json!("#FFFFFF")),
        "created_at": "2025-01-01T00:00:00+00:00",
        "updated_at": null,
    });
    backend.rows.lock().await.push(row.clone());
    (StatusCode::CREATED, Json(json!({ "success": true, "data": row })))
}

async fn get_overlay(State(backend): State<Backend>, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    let rows = backend.rows.lock().await;
    match rows.iter().find(|row| row["id"] == id.as_str()) {
        Some(row) => (StatusCode::OK, Json(json!({ "success": true, "data": row }))),
        None => not_found(),
    }
}

async fn update_overlay(
    State(backend): State<Backend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    *backend.last_put.lock().await = Some(body.clone());

    let mut rows = backend.rows.lock().await;
    let Some(row) = rows.iter_mut().find(|row| row["id"] == id.as_str()) else {
        return not_found();
    };
    let updates: Map<String, Value> = body.as_object().cloned().unwrap_or_default();
    for key in UPDATABLE {
        if let Some(value) = updates.get(key) {
            row[key] = value.clone();
        }
    }
    row["updated_at"] = json!("2025-01-01T00:00:01+00:00");
    (StatusCode::OK, Json(json!({ "success": true, "data": row.clone() })))
}

async fn delete_overlay(State(backend): State<Backend>, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    let mut rows = backend.rows.lock().await;
    let Some(index) = rows.iter().position(|row| row["id"] == id.as_str()) else {
        return not_found();
    };
    rows.remove(index);
    (StatusCode::OK, Json(json!({ "success": true, "message": "Overlay deleted successfully" })))
}

async fn bad_gateway() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "<html><body>502 Bad Gateway</body></html>")
}

async fn success_without_data() -> Json<Value> {
    Json(json!({ "success": true }))
}
