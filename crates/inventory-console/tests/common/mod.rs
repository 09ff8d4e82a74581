#![allow(dead_code)]

//! In-process fake of the inventory REST API.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    collections: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl FakeApi {
    pub fn seed(&self, resource: &str, rows: Vec<Value>) {
        self.collections
            .lock()
            .unwrap()
            .insert(resource.to_string(), rows);
    }

    pub fn rows(&self, resource: &str) -> Vec<Value> {
        self.collections
            .lock()
            .unwrap()
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    fn log(&self, method: &'static str, path: String, body: Option<Value>) {
        self.hits.lock().unwrap().push(Hit { method, path, body });
    }
}

async fn list(State(api): State<FakeApi>, Path(resource): Path<String>) -> Json<Vec<Value>> {
    api.log("GET", format!("/{resource}"), None);
    Json(api.rows(&resource))
}

async fn create(
    State(api): State<FakeApi>,
    Path(resource): Path<String>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    api.log("POST", format!("/{resource}"), Some(body.clone()));
    let mut collections = api.collections.lock().unwrap();
    let rows = collections.entry(resource).or_default();
    let next = rows
        .iter()
        .filter_map(|row| row["id"].as_u64())
        .max()
        .unwrap_or(0)
        + 1;
    body["id"] = json!(next);
    rows.push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn update(
    State(api): State<FakeApi>,
    Path((resource, id)): Path<(String, u64)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    api.log("PUT", format!("/{resource}/{id}"), Some(body.clone()));
    let mut collections = api.collections.lock().unwrap();
    let rows = collections.entry(resource).or_default();
    let row = rows
        .iter_mut()
        .find(|row| row["id"].as_u64() == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    *row = body;
    row["id"] = json!(id);
    // Echoes a status object rather than the record.
    Ok(Json(json!({"ok": true})))
}

async fn delete(
    State(api): State<FakeApi>,
    Path((resource, id)): Path<(String, u64)>,
) -> StatusCode {
    api.log("DELETE", format!("/{resource}/{id}"), None);
    let mut collections = api.collections.lock().unwrap();
    let rows = collections.entry(resource).or_default();
    let before = rows.len();
    rows.retain(|row| row["id"].as_u64() != Some(id));
    if rows.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

/// Binds the fake API on an ephemeral local port; returns its base URL.
pub async fn start_fake_api(api: FakeApi) -> String {
    let app = Router::new()
        .route("/{resource}", get(list).post(create))
        .route(
            "/{resource}/{id}",
            axum::routing::put(update).delete(delete),
        )
        .with_state(api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
