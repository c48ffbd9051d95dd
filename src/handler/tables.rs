use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::{
    db::Record,
    model::{db, service},
};

use super::{body::JsonBody, error::ApiError};

#[derive(Serialize)]
pub struct Inserted {
    id: i64,
}

#[derive(Serialize)]
pub struct Updated {
    changes: u64,
}

#[derive(Serialize)]
pub struct Deleted {
    deleted: u64,
}

#[derive(Serialize)]
pub struct Cleared {
    cleared: u64,
    message: String,
}

fn record(body: Value) -> Result<Record, ApiError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(db::Error::NotObject().into()),
    }
}

pub async fn list(State(data): State<Arc<service::Data>>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(data.db.tables().await?))
}

pub async fn rows(
    State(data): State<Arc<service::Data>>,
    Path(table): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    tracing::debug!(table = table.as_str(), "rows");
    Ok(Json(data.db.rows(&table).await?))
}

pub async fn insert(
    State(data): State<Arc<service::Data>>,
    Path(table): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<Inserted>, ApiError> {
    let id = data.db.insert(&table, &record(body)?).await?;
    tracing::info!(table = table.as_str(), id, "row inserted");
    Ok(Json(Inserted { id }))
}

pub async fn update(
    State(data): State<Arc<service::Data>>,
    Path((table, id)): Path<(String, String)>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<Updated>, ApiError> {
    let changes = data.db.update(&table, &id, &record(body)?).await?;
    tracing::info!(table = table.as_str(), id = id.as_str(), changes, "row updated");
    Ok(Json(Updated { changes }))
}

pub async fn remove(
    State(data): State<Arc<service::Data>>,
    Path((table, id)): Path<(String, String)>,
) -> Result<Json<Deleted>, ApiError> {
    let deleted = data.db.delete(&table, &id).await?;
    tracing::info!(table = table.as_str(), id = id.as_str(), deleted, "row deleted");
    Ok(Json(Deleted { deleted }))
}

pub async fn clear(
    State(data): State<Arc<service::Data>>,
    Path(table): Path<String>,
) -> Result<Json<Cleared>, ApiError> {
    let cleared = data.db.clear(&table).await?;
    tracing::warn!(table = table.as_str(), cleared, "table cleared");
    Ok(Json(Cleared {
        cleared,
        message: format!("Table {} was cleared", table),
    }))
}
