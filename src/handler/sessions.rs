use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::model::service;

use super::{data::SessionSummary, error::ApiError};

#[derive(Serialize)]
pub struct Response {
    sessions: Vec<SessionSummary>,
    total: usize,
}

pub async fn handler(State(data): State<Arc<service::Data>>) -> Result<Json<Response>, ApiError> {
    let sessions: Vec<SessionSummary> = data.store.list().await?.iter().map(Into::into).collect();
    Ok(Json(Response {
        total: sessions.len(),
        sessions,
    }))
}
