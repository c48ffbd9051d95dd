use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;

use crate::model::service;

use super::{data::SessionState, error::ApiError, gate, session};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    session_id: String,
    #[serde(flatten)]
    state: SessionState,
}

/// Validates the session inline, lets the frontend restore a login silently.
pub async fn handler(
    State(data): State<Arc<service::Data>>,
    headers: HeaderMap,
) -> Result<Json<Response>, ApiError> {
    let session = gate::validate(&data, &headers, &gate::CHECK).await?;
    let state = session::state(&data, &session).await?;
    Ok(Json(Response {
        session_id: session.id,
        state,
    }))
}
