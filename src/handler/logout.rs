use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
    Extension, Json,
};

use crate::model::{data::SessionData, service};

use super::{cookie, data::Message, error::ApiError};

pub async fn handler(
    State(data): State<Arc<service::Data>>,
    Extension(session): Extension<SessionData>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!(session = session.short_id(), "logout");
    data.store.remove(&session.id).await?;
    tracing::debug!(session = session.short_id(), "logout done");
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie::removal().to_string())]),
        Json(Message::new("Logged out successfully")),
    ))
}
