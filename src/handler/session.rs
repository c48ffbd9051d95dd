use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use crate::model::{data::SessionData, service};

use super::{
    data::{SessionDetails, SessionState},
    error::ApiError,
};

pub async fn handler(
    State(data): State<Arc<service::Data>>,
    Extension(session): Extension<SessionData>,
) -> Result<Json<SessionState>, ApiError> {
    Ok(Json(state(&data, &session).await?))
}

pub async fn state(data: &service::Data, session: &SessionData) -> Result<SessionState, ApiError> {
    let settings = data.config.get().await?;
    let active_sessions = data.store.list().await?.len();
    let now = data.clock.now();
    Ok(SessionState {
        session: SessionDetails::new(session, now, settings.auth.session_duration),
        active_sessions,
        requires_password_change: !settings.auth.password_changed,
    })
}
