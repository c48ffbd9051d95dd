use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::model::{
    data::{short_id, SessionData},
    service, store,
};

use super::{cookie, error::ApiError};

/// Error texts for a missing and for an unusable session.
pub struct Messages {
    pub missing: &'static str,
    pub expired: &'static str,
}

pub const PROTECTED: Messages = Messages {
    missing: "Session ID required",
    expired: "Invalid or expired session",
};

/// Used by `/auth/check`, the frontend probes it on start.
pub const CHECK: Messages = Messages {
    missing: "No session",
    expired: "Session expired",
};

/// Guards protected routes, the resolved session is put into request extensions.
pub async fn middleware(
    State(data): State<Arc<service::Data>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = validate(&data, request.headers(), &PROTECTED).await?;
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

pub async fn validate(
    data: &service::Data,
    headers: &HeaderMap,
    messages: &Messages,
) -> Result<SessionData, ApiError> {
    let session_id = cookie::session_id(headers).ok_or(ApiError::NoSession(messages.missing))?;
    let now = data.clock.now();
    let store = &data.store;
    let session = match store.get(&session_id).await {
        Ok(session) if session.is_valid(now) => session,
        Ok(_) | Err(store::Error::NoSession()) => {
            tracing::debug!(session = short_id(&session_id), "dropping invalid session");
            store.remove(&session_id).await?;
            return Err(ApiError::ExpiredSession(messages.expired));
        }
        Err(err) => return Err(err.into()),
    };
    store.touch(&session_id, now).await?;
    tracing::trace!(session = session.short_id(), "session ok");
    Ok(SessionData {
        last_activity: now,
        ..session
    })
}
