use std::sync::Arc;

use axum::{
    debug_handler,
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
    Json,
};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{
    model::{data::short_id, service},
    utils::secret_str::SecretString,
};

use super::{body::JsonBody, cookie, data::Session, error::ApiError};

#[derive(Clone, Deserialize)]
pub struct Request {
    password: Option<SecretString>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    session_id: String,
    session: Session,
    requires_password_change: bool,
}

#[debug_handler]
pub async fn handler(
    State(data): State<Arc<service::Data>>,
    JsonBody(payload): JsonBody<Request>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!("starting login");
    let pass = payload.password.unwrap_or_else(|| "".into());
    let res = data.auth_service.login(&pass).await?;

    let session_id = generate_session();
    let now = data.clock.now();
    let session = data
        .store
        .create(&session_id, now, res.session_duration)
        .await?;
    tracing::info!(session = short_id(&session_id), "logged in");

    let response = Response {
        session: (&session).into(),
        session_id,
        requires_password_change: res.requires_password_change,
    };
    let cookie = cookie::session(&response.session_id, res.session_duration);
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie.to_string())]),
        Json(response),
    ))
}

/// 256 random bits, hex encoded.
fn generate_session() -> String {
    let mut rng = OsRng;
    let mut session_id_bytes = [0u8; 32];
    rng.fill_bytes(&mut session_id_bytes);
    hex::encode(session_id_bytes)
}
