use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{model::service, utils::secret_str::SecretString};

use super::{body::JsonBody, data::Message, error::ApiError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    current_password: Option<SecretString>,
    new_password: Option<SecretString>,
}

pub async fn handler(
    State(data): State<Arc<service::Data>>,
    JsonBody(payload): JsonBody<Request>,
) -> Result<Json<Message>, ApiError> {
    tracing::debug!("change password");
    let current = payload.current_password.unwrap_or_else(|| "".into());
    let new = payload.new_password.unwrap_or_else(|| "".into());
    data.auth_service.change_password(&current, &new).await?;
    Ok(Json(Message::new("Password changed successfully")))
}
