use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ApiError;

/// JSON request body. A request without a body or content type reads as `{}`,
/// every other rejection becomes a 400 with a JSON `{error}`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !req.headers().contains_key(header::CONTENT_TYPE) {
            let value = serde_json::from_value(Value::Object(Map::new()))
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            return Ok(JsonBody(value));
        }
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}
