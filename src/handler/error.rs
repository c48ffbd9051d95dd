use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::model::{auth, db, store};

use super::{cookie, gate};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("{0}")]
    ExpiredSession(&'static str),
    #[error("{0}")]
    NoSession(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("{}", msg);
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Unauthorized(msg) => {
                tracing::warn!("{}", msg);
                (StatusCode::UNAUTHORIZED, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Storage(msg) => {
                tracing::error!("{}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": msg })),
                )
                    .into_response()
            }
            ApiError::Other(err) => {
                tracing::error!("{}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal Server Error" })),
                )
                    .into_response()
            }
            ApiError::ExpiredSession(msg) => {
                tracing::warn!("{}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    [(header::SET_COOKIE, cookie::removal().to_string())],
                    Json(json!({ "error": msg, "requiresAuth": true })),
                )
                    .into_response()
            }
            ApiError::NoSession(msg) => {
                tracing::warn!("{}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": msg, "requiresAuth": true })),
                )
                    .into_response()
            }
        }
    }
}

impl From<auth::Error> for ApiError {
    fn from(error: auth::Error) -> Self {
        match error {
            auth::Error::NoPass() | auth::Error::NoPasses() | auth::Error::ShortPass(_) => {
                ApiError::BadRequest(error.to_string())
            }
            auth::Error::WrongPass() | auth::Error::WrongCurrentPass() => {
                ApiError::Unauthorized(error.to_string())
            }
            auth::Error::ServiceError(error) => ApiError::Other(error),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<store::Error> for ApiError {
    fn from(error: store::Error) -> Self {
        match error {
            store::Error::NoSession() => ApiError::ExpiredSession(gate::PROTECTED.expired),
            store::Error::Other(error) => ApiError::Other(error),
        }
    }
}

impl From<db::Error> for ApiError {
    fn from(error: db::Error) -> Self {
        match error {
            db::Error::Sql(error) => {
                let msg = match error.as_database_error() {
                    Some(db_err) => db_err.message().to_string(),
                    None => error.to_string(),
                };
                ApiError::Storage(msg)
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}
