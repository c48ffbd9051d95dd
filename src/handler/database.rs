use std::sync::Arc;

use axum::{extract::State, Json};

use crate::model::{db::Info, service};

pub async fn handler(State(data): State<Arc<service::Data>>) -> Json<Info> {
    Json(data.db.info())
}
