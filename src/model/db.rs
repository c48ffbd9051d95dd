use serde::Serialize;
use thiserror::Error;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub name: String,
    pub path: String,
    pub full_path: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Empty identifier")]
    EmptyName(),
    #[error("No columns to update")]
    NoColumns(),
    #[error("Row data must be a JSON object")]
    NotObject(),
    #[error("{0}")]
    Sql(#[from] sqlx::Error),
}
