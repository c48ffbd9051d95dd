use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::secret_str::SecretString;

pub const DEFAULT_SESSION_DURATION: i64 = 24 * 60 * 60 * 1000;

/// Content of the persisted config file. Keys other than `auth` are kept as is.
#[derive(Serialize, Deserialize, Clone)]
pub struct Settings {
    pub auth: AuthConfig,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    pub current_password: SecretString,
    #[serde(default)]
    pub password_changed: bool,
    #[serde(default = "default_session_duration")]
    pub session_duration: i64, // millis
}

fn default_session_duration() -> i64 {
    DEFAULT_SESSION_DURATION
}
