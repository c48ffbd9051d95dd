use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SessionData {
    pub id: String,
    pub created_at: i64,    // Unix timestamp millis
    pub expires_at: i64,    // Unix timestamp millis
    pub last_activity: i64, // Unix timestamp millis
    pub is_active: bool,
}

impl SessionData {
    pub fn new(id: &str, now: i64, duration: i64) -> Self {
        SessionData {
            id: id.to_string(),
            created_at: now,
            expires_at: now.saturating_add(duration),
            last_activity: now,
            is_active: true,
        }
    }

    pub fn is_valid(&self, now: i64) -> bool {
        self.is_active && now < self.expires_at
    }

    pub fn short_id(&self) -> String {
        short_id(&self.id)
    }
}

/// First 8 chars of the id followed by `...`, safe for logs and listings.
pub fn short_id(id: &str) -> String {
    let prefix: String = id.chars().take(8).collect();
    format!("{}...", prefix)
}
