use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::data::SessionData;

fn to_time(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl From<&SessionData> for Session {
    fn from(data: &SessionData) -> Self {
        Session {
            id: data.id.clone(),
            created_at: to_time(data.created_at),
            expires_at: to_time(data.expires_at),
            last_activity: to_time(data.last_activity),
        }
    }
}

/// Session with the time left, as seen at `now`.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetails {
    #[serde(flatten)]
    pub session: Session,
    pub time_remaining: i64,
    pub time_elapsed: i64,
    pub total_duration: i64,
    pub percent_remaining: f64,
}

impl SessionDetails {
    pub fn new(data: &SessionData, now: i64, total_duration: i64) -> Self {
        let remaining = data.expires_at - now;
        let percent_remaining = if total_duration > 0 {
            (remaining as f64 / total_duration as f64 * 100.0).max(0.0)
        } else {
            0.0
        };
        SessionDetails {
            session: data.into(),
            time_remaining: remaining.max(0),
            time_elapsed: now - data.created_at,
            total_duration,
            percent_remaining,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub session: SessionDetails,
    pub active_sessions: usize,
    pub requires_password_change: bool,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&SessionData> for SessionSummary {
    fn from(data: &SessionData) -> Self {
        SessionSummary {
            id: data.short_id(),
            created_at: to_time(data.created_at),
            last_activity: to_time(data.last_activity),
            expires_at: to_time(data.expires_at),
            is_active: data.is_active,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: &str) -> Self {
        Message {
            message: message.to_string(),
        }
    }
}
