use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    model::{self, data::short_id},
    SessionData, SessionStore,
};

pub struct InMemorySessionStore {
    store: Arc<Mutex<HashMap<String, SessionData>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        InMemorySessionStore {
            store: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, SessionData>>, model::store::Error> {
        self.store
            .lock()
            .map_err(|e| anyhow::anyhow!("Locking error: {:?}", e).into())
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn add(&self, session_id: &str, data: SessionData) -> Result<(), model::store::Error> {
        tracing::info!(session = short_id(session_id), "adding session");
        let mut store = self.lock()?;
        store.insert(session_id.to_string(), data);
        Ok(())
    }

    async fn get(&self, session_id: &str) -> Result<SessionData, model::store::Error> {
        let store = self.lock()?;
        match store.get(session_id) {
            Some(data) => Ok(data.clone()),
            None => Err(model::store::Error::NoSession()),
        }
    }

    async fn remove(&self, session_id: &str) -> Result<(), model::store::Error> {
        let mut store = self.lock()?;
        if store.remove(session_id).is_some() {
            tracing::info!(session = short_id(session_id), "removed session");
        }
        Ok(())
    }

    async fn touch(&self, session_id: &str, now: i64) -> Result<(), model::store::Error> {
        let mut store = self.lock()?;
        if let Some(data) = store.get_mut(session_id) {
            data.last_activity = now;
        }
        Ok(())
    }

    async fn sweep(&self, now: i64) -> Result<usize, model::store::Error> {
        let mut store = self.lock()?;
        Ok(remove_expired(&mut store, now))
    }

    async fn list(&self) -> Result<Vec<SessionData>, model::store::Error> {
        let store = self.lock()?;
        let mut res: Vec<SessionData> = store.values().cloned().collect();
        res.sort_by_key(|s| s.created_at);
        Ok(res)
    }
}

fn remove_expired(store: &mut HashMap<String, SessionData>, now: i64) -> usize {
    let before = store.len();
    store.retain(|key, session_data| {
        if session_data.expires_at < now {
            tracing::info!(session = short_id(key), "remove expired session");
            false
        } else {
            true
        }
    });
    before - store.len()
}
