use std::sync::Arc;

use crate::{db::Database, AuthService, Clock, ConfigStore, SessionStore};

pub struct Data {
    pub store: Box<dyn SessionStore + Send + Sync>,
    pub config: Arc<dyn ConfigStore + Send + Sync>,
    pub auth_service: Box<dyn AuthService + Send + Sync>,
    pub clock: Box<dyn Clock + Send + Sync>,
    pub db: Database,
}
