use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    model::auth::{self, MIN_PASSWORD_LEN},
    utils::secret_str::SecretString,
    AuthService, ConfigStore,
};

/// Single password shared by every user, kept in the config file.
pub struct SharedPassword {
    config: Arc<dyn ConfigStore + Send + Sync>,
    // held from the current password check until the new one is saved
    change_lock: Mutex<()>,
}

impl SharedPassword {
    pub fn new(config: Arc<dyn ConfigStore + Send + Sync>) -> Self {
        SharedPassword {
            config,
            change_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl AuthService for SharedPassword {
    async fn login(&self, pass: &SecretString) -> Result<auth::Login, auth::Error> {
        if pass.is_empty() {
            return Err(auth::Error::NoPass());
        }
        let settings = self.config.get().await?;
        if *pass != settings.auth.current_password {
            return Err(auth::Error::WrongPass());
        }
        Ok(auth::Login {
            requires_password_change: !settings.auth.password_changed,
            session_duration: settings.auth.session_duration,
        })
    }

    async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<(), auth::Error> {
        if current.is_empty() || new.is_empty() {
            return Err(auth::Error::NoPasses());
        }
        let _guard = self.change_lock.lock().await;
        let mut settings = self.config.get().await?;
        if *current != settings.auth.current_password {
            return Err(auth::Error::WrongCurrentPass());
        }
        if new.char_len() < MIN_PASSWORD_LEN {
            return Err(auth::Error::ShortPass(MIN_PASSWORD_LEN));
        }
        settings.auth.current_password = new.clone();
        settings.auth.password_changed = true;
        self.config.save(settings).await?;
        tracing::info!("password changed");
        Ok(())
    }
}
