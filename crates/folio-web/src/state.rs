use std::sync::Arc;

use folio_core::{CoreError, LoginThrottle, NewUser, Storage};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub storage: Arc<dyn Storage>,
    /// Failed admin logins per client address. Owned here and handed to
    /// handlers through `State`; nothing else touches it.
    pub throttle: Arc<LoginThrottle>,
}

impl AppState {
    pub fn new(config: ServerConfig, storage: Arc<dyn Storage>) -> Self {
        Self {
            config: Arc::new(config),
            storage,
            throttle: Arc::new(LoginThrottle::new()),
        }
    }

    /// Creates the configured admin account in storage. A no-op when no
    /// admin password hash is configured or the account already exists.
    pub async fn seed_admin(&self) -> anyhow::Result<()> {
        if !self.config.has_admin() {
            return Ok(());
        }

        let admin = NewUser {
            username: self.config.auth.admin_username.clone(),
            password: self.config.auth.admin_password_hash.clone(),
        };
        match self.storage.create_user(admin).await {
            Ok(user) => {
                tracing::info!("Admin account ready: {}", user.username);
                Ok(())
            }
            Err(CoreError::Conflict(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
