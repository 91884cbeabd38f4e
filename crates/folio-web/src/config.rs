use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Take the client address from `X-Forwarded-For` instead of the socket.
    /// Only enable behind a reverse proxy that sets the header.
    #[serde(default)]
    pub trust_proxy: bool,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub static_files: StaticConfig,
    #[serde(default)]
    pub tls: TlsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_ttl_hours")]
    pub jwt_ttl_hours: u64,
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Argon2 PHC string. Empty disables admin login.
    #[serde(default)]
    pub admin_password_hash: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_ttl_hours: default_jwt_ttl_hours(),
            admin_username: default_admin_username(),
            admin_password_hash: String::new(),
        }
    }
}

/// Built single-page app served for every non-API path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

fn default_jwt_ttl_hours() -> u64 { 24 }
fn default_admin_username() -> String { "admin".to_string() }

const WEAK_SECRETS: &[&str] = &[
    "change-me-to-a-random-secret",
    "secret",
    "password",
    "jwt-secret",
];

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            trust_proxy: false,
            auth: AuthConfig::default(),
            static_files: StaticConfig::default(),
            tls: TlsConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn has_admin(&self) -> bool {
        !self.auth.admin_password_hash.is_empty()
    }

    pub fn tls_enabled(&self) -> bool {
        self.tls.cert_path.is_some() && self.tls.key_path.is_some()
    }

    /// Reads `FOLIO_CONFIG` (if set) and then applies environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match std::env::var("FOLIO_CONFIG") {
            Ok(path) => {
                let contents = std::fs::read_to_string(&path)?;
                toml::from_str(&contents)?
            }
            Err(_) => ServerConfig::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.finalize()?;
        Ok(config)
    }

    /// Overrides fields from `FOLIO_*` variables looked up through `env`.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(addr) = env("FOLIO_BIND_ADDR") {
            self.bind_addr = addr.parse()?;
        }
        if let Some(val) = env("FOLIO_TRUST_PROXY") {
            self.trust_proxy = matches!(val.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        if let Some(secret) = env("FOLIO_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(val) = env("FOLIO_JWT_TTL_HOURS") {
            if let Ok(hours) = val.parse::<u64>() {
                self.auth.jwt_ttl_hours = hours;
            }
        }
        if let Some(username) = env("FOLIO_ADMIN_USERNAME") {
            self.auth.admin_username = username;
        }
        if let Some(hash) = env("FOLIO_ADMIN_PASSWORD_HASH") {
            self.auth.admin_password_hash = hash;
        }

        if let Some(dir) = env("FOLIO_STATIC_DIR") {
            self.static_files.dir = Some(PathBuf::from(dir));
        }

        if let Some(cert) = env("FOLIO_TLS_CERT") {
            self.tls.cert_path = Some(cert);
        }
        if let Some(key) = env("FOLIO_TLS_KEY") {
            self.tls.key_path = Some(key);
        }

        Ok(())
    }

    /// Fills in a random JWT secret when none is set, rejects known
    /// placeholder secrets and refuses an admin hash that cannot be verified.
    pub fn finalize(&mut self) -> anyhow::Result<()> {
        if self.auth.jwt_secret.is_empty() {
            self.auth.jwt_secret = uuid::Uuid::new_v4().to_string();
            tracing::warn!(
                "No JWT secret configured. Generated random secret (admin sessions end on restart)."
            );
        }

        if WEAK_SECRETS.iter().any(|&w| self.auth.jwt_secret == w) {
            anyhow::bail!(
                "JWT secret matches a known weak/placeholder value. \
                 Set a strong random secret via FOLIO_JWT_SECRET."
            );
        }
        if self.auth.jwt_secret.len() < 32 {
            tracing::warn!(
                "JWT secret is shorter than 32 characters. \
                 Consider using a stronger secret via FOLIO_JWT_SECRET."
            );
        }

        if !self.has_admin() {
            tracing::warn!(
                "No admin password hash configured; admin login is disabled. \
                 Generate one with the hash_password binary."
            );
        } else if let Err(e) = crate::auth::password::check_hash(&self.auth.admin_password_hash) {
            anyhow::bail!("{e}. Generate a new one with the hash_password binary.");
        }

        Ok(())
    }
}
