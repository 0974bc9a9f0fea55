//! Application configuration.
//!
//! Read from a TOML file whose path is the first command line argument, or
//! `DEMO_REST_CONFIG` when no argument is given. Without either, the built-in
//! defaults apply: `127.0.0.1:8080`, log level `info` and two local users.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [logging]
//! level = "debug"
//!
//! [security]
//! realm = "demo"
//! basic_challenge = true
//!
//! [security.cors]
//! allowed_origins = ["http://localhost:3000"]
//!
//! [[security.users]]
//! username = "admin"
//! password = "{bcrypt}$2b$10$..."
//! roles = ["ADMIN"]
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "DEMO_REST_CONFIG";

const VALID_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub security: SecuritySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Worker threads; actix picks one per core when unset.
    #[serde(default)]
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default `env_logger` filter. `RUST_LOG` takes precedence.
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecuritySettings {
    /// Realm sent in the `WWW-Authenticate` challenge.
    #[serde(default = "default_realm")]
    pub realm: String,
    /// Whether 401 responses carry a `WWW-Authenticate: Basic` challenge.
    #[serde(default)]
    pub basic_challenge: bool,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default = "default_users")]
    pub users: Vec<UserSettings>,
}

/// Cross-origin policy. The defaults permit any origin, `GET`, `HEAD` and
/// `POST`, any request header and a 30 minute preflight cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Empty, or containing `"*"`, means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "default_cors_headers")]
    pub allowed_headers: Vec<String>,
    #[serde(default)]
    pub expose_headers: Vec<String>,
    #[serde(default)]
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds.
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

/// One in-memory account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub username: String,
    /// Stored password in `{id}hash` form: `{bcrypt}`, `{argon2}` or `{noop}`.
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub authorities: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_level() -> String {
    "info".to_string()
}

fn default_realm() -> String {
    "Realm".to_string()
}

fn default_users() -> Vec<UserSettings> {
    vec![
        UserSettings {
            username: "user".to_string(),
            password: "{noop}password".to_string(),
            roles: vec!["USER".to_string()],
            authorities: Vec::new(),
        },
        UserSettings {
            username: "admin".to_string(),
            password: "{noop}admin".to_string(),
            roles: vec!["ADMIN".to_string(), "USER".to_string()],
            authorities: Vec::new(),
        },
    ]
}

fn default_cors_methods() -> Vec<String> {
    vec!["GET".to_string(), "HEAD".to_string(), "POST".to_string()]
}

fn default_cors_headers() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_cors_max_age() -> u64 {
    1800
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: default_level(),
        }
    }
}

impl Default for SecuritySettings {
    fn default() -> Self {
        SecuritySettings {
            realm: default_realm(),
            basic_challenge: false,
            cors: CorsSettings::default(),
            users: default_users(),
        }
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        CorsSettings {
            allowed_origins: Vec::new(),
            allowed_methods: default_cors_methods(),
            allowed_headers: default_cors_headers(),
            expose_headers: Vec::new(),
            allow_credentials: false,
            max_age: default_cors_max_age(),
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow::anyhow!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the configuration source: explicit path, then
    /// [`CONFIG_ENV`], then the defaults.
    pub fn load(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let path = path.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let config = AppConfig::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if self.server.workers == Some(0) {
            return Err(anyhow::anyhow!("Server workers must be at least 1"));
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !VALID_LEVELS.contains(&level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                VALID_LEVELS.join(", ")
            ));
        }

        let mut seen = HashSet::new();
        for user in &self.security.users {
            if user.username.trim().is_empty() {
                return Err(anyhow::anyhow!("User names cannot be empty"));
            }
            if !seen.insert(user.username.as_str()) {
                return Err(anyhow::anyhow!("Duplicate user '{}'", user.username));
            }
            if !user.password.starts_with('{') || !user.password.contains('}') {
                return Err(anyhow::anyhow!(
                    "Password of user '{}' must start with an encoder id such as {{bcrypt}}",
                    user.username
                ));
            }
            if user.password.starts_with("{noop}") {
                warn!("user '{}' has a plain text password", user.username);
            }
        }

        Ok(())
    }
}
