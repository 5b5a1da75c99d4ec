use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub url_prefix: String,
    pub version: String,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL; when absent it is composed from the parts below
    #[serde(skip_serializing)]
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub enable_query_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub auth: AuthConfig,
}

/// Where Basic auth credentials come from. Plain passwords are hashed once
/// at startup; `users` entries already carry PHC hashes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    #[serde(skip_serializing)]
    pub users: Vec<(String, String)>,
}

impl ApiConfig {
    /// Route prefix, e.g. `/api/v1`
    pub fn route_prefix(&self) -> String {
        format!(
            "/{}/{}",
            self.url_prefix.trim_matches('/').to_lowercase(),
            self.version.trim_matches('/').to_lowercase()
        )
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("API_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // API overrides
        if let Ok(v) = env::var("API_URL_PREFIX") {
            self.api.url_prefix = v;
        }
        if let Ok(v) = env::var("API_VERSION") {
            self.api.version = v;
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DB_HOST") {
            self.database.host = v;
        }
        if let Ok(v) = env::var("DB_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Ok(v) = env::var("DB_USER") {
            self.database.user = v;
        }
        if let Ok(v) = env::var("DB_PASSWORD") {
            self.database.password = v;
        }
        if let Ok(v) = env::var("DB_NAME") {
            self.database.name = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_ENABLE_QUERY_LOGGING") {
            self.database.enable_query_logging = v.parse().unwrap_or(self.database.enable_query_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = split_list(&v);
        }
        if let Ok(v) = env::var("AUTH_USERNAME") {
            self.security.auth.username = v;
        }
        if let Ok(v) = env::var("AUTH_PASSWORD") {
            self.security.auth.password = Some(v);
        }
        if let Ok(v) = env::var("AUTH_PASSWORD_HASH") {
            self.security.auth.password_hash = Some(v);
        }
        if let Ok(v) = env::var("AUTH_USERS") {
            self.security.auth.users = parse_users(&v);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            api: ApiConfig {
                url_prefix: "api".to_string(),
                version: "v1".to_string(),
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                url: None,
                host: "localhost".to_string(),
                port: 3306,
                user: "root".to_string(),
                password: String::new(),
                name: "planner".to_string(),
                max_connections: 10,
                connection_timeout: 30,
                enable_query_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
                auth: AuthConfig::default_admin(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            api: ApiConfig {
                url_prefix: "api".to_string(),
                version: "v1".to_string(),
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                url: None,
                host: "localhost".to_string(),
                port: 3306,
                user: "planner".to_string(),
                password: String::new(),
                name: "planner".to_string(),
                max_connections: 20,
                connection_timeout: 10,
                enable_query_logging: true,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
                auth: AuthConfig::default_admin(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            api: ApiConfig {
                url_prefix: "api".to_string(),
                version: "v1".to_string(),
                enable_request_logging: false,
            },
            database: DatabaseConfig {
                url: None,
                host: "localhost".to_string(),
                port: 3306,
                user: "planner".to_string(),
                password: String::new(),
                name: "planner".to_string(),
                max_connections: 50,
                connection_timeout: 5,
                enable_query_logging: false,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
                // Production must supply AUTH_PASSWORD_HASH or AUTH_USERS
                auth: AuthConfig {
                    username: "admin".to_string(),
                    password: None,
                    password_hash: None,
                    users: Vec::new(),
                },
            },
        }
    }
}

impl AuthConfig {
    fn default_admin() -> Self {
        Self {
            username: "admin".to_string(),
            password: Some("admin".to_string()),
            password_hash: None,
            users: Vec::new(),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse `user:hash;user2:hash2`. PHC hashes use `,` inside their parameter
/// list but never `:` or `;`.
fn parse_users(value: &str) -> Vec<(String, String)> {
    value
        .split(';')
        .map(str::trim)
        .filter_map(|pair| {
            let (user, hash) = pair.split_once(':')?;
            if user.is_empty() || hash.is_empty() {
                return None;
            }
            Some((user.to_string(), hash.to_string()))
        })
        .collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.route_prefix(), "/api/v1");
        assert_eq!(config.security.auth.username, "admin");
        assert_eq!(config.security.auth.password.as_deref(), Some("admin"));
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.security.auth.password.is_none());
        assert!(!config.database.enable_query_logging);
        assert_eq!(config.database.max_connections, 50);
    }

    #[test]
    fn serialized_config_omits_secrets() {
        let mut config = AppConfig::development();
        config.security.auth.password_hash = Some("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".to_string());
        config.security.auth.users = vec![("alice".to_string(), "$argon2id$x".to_string())];

        let value = serde_json::to_value(&config).unwrap();
        let auth = &value["security"]["auth"];
        assert_eq!(auth["username"], "admin");
        assert!(auth.get("password").is_none());
        assert!(auth.get("password_hash").is_none());
        assert!(auth.get("users").is_none());
        assert!(value["database"].get("password").is_none());
        assert!(value["database"].get("url").is_none());
    }

    #[test]
    fn route_prefix_is_lowercased_and_trimmed() {
        let api = ApiConfig {
            url_prefix: "/API/".to_string(),
            version: "V2".to_string(),
            enable_request_logging: false,
        };
        assert_eq!(api.route_prefix(), "/api/v2");
    }

    #[test]
    fn parses_user_hash_pairs() {
        let users = parse_users("alice:$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA; bob:$argon2id$x;broken; :nohash");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].0, "alice");
        assert!(users[0].1.starts_with("$argon2id$v=19$m=19456"));
        assert_eq!(users[1], ("bob".to_string(), "$argon2id$x".to_string()));
    }
}
