use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file; relative paths are resolved against the working directory.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn resolve_path(&self) -> std::io::Result<PathBuf> {
        let path = PathBuf::from(&self.path);
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(env::current_dir()?.join(path))
        }
    }

    /// `mode=rwc` lets SQLite create the file on first start.
    pub fn sqlite_url(&self) -> std::io::Result<String> {
        let path = self.resolve_path()?;
        Ok(format!("sqlite://{}?mode=rwc", path.display()))
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::from_env_defaults(),
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Environment always wins over the file.
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        toml::from_str(config_str).map_err(|e| format!("Failed to parse config file: {e}").into())
    }

    fn from_env_defaults() -> Self {
        fn get_env(name: &str) -> Option<String> {
            env::var(name).ok()
        }
        fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
            env::var(name)
                .ok()
                .and_then(|v| v.parse::<T>().ok())
                .unwrap_or(default)
        }

        Config {
            server: ServerConfig {
                host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: get_env_parse("PORT", 5000u16),
            },
            database: DatabaseConfig {
                path: get_env("DATABASE_PATH")
                    .unwrap_or_else(|| "database/microfinance.db".to_string()),
            },
            session: SessionConfig {
                secret: get_env("SESSION_SECRET")
                    .unwrap_or_else(|| "change-me-in-production".to_string()),
                expires_in: get_env_parse("SESSION_EXPIRES_IN", 8 * 3600i64),
            },
            seed: SeedConfig::default(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_PATH") {
            self.database.path = v;
        }
        if let Ok(v) = env::var("SESSION_SECRET") {
            self.session.secret = v;
        }
        if let Ok(v) = env::var("SESSION_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.session.expires_in = n;
        }
        if let Ok(v) = env::var("ADMIN_USERNAME") {
            self.seed.admin_username = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            self.seed.admin_password = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_seed_section_uses_default_admin() {
        let config = Config::parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 5000

            [database]
            path = "database/microfinance.db"

            [session]
            secret = "s3cret"
            expires_in = 3600
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.seed.admin_username, "admin");
        assert_eq!(config.seed.admin_password, "admin123");
    }

    #[test]
    fn test_parse_rejects_missing_section() {
        assert!(Config::parse("[server]\nhost = \"x\"\nport = 1\n").is_err());
    }

    #[test]
    fn test_sqlite_url_is_absolute() {
        let db = DatabaseConfig {
            path: "database/microfinance.db".to_string(),
        };
        let url = db.sqlite_url().unwrap();
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("database/microfinance.db?mode=rwc"));
    }
}
