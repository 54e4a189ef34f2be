use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::env;

/// Runtime settings for the writeup feedback plugin, read from `.env` and the
/// process environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub database_path: String,
    /// Language used for plugin strings (`en` or `fr`).
    pub lang: String,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Loads `env_path` (if present) and initializes the global config.
    ///
    /// Later calls return the already initialized instance.
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();
        CONFIG.get_or_init(Self::from_env)
    }

    /// Returns the global config, initializing it from the environment on
    /// first use.
    pub fn get() -> &'static Self {
        CONFIG.get_or_init(|| {
            dotenvy::dotenv().ok();
            Self::from_env()
        })
    }

    pub fn from_env() -> Self {
        let project_name =
            env::var("PROJECT_NAME").unwrap_or_else(|_| "writeup-feedback".into());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/writeup.log".into());
        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "data/writeup.db".into());
        let lang = env::var("WRITEUP_LANG").unwrap_or_else(|_| "en".into());

        Config {
            project_name,
            log_level,
            log_file,
            database_path,
            lang,
        }
    }

    /// Connection URL for the configured database.
    ///
    /// A value that already looks like a DSN is passed through; anything else
    /// is treated as a SQLite file path.
    pub fn database_url(&self) -> String {
        let path = &self.database_path;
        if path.starts_with("sqlite:") || path.starts_with("postgres://") || path.starts_with("mysql://") {
            path.clone()
        } else {
            format!("sqlite://{path}?mode=rwc")
        }
    }
}
