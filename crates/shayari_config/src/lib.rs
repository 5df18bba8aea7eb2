use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;
pub mod models;
pub use models::*;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "SHAYARI";

/// Loads the layered application configuration.
///
/// Sources, lowest priority first:
///
/// 1. `config/default.{toml,yaml,json}` (optional)
/// 2. `config/{RUN_ENV}.{toml,yaml,json}` (optional, `RUN_ENV` defaults to `debug`)
/// 3. Environment variables prefixed with `SHAYARI__`, e.g. `SHAYARI__SERVER__PORT=8080`
///
/// The config directory can be moved with `CONFIG_DIR`. When no database section is
/// configured, a plain `DATABASE_URL` is picked up as well.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());
    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    debug!("Loading config defaults from {}", default_path.display());
    debug!("Loading {} config from {}", run_env, env_path.display());

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator("__")
                .try_parsing(true),
        );

    let mut config: AppConfig = builder.build()?.try_deserialize()?;

    if config.database.is_none() {
        if let Ok(url) = env::var("DATABASE_URL") {
            config.database = Some(DatabaseConfig { url });
        }
    }

    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file defaults to `.env` and can be overridden with `DOTENV_OVERRIDE`.
/// Loading happens once per process; a missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
