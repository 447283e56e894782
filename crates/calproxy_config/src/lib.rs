use config::{Config, ConfigError, Environment, File, FileFormat};
use once_cell::sync::OnceCell;
use std::env;
use tracing::debug;
pub mod models;
pub use models::*;

/// Prefix for configuration environment variables, e.g. `CALPROXY__SERVER__PORT`.
pub const DEFAULT_PREFIX: &str = "CALPROXY";

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. built-in defaults
/// 2. `config/default.{toml,yaml,json}` (optional)
/// 3. `config/{RUN_ENV}.{toml,yaml,json}` (optional, `RUN_ENV` defaults to `debug`)
/// 4. environment variables prefixed with `PREFIX` (default `CALPROXY`), `__` separated
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    let default_path = format!("{}/default", config_dir);
    let env_path = format!("{}/{}", config_dir, run_env);
    debug!("Loading config from {} and {}", default_path, env_path);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path).required(false))
        .add_source(File::with_name(&env_path).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator("__")
                .try_parsing(true),
        );

    builder.build()?.try_deserialize()
}

/// Parses a configuration from an in-memory TOML document, without touching
/// files or the environment.
pub fn load_config_from_toml(source: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(source, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, once.
///
/// The file is taken from `DOTENV_OVERRIDE`, then from a first command line
/// argument starting with `.env`, and defaults to `.env`. Returns the path
/// that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
