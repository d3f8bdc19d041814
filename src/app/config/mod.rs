use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub mod user;

pub use user::UserConfig;

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("orbit")
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_log_dir() -> PathBuf {
        Self::get_config_dir().join("logs")
    }

    /// Load `config.toml` (or `path`), writing the defaults out when the
    /// default file doesn't exist yet.
    pub fn load(path: Option<&Path>) -> Result<UserConfig> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let path = Self::get_config_path();
                if path.exists() {
                    Self::read(&path)
                } else {
                    let config = UserConfig::default();
                    if let Err(e) = Self::write_default(&path, &config) {
                        // Not fatal, we just run on defaults
                        eprintln!("Could not create {}: {:#}", path.display(), e);
                    }
                    Ok(config)
                }
            }
        }
    }

    fn read(path: &Path) -> Result<UserConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    fn write_default(path: &Path, config: &UserConfig) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, Self::render_default_with(config)?)?;
        Ok(())
    }

    pub fn render_default() -> Result<String> {
        Self::render_default_with(&UserConfig::default())
    }

    fn render_default_with(config: &UserConfig) -> Result<String> {
        toml::to_string_pretty(config).context("serializing default config")
    }
}
