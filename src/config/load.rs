use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::Settings;

pub const PROJECT_CONFIG_FILE: &str = "mantis.toml";

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `MANTIS__`) over an
/// optional config file over struct defaults.
impl Settings {
    /// Load settings for the project rooted at `project_dir`.
    pub fn load(project_dir: &Path) -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path(project_dir);

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "reading settings file");
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MANTIS")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.streaming.timeout_secs == 0 {
            return Err("streaming.timeout_secs must be >= 1".to_string());
        }
        if self.content.audio_extensions.is_empty() {
            return Err("content.audio_extensions must not be empty".to_string());
        }
        let site_url = self.site.site_url.trim();
        if !site_url.is_empty() && !site_url.starts_with("http://") && !site_url.starts_with("https://")
        {
            return Err(format!("site.site_url must be an http(s) URL, got '{site_url}'"));
        }
        Ok(())
    }
}

/// Resolve the config path from `MANTIS_CONFIG_PATH`, the project directory,
/// or XDG defaults.
pub fn resolve_config_path(project_dir: &Path) -> Option<PathBuf> {
    if let Some(p) = env::var_os("MANTIS_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    let local = project_dir.join(PROJECT_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/mantis/config.toml`
/// or `~/.config/mantis/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("mantis").join("config.toml"))
}
