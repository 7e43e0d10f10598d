use std::path::Path;

use crate::config;

/// Settings for `project_dir`. Unreadable or invalid settings are logged and
/// replaced by the defaults.
pub fn load_settings(project_dir: &Path) -> config::Settings {
    match config::Settings::load(project_dir) {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                tracing::warn!("invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            tracing::warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
