use colored::Colorize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::errors::KubedError;
use crate::schemas::settings::Settings;
use crate::{log_debug, log_error, log_info};

/// File name of the optional settings file inside the kubed home.
pub const SETTINGS_FILE_NAME: &str = "config.yaml";

/// Reads `config.yaml` from `kubed_home`.
///
/// # Returns
/// * `Ok(None)` when the file does not exist.
/// * `Ok(Some(settings))` when it parsed.
/// * `Err(KubedError::Settings)` when it exists but is not valid YAML for [`Settings`].
pub fn read_settings(kubed_home: &Path) -> Result<Option<Settings>, KubedError> {
    let path = kubed_home.join(SETTINGS_FILE_NAME);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log_debug!("[Settings] No settings file at {}", path.display());
            return Ok(None);
        }
        Err(e) => {
            // Unreadable is treated like absent; there is nothing to parse.
            log_debug!("[Settings] Could not read {}: {}", path.display(), e);
            return Ok(None);
        }
    };
    serde_yaml::from_str::<Settings>(&contents)
        .map(Some)
        .map_err(|source| KubedError::Settings { path, source })
}

/// Loads settings, falling back to defaults when the file is missing or broken.
pub fn load_settings(kubed_home: &Path) -> Settings {
    match read_settings(kubed_home) {
        Ok(Some(settings)) => {
            log_info!(
                "[Settings] Loaded {}",
                kubed_home.join(SETTINGS_FILE_NAME).display().to_string().cyan()
            );
            match serde_json::to_string_pretty(&settings) {
                Ok(pretty) => log_debug!("[Settings] Effective settings:\n{}", pretty),
                Err(e) => log_debug!("[Settings] {:?} ({})", settings, e),
            }
            settings
        }
        Ok(None) => Settings::default(),
        Err(e) => {
            log_error!("{}. Using default settings.", e.to_string().red());
            Settings::default()
        }
    }
}
