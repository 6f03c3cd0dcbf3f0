use crate::catalog::StepCatalog;
use crate::controller::WizardController;
use crate::error::Result;
use crate::responder::{CannedResponder, Responder};
use crate::theme::ThemeVariant;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "WAYFINDER_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    pub theme: ThemeVariant,
    pub responder_delay_ms: u64,
    pub reply_timeout_ms: u64,
    /// Custom step catalog; the built-in Design Thinking journey when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::default(),
            responder_delay_ms: CannedResponder::DEFAULT_DELAY.as_millis() as u64,
            reply_timeout_ms: WizardController::DEFAULT_REPLY_TIMEOUT.as_millis() as u64,
            catalog_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Defaults, then the user config file, then `WAYFINDER_*` variables.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        debug!(path = %path.display(), "settings loaded");
        if settings.reply_timeout_ms <= settings.responder_delay_ms {
            warn!(
                delay_ms = settings.responder_delay_ms,
                timeout_ms = settings.reply_timeout_ms,
                "reply timeout does not exceed responder delay; every reply will time out"
            );
        }
        Ok(settings)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn catalog(&self) -> Result<StepCatalog> {
        match &self.catalog_path {
            Some(path) => StepCatalog::load(path),
            None => StepCatalog::design_thinking(),
        }
    }

    pub fn responder(&self) -> Arc<dyn Responder> {
        Arc::new(CannedResponder::new(Duration::from_millis(
            self.responder_delay_ms,
        )))
    }

    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }

    /// Build a fresh session controller from these settings.
    pub fn controller(&self) -> Result<WizardController> {
        Ok(WizardController::new(self.catalog()?, self.responder())
            .with_reply_timeout(self.reply_timeout()))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "wayfinder")
}

/// `~/.config/wayfinder/config.toml`, or `./config.toml` without a home directory.
pub fn config_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

/// Directory for the log file; the terminal itself is owned by the UI.
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WizardError;

    #[test]
    fn defaults_match_the_canned_agent() {
        let settings = Settings::default();
        assert_eq!(settings.theme, ThemeVariant::EverforestDark);
        assert_eq!(settings.responder_delay_ms, 1000);
        assert_eq!(settings.reply_timeout_ms, 5000);
        assert_eq!(settings.catalog_path, None);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load_keeps_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let settings = Settings {
            theme: ThemeVariant::EverforestLight,
            responder_delay_ms: 10,
            catalog_path: Some(dir.path().join("steps.toml")),
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "reply_timeout_ms = 250\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.reply_timeout_ms, 250);
        assert_eq!(settings.responder_delay_ms, 1000);
    }

    #[test]
    fn bad_value_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "reply_timeout_ms = \"soon\"\n").unwrap();

        assert!(matches!(
            Settings::load_from(&path),
            Err(WizardError::Config(_))
        ));
    }

    #[test]
    fn default_catalog_is_builtin_journey() {
        let catalog = Settings::default().catalog().unwrap();
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn controller_uses_configured_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("steps.toml");
        fs::write(&catalog_path, "[[steps]]\nname = \"Only\"\n").unwrap();

        let settings = Settings {
            catalog_path: Some(catalog_path),
            ..Settings::default()
        };
        let controller = settings.controller().unwrap();
        assert_eq!(controller.step_count(), 1);
    }
}
