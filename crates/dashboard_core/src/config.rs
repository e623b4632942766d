use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use shared::DashboardError;
use tracing::warn;

use crate::search::DashboardTab;

pub const DEFAULT_SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_tab: DashboardTab,
    pub task_drilldown: bool,
    pub export_dir: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_tab: DashboardTab::OnTrack,
            task_drilldown: true,
            export_dir: None,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    /// Configured export directory, else the user's download directory, else
    /// the current directory.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Applies one `APP__*` override. Unknown keys are ignored.
    pub fn apply_override(&mut self, key: &str, raw: &str) -> Result<(), DashboardError> {
        match key {
            "APP__DEFAULT_TAB" => self.default_tab = DashboardTab::parse(raw)?,
            "APP__TASK_DRILLDOWN" => self.task_drilldown = parse_flag("task_drilldown", raw)?,
            "APP__EXPORT_DIR" => {
                let raw = raw.trim();
                self.export_dir = (!raw.is_empty()).then(|| PathBuf::from(raw));
            }
            "APP__LOG_FILTER" => self.log_filter = raw.trim().to_string(),
            _ => {}
        }
        Ok(())
    }
}

pub const ENV_OVERRIDES: [&str; 4] = [
    "APP__DEFAULT_TAB",
    "APP__TASK_DRILLDOWN",
    "APP__EXPORT_DIR",
    "APP__LOG_FILTER",
];

fn parse_flag(key: &str, raw: &str) -> Result<bool, DashboardError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DashboardError::invalid_setting(
            key,
            format!("'{other}' is not a boolean"),
        )),
    }
}

pub fn load_settings(path: Option<&Path>) -> Settings {
    load_settings_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_settings`] with an injectable environment lookup.
pub fn load_settings_with(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<Settings>(&raw) {
            Ok(file_cfg) => settings = file_cfg,
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring unreadable settings file"),
        }
    }

    for key in ENV_OVERRIDES {
        if let Some(value) = env(key) {
            if let Err(err) = settings.apply_override(key, &value) {
                warn!(key, error = %err, "ignoring environment override");
            }
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
