use crate::domain::tracker::TrackerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// AltBeacon-style parser layout for iBeacon frames
pub const IBEACON_LAYOUT: &str = "m:2-3=0215,i:4-19,i:20-21,i:22-23,p:24-24";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_true")]
    pub file_logging_enabled: bool,
    #[serde(default = "default_true")]
    pub console_logging_enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_prefix")]
    pub file_name_prefix: String,
    #[serde(default = "default_false")]
    pub show_file_line: bool,
    #[serde(default = "default_true")]
    pub show_target: bool,
    #[serde(default = "default_true")]
    pub ansi_colors: bool,
    #[serde(default)]
    pub rotation: LogRotation,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            file_logging_enabled: default_true(),
            console_logging_enabled: default_true(),
            log_dir: default_log_dir(),
            file_name_prefix: default_prefix(),
            show_file_line: default_false(),
            show_target: default_true(),
            ansi_colors: default_true(),
            rotation: LogRotation::default(),
        }
    }
}

/// Configuration handed to the ranging collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangingSettings {
    #[serde(default = "default_beacon_layout")]
    pub beacon_layout: String,
    #[serde(default = "default_scan_period_ms")]
    pub scan_period_ms: u64,
    #[serde(default)]
    pub between_scan_period_ms: u64,
    /// JSON-lines sighting recording replayed as the ranging feed
    #[serde(default)]
    pub recording_path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub loop_recording: bool,
    #[serde(default = "default_true")]
    pub start_on_launch: bool,
}

impl Default for RangingSettings {
    fn default() -> Self {
        Self {
            beacon_layout: default_beacon_layout(),
            scan_period_ms: default_scan_period_ms(),
            between_scan_period_ms: 0,
            recording_path: None,
            loop_recording: default_true(),
            start_on_launch: default_true(),
        }
    }
}

impl RangingSettings {
    /// Time between two delivered sighting batches.
    pub fn cycle_ms(&self) -> u64 {
        self.scan_period_ms + self.between_scan_period_ms
    }
}

fn default_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_prefix() -> String {
    "beacon_locator".to_string()
}
fn default_beacon_layout() -> String {
    IBEACON_LAYOUT.to_string()
}
fn default_scan_period_ms() -> u64 {
    1100
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub ranging: RangingSettings,
    #[serde(default)]
    pub log_settings: LogSettings,
    #[serde(default)]
    pub dark_mode: bool,
}

pub struct SettingsService {
    settings: Settings,
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Ok(Self::with_path(settings_path))
    }

    /// Load from an explicit file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn with_path(settings_path: PathBuf) -> Self {
        let settings = match Self::load_from_file(&settings_path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::debug!(
                    "Using default settings ({}): {}",
                    settings_path.display(),
                    e
                );
                Settings::default()
            }
        };

        Self {
            settings,
            settings_path,
        }
    }

    fn get_settings_path() -> anyhow::Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        path.push("BeaconLocator");
        fs::create_dir_all(&path)?;
        path.push("settings.json");
        Ok(path)
    }

    fn load_from_file(path: &Path) -> anyhow::Result<Settings> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.settings_path, json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tracker::DistancePolicy;

    #[test]
    fn test_defaults_from_empty_object() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.ranging.beacon_layout, IBEACON_LAYOUT);
        assert_eq!(settings.ranging.scan_period_ms, 1100);
        assert_eq!(settings.ranging.between_scan_period_ms, 0);
        assert_eq!(settings.ranging.cycle_ms(), 1100);
        assert_eq!(settings.tracker.max_range, 13.0);
        assert_eq!(settings.log_settings.rotation, LogRotation::Daily);
        assert!(!settings.dark_mode);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::with_path(dir.path().join("settings.json"));
        assert_eq!(service.get().tracker.expiry_ms, 5000);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut service = SettingsService::with_path(path.clone());
        service.get_mut().tracker.distance_policy = DistancePolicy::Clamp;
        service.get_mut().ranging.recording_path = Some(PathBuf::from("demos/corridor.jsonl"));
        service.save().unwrap();

        let reloaded = SettingsService::with_path(path);
        assert_eq!(reloaded.get().tracker.distance_policy, DistancePolicy::Clamp);
        assert_eq!(
            reloaded.get().ranging.recording_path.as_deref(),
            Some(Path::new("demos/corridor.jsonl"))
        );
    }

    #[test]
    fn test_corrupt_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let service = SettingsService::with_path(path);
        assert_eq!(service.get().ranging.scan_period_ms, 1100);
    }
}
