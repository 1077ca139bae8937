use deckwidgets::dial::DialRange;
use deckwidgets::feed::StreamUrl;
use deckwidgets::select::{OptionValue, SelectOption};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SourceIcon {
    #[strum(serialize = "ScreenShare", serialize = "screen", serialize = "cast")]
    ScreenShare,
    #[strum(serialize = "Laptop", serialize = "pc")]
    Laptop,
    #[strum(serialize = "Camera", serialize = "webcam")]
    Camera,
    #[default]
    #[strum(serialize = "Generic")]
    Generic,
}

impl SourceIcon {
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::ScreenShare => "video-display-symbolic",
            Self::Laptop => "computer-symbolic",
            Self::Camera => "camera-web-symbolic",
            Self::Generic => "input-dialpad-symbolic",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CardConfig {
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CameraConfig {
    #[serde(flatten)]
    pub card: CardConfig,
    #[serde(default)]
    pub stream_url: Option<StreamUrl>,
    #[serde(default)]
    pub swipe_prompt: Option<String>,
    #[serde(default)]
    pub swipe_success: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    pub value: OptionValue,
    pub label: String,
    #[serde(default)]
    pub icon: SourceIcon,
}

impl From<&SourceConfig> for SelectOption {
    fn from(source: &SourceConfig) -> Self {
        SelectOption {
            value: source.value.clone(),
            label: source.label.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProjectorConfig {
    #[serde(flatten)]
    pub card: CardConfig,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub selected: Vec<OptionValue>,
}

impl ProjectorConfig {
    pub fn options(&self) -> Vec<SelectOption> {
        self.sources.iter().map(SelectOption::from).collect()
    }

    pub fn icon_for(&self, value: &OptionValue) -> SourceIcon {
        self.sources
            .iter()
            .find(|s| &s.value == value)
            .map(|s| s.icon)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoomConfig {
    #[serde(flatten)]
    pub card: CardConfig,
    #[serde(default = "RoomConfig::default_min")]
    pub min: f64,
    #[serde(default = "RoomConfig::default_max")]
    pub max: f64,
    #[serde(default = "RoomConfig::default_step")]
    pub step: f64,
    #[serde(default = "RoomConfig::default_initial")]
    pub initial: f64,
}

impl RoomConfig {
    fn default_min() -> f64 {
        10.0
    }

    fn default_max() -> f64 {
        30.0
    }

    fn default_step() -> f64 {
        0.5
    }

    fn default_initial() -> f64 {
        21.0
    }

    pub fn range(&self) -> DialRange {
        DialRange::new(self.min, self.max, self.step)
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            card: CardConfig::default(),
            min: Self::default_min(),
            max: Self::default_max(),
            step: Self::default_step(),
            initial: Self::default_initial(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub microphone: CardConfig,
    #[serde(default)]
    pub projector: ProjectorConfig,
    #[serde(default)]
    pub room: RoomConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "homedeck", "homedeck").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Explicit path from the command line wins over the platform config dir.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    explicit.map_or_else(get_config_path, Ok)
}

/// Layers the bundled defaults, the user's file and `HOMEDECK_*` variables.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("HOMEDECK").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn builtin_config() -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Failed to load {}: {}; using defaults", path.display(), e);
            builtin_config().unwrap_or_else(|e| {
                log::error!("Bundled config is invalid: {}", e);
                Config::default()
            })
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_icon_deserialization() {
        let cases = vec![
            ("\"screenshare\"", SourceIcon::ScreenShare),
            ("\"ScreenShare\"", SourceIcon::ScreenShare),
            ("\"CAST\"", SourceIcon::ScreenShare),
            ("\"laptop\"", SourceIcon::Laptop),
            ("\"PC\"", SourceIcon::Laptop),
            ("\"webcam\"", SourceIcon::Camera),
            ("\"generic\"", SourceIcon::Generic),
        ];

        for (json, expected) in cases {
            let deserialized: SourceIcon = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_unknown_source_icon_is_rejected() {
        assert!(serde_json::from_str::<SourceIcon>("\"toaster\"").is_err());
    }

    #[test]
    fn test_bundled_config_is_valid() {
        let config = builtin_config().unwrap();
        assert_eq!(config.camera.card.caption, "Camera");
        assert_eq!(config.microphone.caption, "Microphone");
        assert!(!config.projector.sources.is_empty());
        assert_eq!(config.room.range(), DialRange::new(10.0, 30.0, 0.5));
        assert_eq!(config.room.initial, 21.0);
    }

    #[test]
    fn test_projector_options_and_icons() {
        let projector = ProjectorConfig {
            sources: vec![SourceConfig {
                value: OptionValue::new("laptop"),
                label: "Laptop".to_string(),
                icon: SourceIcon::Laptop,
            }],
            ..ProjectorConfig::default()
        };
        assert_eq!(projector.options(), vec![SelectOption::new("laptop", "Laptop")]);
        assert_eq!(
            projector.icon_for(&OptionValue::new("laptop")),
            SourceIcon::Laptop
        );
        assert_eq!(
            projector.icon_for(&OptionValue::new("vga")),
            SourceIcon::Generic
        );
    }

    #[test]
    fn test_room_defaults_apply_to_partial_section() {
        let room: RoomConfig =
            serde_json::from_str(r#"{"caption": "Room", "title": "Thermostat", "max": 26}"#)
                .unwrap();
        assert_eq!(room.min, 10.0);
        assert_eq!(room.max, 26.0);
        assert_eq!(room.card.title, "Thermostat");
    }

    #[test]
    fn test_missing_file_falls_back_to_bundled_config() {
        let path = std::env::temp_dir().join("homedeck-test-missing/config.toml");
        let config = load_or_default(&path);
        assert_eq!(config, builtin_config().unwrap());
    }
}
