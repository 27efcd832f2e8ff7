//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.shiptalk/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::assistant::DEFAULT_ASSISTANT_DELAY_MS;
use crate::core::chat::DEFAULT_DISPLAY_NAME;
use crate::core::feed::{
    DEFAULT_COLLAPSED_COMMENTS, DEFAULT_COMMENT_AUTHOR, DEFAULT_HOT_THRESHOLD, Tab,
};
use crate::core::model::Category;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShipTalkConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub comments: CommentsConfig,
    #[serde(default)]
    pub camera: CameraConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_tab: Option<Tab>,
    pub hot_threshold: Option<i64>,
    pub collapsed_comments: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AssistantConfig {
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CommentsConfig {
    pub author: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CameraConfig {
    pub enabled: Option<bool>,
    /// Whether the simulated device reports a camera at all.
    pub available: Option<bool>,
    pub latency_ms: Option<u64>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_tab: Tab,
    pub start_category: Option<Category>,
    pub hot_threshold: i64,
    pub collapsed_comments: usize,
    pub assistant_delay: Duration,
    pub display_name: String,
    pub comment_author: String,
    pub camera_enabled: bool,
    pub camera_available: bool,
    pub camera_latency: Duration,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with(&ShipTalkConfig::default(), &CliOverrides::default(), |_| None)
    }
}

/// Values supplied on the command line (None = flag not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub tab: Option<Tab>,
    pub category: Option<Category>,
    pub no_camera: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.shiptalk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".shiptalk").join("config.toml"))
}

/// Load config from `~/.shiptalk/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ShipTalkConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ShipTalkConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ShipTalkConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ShipTalkConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ShipTalkConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ShipTalkConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# ShipTalk Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_tab = "all"                  # "all", "hot", "new" or "live"
# hot_threshold = 20                 # posts need strictly more upvotes to be hot
# collapsed_comments = 2             # comments shown before "Show all"

# [assistant]
# delay_ms = 2000                    # simulated thinking time

# [chat]
# display_name = "You"

# [comments]
# author = "Anonymous User"

# [camera]
# enabled = true                     # offer the preview in live-call dialogs
# available = true                   # false simulates a machine without a camera
# latency_ms = 250
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

fn env_parsed<T: std::str::FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    let raw = env(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ShipTalkConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |name| std::env::var(name).ok())
}

/// Same as [`resolve`], reading env vars through `env`.
pub fn resolve_with(
    config: &ShipTalkConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Tab: CLI → env → config → default
    let start_tab = cli
        .tab
        .or_else(|| env_parsed(&env, "SHIPTALK_START_TAB"))
        .or(config.general.start_tab)
        .unwrap_or_default();

    // Hot threshold: env → config → default
    let hot_threshold = env_parsed(&env, "SHIPTALK_HOT_THRESHOLD")
        .or(config.general.hot_threshold)
        .unwrap_or(DEFAULT_HOT_THRESHOLD);

    // Assistant delay: env → config → default
    let delay_ms = env_parsed(&env, "SHIPTALK_ASSISTANT_DELAY_MS")
        .or(config.assistant.delay_ms)
        .unwrap_or(DEFAULT_ASSISTANT_DELAY_MS);

    ResolvedConfig {
        start_tab,
        start_category: cli.category,
        hot_threshold,
        collapsed_comments: config
            .general
            .collapsed_comments
            .unwrap_or(DEFAULT_COLLAPSED_COMMENTS),
        assistant_delay: Duration::from_millis(delay_ms),
        display_name: config
            .chat
            .display_name
            .clone()
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
        comment_author: config
            .comments
            .author
            .clone()
            .unwrap_or_else(|| DEFAULT_COMMENT_AUTHOR.to_string()),
        camera_enabled: !cli.no_camera && config.camera.enabled.unwrap_or(true),
        camera_available: config.camera.available.unwrap_or(true),
        camera_latency: Duration::from_millis(config.camera.latency_ms.unwrap_or(250)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config_parses() {
        let config = ShipTalkConfig::default();
        assert!(config.general.start_tab.is_none());
        assert!(config.chat.display_name.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(&ShipTalkConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.hot_threshold, DEFAULT_HOT_THRESHOLD);
        assert_eq!(resolved.collapsed_comments, 2);
        assert_eq!(resolved.display_name, "You");
        assert_eq!(resolved.comment_author, "Anonymous User");
        assert!(resolved.camera_enabled);
        assert!(resolved.start_category.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ShipTalkConfig {
            general: GeneralConfig {
                start_tab: Some(Tab::New),
                hot_threshold: None,
                collapsed_comments: Some(3),
            },
            chat: ChatConfig {
                display_name: Some("dock-7".to_string()),
            },
            comments: CommentsConfig {
                author: Some("Warehouse Lead".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.collapsed_comments, 3);
        assert_eq!(resolved.display_name, "dock-7");
        assert_eq!(resolved.comment_author, "Warehouse Lead");
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = ShipTalkConfig {
            general: GeneralConfig {
                start_tab: Some(Tab::New),
                ..Default::default()
            },
            camera: CameraConfig {
                enabled: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            tab: Some(Tab::Live),
            category: Some(Category::Packaging),
            no_camera: true,
        };
        let resolved = resolve_with(&config, &cli, no_env);
        assert_eq!(resolved.start_tab, Tab::Live);
        assert_eq!(resolved.start_category, Some(Category::Packaging));
        assert!(!resolved.camera_enabled);
    }

    #[test]
    fn test_resolve_env_beats_config_file() {
        let config = ShipTalkConfig {
            general: GeneralConfig {
                start_tab: Some(Tab::New),
                hot_threshold: Some(30),
                ..Default::default()
            },
            assistant: AssistantConfig { delay_ms: Some(500) },
            ..Default::default()
        };
        let env = env_from(&[
            ("SHIPTALK_START_TAB", "hot"),
            ("SHIPTALK_HOT_THRESHOLD", "5"),
            ("SHIPTALK_ASSISTANT_DELAY_MS", "100"),
        ]);
        let resolved = resolve_with(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.start_tab, Tab::Hot);
        assert_eq!(resolved.hot_threshold, 5);
        assert_eq!(resolved.assistant_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_resolve_cli_beats_env() {
        let cli = CliOverrides {
            tab: Some(Tab::Live),
            ..Default::default()
        };
        let env = env_from(&[("SHIPTALK_START_TAB", "new")]);
        let resolved = resolve_with(&ShipTalkConfig::default(), &cli, env);
        assert_eq!(resolved.start_tab, Tab::Live);
    }

    #[test]
    fn test_resolve_ignores_malformed_env_values() {
        let config = ShipTalkConfig {
            general: GeneralConfig {
                hot_threshold: Some(30),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = env_from(&[
            ("SHIPTALK_START_TAB", "feed"),
            ("SHIPTALK_HOT_THRESHOLD", "lots"),
            ("SHIPTALK_ASSISTANT_DELAY_MS", "-1"),
        ]);
        let resolved = resolve_with(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.start_tab, Tab::All);
        assert_eq!(resolved.hot_threshold, 30);
        assert_eq!(
            resolved.assistant_delay,
            Duration::from_millis(DEFAULT_ASSISTANT_DELAY_MS)
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
start_tab = "hot"
hot_threshold = 25
collapsed_comments = 1

[assistant]
delay_ms = 500

[chat]
display_name = "Me"

[camera]
enabled = false
available = false
"#;
        let config: ShipTalkConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.start_tab, Some(Tab::Hot));
        assert_eq!(config.general.hot_threshold, Some(25));
        assert_eq!(config.assistant.delay_ms, Some(500));
        assert_eq!(config.chat.display_name.as_deref(), Some("Me"));
        assert_eq!(config.camera.enabled, Some(false));
        assert!(config.comments.author.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[assistant]
delay_ms = 10
"#;
        let config: ShipTalkConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.assistant.delay_ms, Some(10));
        assert!(config.general.hot_threshold.is_none());
        assert!(config.camera.latency_ms.is_none());
    }

    #[test]
    fn test_bad_tab_is_a_parse_error() {
        let result: Result<ShipTalkConfig, _> = toml::from_str("[general]\nstart_tab = \"feed\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_from_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("shiptalk-definitely-missing").join("config.toml");
        assert!(matches!(load_config_from(&path), Err(ConfigError::Io(_))));
    }
}
