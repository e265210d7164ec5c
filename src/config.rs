use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub deadlines: DeadlinesConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DeadlinesConfig {
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u64,
    #[serde(default = "default_day_refresh_minutes")]
    pub day_refresh_minutes: u64,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

impl Default for DeadlinesConfig {
    fn default() -> Self {
        Self {
            refresh_minutes: default_refresh_minutes(),
            day_refresh_minutes: default_day_refresh_minutes(),
            max_items: default_max_items(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalyticsConfig {
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Empty means `planner.log` in the config directory.
    #[serde(default)]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

impl LoggingConfig {
    pub fn path(&self, config_dir: &Path) -> PathBuf {
        if self.file.trim().is_empty() {
            config_dir.join("planner.log")
        } else {
            PathBuf::from(&self.file)
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct KeybindingsConfig {
    #[serde(default = "default_preset")]
    pub preset: String,
    #[serde(default)]
    pub bindings: HashMap<String, String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            bindings: HashMap::new(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_timeout() -> u64 {
    30
}

fn default_refresh_minutes() -> u64 {
    5
}

fn default_day_refresh_minutes() -> u64 {
    60
}

fn default_max_items() -> usize {
    6
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "info".into()
}

fn default_preset() -> String {
    "vim".into()
}

impl AppConfig {
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        let config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("PLANNER_").split("__"))
            .extract()
            .map_err(|e| PlannerError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.server.base_url.trim();
        if url.is_empty() {
            return Err(PlannerError::Config("server.base_url is required".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PlannerError::Config(
                "server.base_url must start with http:// or https://".into(),
            ));
        }
        if self.server.timeout_secs == 0 {
            return Err(PlannerError::Config(
                "server.timeout_secs must be positive".into(),
            ));
        }
        if self.deadlines.refresh_minutes == 0 || self.deadlines.day_refresh_minutes == 0 {
            return Err(PlannerError::Config(
                "deadline refresh intervals must be positive".into(),
            ));
        }
        if self.deadlines.max_items == 0 {
            return Err(PlannerError::Config(
                "deadlines.max_items must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn config_dir() -> Option<PathBuf> {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(|xdg| PathBuf::from(xdg).join("planner-tui"))
            .or_else(|| {
                directories::BaseDirs::new()
                    .map(|dirs| dirs.home_dir().join(".config").join("planner-tui"))
            })
    }

    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = r#"[server]
base_url = "http://127.0.0.1:5000"  # or set PLANNER_SERVER__BASE_URL
timeout_secs = 30

[deadlines]
refresh_minutes = 5
day_refresh_minutes = 60
max_items = 6

[analytics]
export_dir = "."

[logging]
level = "info"
file = ""  # defaults to planner.log next to this file

[keybindings]
preset = "vim"  # vim | emacs | arrows

# Override specific keys:
# [keybindings.bindings]
# quit = "Ctrl+q"
# refresh = "F5"
"#;

        std::fs::write(path, content)?;
        Ok(())
    }
}
