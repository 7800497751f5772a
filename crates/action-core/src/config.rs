use crate::action::{Action, DEFAULT_ICON, DEFAULT_TIMER_INTERVAL_MS};
use crate::error::Result;
use crate::io::atomic_write;
use crate::types::TimerMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

// ---------------------------------------------------------------------------
// ActionDefaults
// ---------------------------------------------------------------------------

/// Field values given to actions created from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefaults {
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub eol: String,
    #[serde(default = "default_timer_interval_ms")]
    pub timer_interval_ms: i32,
    #[serde(default)]
    pub timer_mode: TimerMode,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

fn default_timer_interval_ms() -> i32 {
    DEFAULT_TIMER_INTERVAL_MS
}

impl Default for ActionDefaults {
    fn default() -> Self {
        Self {
            icon: default_icon(),
            eol: String::new(),
            timer_interval_ms: default_timer_interval_ms(),
            timer_mode: TimerMode::default(),
        }
    }
}

impl ActionDefaults {
    pub fn apply(&self, action: &mut Action) {
        action.set_icon(&self.icon);
        action.set_eol_sequence(self.eol.clone());
        action.set_timer_interval_ms(self.timer_interval_ms);
        action.set_timer_mode(self.timer_mode);
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: ActionDefaults,
}

impl Config {
    /// Load from a YAML file. A missing file yields the default config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        atomic_write(path, data.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActionError;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("actions.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.defaults.icon, "Play Property");
        assert_eq!(config.defaults.timer_interval_ms, 100);
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("actions.yaml");
        std::fs::write(&path, "defaults:\n  eol: '\\r\\n'\n  timer_mode: auto_start\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.defaults.eol, r"\r\n");
        assert_eq!(config.defaults.timer_mode, TimerMode::AutoStart);
        assert_eq!(config.defaults.icon, "Play Property");
        assert_eq!(config.defaults.timer_interval_ms, 100);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("actions.yaml");
        let mut config = Config::default();
        config.defaults.timer_interval_ms = 1000;
        config.defaults.timer_mode = TimerMode::ToggleOnTrigger;
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("actions.yaml");
        std::fs::write(&path, "defaults: [unclosed").unwrap();
        assert!(matches!(Config::load(&path), Err(ActionError::Yaml(_))));
    }

    #[test]
    fn apply_sets_defaults_on_action() {
        let defaults = ActionDefaults {
            icon: "  Send  ".to_string(),
            eol: r"\n".to_string(),
            timer_interval_ms: 50,
            timer_mode: TimerMode::StartOnTrigger,
        };
        let mut action = Action::new(0);
        defaults.apply(&mut action);
        assert_eq!(action.icon(), "Send");
        assert_eq!(action.eol_sequence(), r"\n");
        assert_eq!(action.timer_interval_ms(), 50);
        assert_eq!(action.timer_mode(), TimerMode::StartOnTrigger);
    }
}
