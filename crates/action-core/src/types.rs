use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TimerMode
// ---------------------------------------------------------------------------

/// How an external scheduler should repeat-fire an action.
///
/// The discriminants are the integers written to the `timerMode` key of a
/// persisted action record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// No timed firing.
    #[default]
    Off = 0,
    /// The scheduler starts firing as soon as the connection is initialized.
    AutoStart = 1,
    /// The scheduler starts firing the first time the action is invoked manually.
    StartOnTrigger = 2,
    /// Each manual invocation flips the scheduler between running and stopped.
    ToggleOnTrigger = 3,
}

impl TimerMode {
    pub fn all() -> &'static [TimerMode] {
        &[
            TimerMode::Off,
            TimerMode::AutoStart,
            TimerMode::StartOnTrigger,
            TimerMode::ToggleOnTrigger,
        ]
    }

    pub fn as_i64(self) -> i64 {
        self as i64
    }

    /// Checked conversion from the persisted integer form.
    pub fn from_i64(value: i64) -> Option<TimerMode> {
        TimerMode::all().iter().copied().find(|m| m.as_i64() == value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerMode::Off => "off",
            TimerMode::AutoStart => "auto_start",
            TimerMode::StartOnTrigger => "start_on_trigger",
            TimerMode::ToggleOnTrigger => "toggle_on_trigger",
        }
    }

    pub fn is_off(self) -> bool {
        self == TimerMode::Off
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimerMode {
    type Err = crate::error::ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" | "0" => Ok(TimerMode::Off),
            "auto_start" | "auto-start" | "1" => Ok(TimerMode::AutoStart),
            "start_on_trigger" | "start-on-trigger" | "2" => Ok(TimerMode::StartOnTrigger),
            "toggle_on_trigger" | "toggle-on-trigger" | "3" => Ok(TimerMode::ToggleOnTrigger),
            _ => Err(crate::error::ActionError::InvalidTimerMode(s.to_string())),
        }
    }
}
