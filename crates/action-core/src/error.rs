use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action {0} not found")]
    ActionNotFound(i32),

    #[error("invalid project file: {0}")]
    InvalidProject(String),

    #[error("invalid timer mode '{0}': expected off, auto_start, start_on_trigger, toggle_on_trigger or 0-3")]
    InvalidTimerMode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ActionError>;
