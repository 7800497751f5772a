use crate::action::{Action, Record};
use crate::error::{ActionError, Result};
use crate::io::atomic_write;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

const KEY_TITLE: &str = "title";
const KEY_ACTIONS: &str = "actions";

/// A project file: a titled, ordered list of actions.
///
/// Keys other than `title` and `actions` are carried through load/save
/// untouched so editors that store more in the file don't lose data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub title: String,
    actions: Vec<Action>,
    extra: Record,
}

impl Project {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let project = Self::from_json(&data)?;
        debug!(
            path = %path.display(),
            actions = project.actions.len(),
            "loaded project"
        );
        Ok(project)
    }

    /// Parse a project document. Action ids are assigned by position.
    pub fn from_json(data: &str) -> Result<Self> {
        let Value::Object(mut root) = serde_json::from_str::<Value>(data)? else {
            return Err(ActionError::InvalidProject(
                "top-level value must be an object".to_string(),
            ));
        };

        let title = match root.remove(KEY_TITLE) {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };

        let actions = match root.remove(KEY_ACTIONS) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    let id = action_id_for(idx)?;
                    let mut action = Action::new(id);
                    match item {
                        Value::Object(record) => {
                            action.read(record);
                            Ok(action)
                        }
                        _ => Err(ActionError::InvalidProject(format!(
                            "action at index {idx} is not an object"
                        ))),
                    }
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(ActionError::InvalidProject(
                    "'actions' must be an array".to_string(),
                ))
            }
        };

        Ok(Self {
            title,
            actions,
            extra: root,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        let mut root = self.extra.clone();
        root.insert(KEY_TITLE.into(), Value::from(self.title.clone()));
        root.insert(
            KEY_ACTIONS.into(),
            Value::Array(
                self.actions
                    .iter()
                    .map(|a| Value::Object(a.serialize()))
                    .collect(),
            ),
        );
        Ok(serde_json::to_string_pretty(&Value::Object(root))?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = self.to_json()?;
        atomic_write(path, data.as_bytes())?;
        debug!(
            path = %path.display(),
            actions = self.actions.len(),
            "saved project"
        );
        Ok(())
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn action(&self, action_id: i32) -> Result<&Action> {
        self.actions
            .iter()
            .find(|a| a.action_id() == action_id)
            .ok_or(ActionError::ActionNotFound(action_id))
    }

    pub fn action_mut(&mut self, action_id: i32) -> Result<&mut Action> {
        self.actions
            .iter_mut()
            .find(|a| a.action_id() == action_id)
            .ok_or(ActionError::ActionNotFound(action_id))
    }

    /// Append a default action with a fresh id and return it for editing.
    pub fn add_action(&mut self) -> &mut Action {
        let id = self
            .actions
            .iter()
            .map(Action::action_id)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        self.actions.push(Action::new(id));
        let last = self.actions.len() - 1;
        &mut self.actions[last]
    }

    /// Remove an action. Other actions keep their ids.
    pub fn remove_action(&mut self, action_id: i32) -> Result<Action> {
        let idx = self
            .actions
            .iter()
            .position(|a| a.action_id() == action_id)
            .ok_or(ActionError::ActionNotFound(action_id))?;
        Ok(self.actions.remove(idx))
    }

    /// Actions the scheduler fires as soon as a device connects.
    pub fn auto_execute_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|a| a.auto_execute_on_connect())
    }

    /// Actions with a timer mode other than off.
    pub fn timed_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|a| !a.timer_mode().is_off())
    }
}

fn action_id_for(idx: usize) -> Result<i32> {
    i32::try_from(idx).map_err(|_| ActionError::InvalidProject("too many actions".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimerMode;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "title": "Bench PSU",
        "frameStart": "$",
        "actions": [
            { "title": "Output on", "txData": "OUTP ON", "eol": "\\n" },
            {},
            { "title": "Poll", "txData": "MEAS?", "timerMode": 1, "timerIntervalMs": 500 },
            { "title": "Reset", "txData": "AA55", "binary": true, "autoExecuteOnConnect": true }
        ]
    }"#;

    #[test]
    fn load_assigns_ids_by_position() {
        let p = Project::from_json(SAMPLE).unwrap();
        assert_eq!(p.title, "Bench PSU");
        let ids: Vec<i32> = p.actions().iter().map(Action::action_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(p.action(0).unwrap().tx_bytes(), b"OUTP ON\n");
        assert_eq!(p.action(3).unwrap().tx_bytes(), vec![0xAA, 0x55]);
    }

    #[test]
    fn empty_record_becomes_default_action() {
        let p = Project::from_json(SAMPLE).unwrap();
        assert_eq!(*p.action(1).unwrap(), Action::new(1));
    }

    #[test]
    fn missing_actions_is_empty_project() {
        let p = Project::from_json(r#"{"title": "x"}"#).unwrap();
        assert!(p.actions().is_empty());
    }

    #[test]
    fn rejects_non_object_root() {
        let err = Project::from_json("[]").unwrap_err();
        assert!(matches!(err, ActionError::InvalidProject(_)));
    }

    #[test]
    fn rejects_non_array_actions() {
        let err = Project::from_json(r#"{"actions": {}}"#).unwrap_err();
        assert!(matches!(err, ActionError::InvalidProject(_)));
    }

    #[test]
    fn rejects_non_object_action() {
        let err = Project::from_json(r#"{"actions": [1]}"#).unwrap_err();
        assert!(err.to_string().contains("index 0"));
    }

    #[test]
    fn save_and_load_round_trip_preserves_extra_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("project.json");
        let p = Project::from_json(SAMPLE).unwrap();
        p.save(&path).unwrap();

        let loaded = Project::load(&path).unwrap();
        assert_eq!(loaded, p);
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["frameStart"], "$");
    }

    #[test]
    fn add_action_uses_next_free_id() {
        let mut p = Project::new("t");
        assert_eq!(p.add_action().action_id(), 0);
        assert_eq!(p.add_action().action_id(), 1);
        p.remove_action(0).unwrap();
        assert_eq!(p.add_action().action_id(), 2);
    }

    #[test]
    fn remove_keeps_other_ids() {
        let mut p = Project::from_json(SAMPLE).unwrap();
        let removed = p.remove_action(1).unwrap();
        assert_eq!(removed.action_id(), 1);
        let ids: Vec<i32> = p.actions().iter().map(Action::action_id).collect();
        assert_eq!(ids, vec![0, 2, 3]);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut p = Project::from_json(SAMPLE).unwrap();
        assert!(matches!(p.action(42), Err(ActionError::ActionNotFound(42))));
        assert!(matches!(p.remove_action(42), Err(ActionError::ActionNotFound(42))));
    }

    #[test]
    fn scheduler_views() {
        let p = Project::from_json(SAMPLE).unwrap();
        let timed: Vec<i32> = p.timed_actions().map(Action::action_id).collect();
        assert_eq!(timed, vec![2]);
        assert_eq!(p.action(2).unwrap().timer_mode(), TimerMode::AutoStart);
        let auto: Vec<i32> = p.auto_execute_actions().map(Action::action_id).collect();
        assert_eq!(auto, vec![3]);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Project::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ActionError::Io(_)));
    }
}
