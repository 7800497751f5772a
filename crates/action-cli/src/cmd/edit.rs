use crate::output::print_json;
use crate::project_file;
use action_core::{config::Config, Action, TimerMode};
use anyhow::Context;
use clap::Args;
use std::path::Path;

/// Fields settable from the command line. Omitted fields are left as they are.
#[derive(Args, Debug, Default)]
pub struct ActionArgs {
    /// Display title
    #[arg(long)]
    title: Option<String>,

    /// Icon name shown by the editor
    #[arg(long)]
    icon: Option<String>,

    /// Data to transmit: text with escapes (\r, \n, \t, ...) or hex digits with --binary
    #[arg(long = "tx")]
    tx_data: Option<String>,

    /// End-of-line sequence appended after the data (escapes allowed)
    #[arg(long)]
    eol: Option<String>,

    /// Interpret --tx as hex digits
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    binary: Option<bool>,

    /// off, auto_start, start_on_trigger, toggle_on_trigger (or 0-3)
    #[arg(long)]
    timer_mode: Option<TimerMode>,

    /// Timer interval in milliseconds
    #[arg(long, allow_negative_numbers = true)]
    interval: Option<i32>,

    /// Run the action as soon as a device connects
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    auto_execute: Option<bool>,
}

impl ActionArgs {
    fn apply(self, action: &mut Action) {
        if let Some(title) = self.title {
            action.set_title(&title);
        }
        if let Some(icon) = self.icon {
            action.set_icon(&icon);
        }
        if let Some(tx) = self.tx_data {
            action.set_tx_data(tx);
        }
        if let Some(eol) = self.eol {
            action.set_eol_sequence(eol);
        }
        if let Some(binary) = self.binary {
            action.set_binary_data(binary);
        }
        if let Some(mode) = self.timer_mode {
            action.set_timer_mode(mode);
        }
        if let Some(interval) = self.interval {
            action.set_timer_interval_ms(interval);
        }
        if let Some(auto) = self.auto_execute {
            action.set_auto_execute_on_connect(auto);
        }
    }
}

pub fn add(
    project_path: &Path,
    config_path: &Path,
    fields: ActionArgs,
    json: bool,
) -> anyhow::Result<()> {
    if fields.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
        anyhow::bail!("--title is required when adding an action");
    }

    let config = Config::load(config_path)
        .with_context(|| format!("failed to load config '{}'", config_path.display()))?;
    let mut project = project_file::load_or_new(project_path)?;

    let action = project.add_action();
    config.defaults.apply(action);
    fields.apply(action);
    let id = action.action_id();
    let title = action.title().to_string();

    project_file::save(&project, project_path)?;

    if json {
        print_json(&serde_json::json!({ "id": id, "title": title }))?;
    } else {
        println!("Added action {id}: {title}");
    }
    Ok(())
}

pub fn edit(project_path: &Path, id: i32, fields: ActionArgs, json: bool) -> anyhow::Result<()> {
    let mut project = project_file::load(project_path)?;
    fields.apply(project.action_mut(id)?);
    project_file::save(&project, project_path)?;

    if json {
        print_json(&project.action(id)?.serialize())?;
    } else {
        println!("Updated action {id}");
    }
    Ok(())
}

pub fn remove(project_path: &Path, id: i32, json: bool) -> anyhow::Result<()> {
    let mut project = project_file::load(project_path)?;
    let removed = project.remove_action(id)?;
    project_file::save(&project, project_path)?;

    if json {
        print_json(&serde_json::json!({ "removed": id, "title": removed.title() }))?;
    } else {
        println!("Removed action {id}: {}", removed.title());
    }
    Ok(())
}
