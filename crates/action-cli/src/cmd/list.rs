use crate::output::{print_json, print_table};
use crate::project_file;
use std::path::Path;

pub fn run(project_path: &Path, json: bool) -> anyhow::Result<()> {
    let project = project_file::load(project_path)?;

    if json {
        #[derive(serde::Serialize)]
        struct ActionSummary<'a> {
            id: i32,
            title: &'a str,
            timer_mode: String,
            binary: bool,
            payload_len: usize,
        }

        let summaries: Vec<ActionSummary> = project
            .actions()
            .iter()
            .map(|a| ActionSummary {
                id: a.action_id(),
                title: a.title(),
                timer_mode: a.timer_mode().to_string(),
                binary: a.binary_data(),
                payload_len: a.tx_bytes().len(),
            })
            .collect();
        return print_json(&summaries);
    }

    if project.actions().is_empty() {
        println!("No actions in '{}'.", project_path.display());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = project
        .actions()
        .iter()
        .map(|a| {
            vec![
                a.action_id().to_string(),
                a.title().to_string(),
                a.timer_mode().to_string(),
                if a.binary_data() { "hex" } else { "text" }.to_string(),
                a.tx_bytes().len().to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "TITLE", "TIMER", "DATA", "BYTES"], rows);
    Ok(())
}
