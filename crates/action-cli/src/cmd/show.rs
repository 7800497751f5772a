use crate::output::print_json;
use crate::project_file;
use action_core::codec::bytes_to_hex;
use std::path::Path;

pub fn run(project_path: &Path, id: i32, json: bool) -> anyhow::Result<()> {
    let project = project_file::load(project_path)?;
    let action = project.action(id)?;
    let payload = bytes_to_hex(&action.tx_bytes());

    if json {
        return print_json(&serde_json::json!({
            "id": action.action_id(),
            "record": action.serialize(),
            "payload": payload,
        }));
    }

    println!("ID:          {}", action.action_id());
    println!("Title:       {}", action.title());
    println!("Icon:        {}", action.icon());
    println!(
        "Data:        {} ({})",
        action.tx_data(),
        if action.binary_data() { "hex" } else { "text" }
    );
    println!("EOL:         {}", action.eol_sequence());
    println!("Timer:       {}", action.timer_mode());
    println!("Interval:    {} ms", action.timer_interval_ms());
    println!("On connect:  {}", action.auto_execute_on_connect());
    println!("Payload:     {payload}");

    if !action.timer_mode().is_off() && action.timer_interval_ms() <= 0 {
        eprintln!(
            "warning: timer interval {} ms is not positive",
            action.timer_interval_ms()
        );
    }

    Ok(())
}
