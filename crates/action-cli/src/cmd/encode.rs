use crate::output::print_json;
use crate::project_file;
use action_core::codec::bytes_to_hex;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

pub fn run(project_path: &Path, id: i32, raw: bool, json: bool) -> anyhow::Result<()> {
    let project = project_file::load(project_path)?;
    let bytes = project.action(id)?.tx_bytes();

    if raw {
        let mut out = std::io::stdout().lock();
        out.write_all(&bytes)
            .and_then(|()| out.flush())
            .context("failed to write payload")?;
        return Ok(());
    }

    if json {
        return print_json(&serde_json::json!({
            "id": id,
            "len": bytes.len(),
            "hex": bytes_to_hex(&bytes),
        }));
    }

    println!("{}", bytes_to_hex(&bytes));
    Ok(())
}
