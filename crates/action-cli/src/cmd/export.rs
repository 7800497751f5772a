use crate::output::print_json;
use crate::project_file;
use std::path::Path;

pub fn run(project_path: &Path, id: i32) -> anyhow::Result<()> {
    let project = project_file::load(project_path)?;
    print_json(&project.action(id)?.serialize())
}
