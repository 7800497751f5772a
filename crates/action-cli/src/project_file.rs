use action_core::project::Project;
use anyhow::Context;
use std::path::Path;

pub fn load(path: &Path) -> anyhow::Result<Project> {
    Project::load(path).with_context(|| format!("failed to load project '{}'", path.display()))
}

/// Load the project, or start an empty one titled after the file stem.
pub fn load_or_new(path: &Path) -> anyhow::Result<Project> {
    if path.exists() {
        return load(path);
    }
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Project::new(title))
}

pub fn save(project: &Project, path: &Path) -> anyhow::Result<()> {
    project
        .save(path)
        .with_context(|| format!("failed to save project '{}'", path.display()))
}
