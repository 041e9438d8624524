use super::types::ProjectManifest;
use anyhow::Context;
use std::path::Path;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Parse manifest text. `yaml` selects the YAML parser, JSON otherwise.
pub fn parse_manifest(content: &str, yaml: bool) -> anyhow::Result<ProjectManifest> {
    let manifest: ProjectManifest = if yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    Ok(manifest)
}

/// Load a project manifest from disk.
///
/// Relative app paths in the returned manifest resolve against the
/// manifest's own directory.
pub fn load_manifest(path: &Path) -> anyhow::Result<ProjectManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {:?}", path))?;
    let mut manifest = parse_manifest(&content, is_yaml(path))
        .with_context(|| format!("Failed to parse manifest {:?}", path))?;
    manifest.base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    tracing::debug!(
        manifest = %path.display(),
        apps = manifest.apps.len(),
        "loaded project manifest"
    );
    Ok(manifest)
}
