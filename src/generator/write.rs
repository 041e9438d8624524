use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one generated module in write mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Overwritten,
    /// The file existed and `force` was not set
    Skipped,
}

/// Write a generated module into `dir`, creating the directory if needed.
///
/// An existing file is only replaced when `force` is set.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written
pub fn write_module(
    dir: &Path,
    file_name: &str,
    contents: &str,
    force: bool,
) -> anyhow::Result<WriteOutcome> {
    let outcomes = write_modules(dir, &[(file_name.to_string(), contents.to_string())], force)?;
    Ok(outcomes.first().copied().unwrap_or(WriteOutcome::Skipped))
}

/// Write several generated modules into `dir` as one unit.
///
/// Every target is checked and every new file is staged next to its target
/// before any existing file is touched. A failure while checking or staging
/// leaves the directory as it was.
///
/// # Errors
///
/// Returns an error if a target is a directory, or if creating, staging or
/// renaming a file fails
pub fn write_modules(
    dir: &Path,
    modules: &[(String, String)],
    force: bool,
) -> anyhow::Result<Vec<WriteOutcome>> {
    let mut plan = Vec::with_capacity(modules.len());
    for (file_name, _) in modules {
        let path = dir.join(file_name);
        if path.is_dir() {
            anyhow::bail!("Cannot write {:?}: a directory is in the way", path);
        }
        let outcome = match (path.exists(), force) {
            (true, false) => WriteOutcome::Skipped,
            (true, true) => WriteOutcome::Overwritten,
            (false, _) => WriteOutcome::Written,
        };
        plan.push((path, outcome));
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {:?}", dir))?;

    let mut staged: Vec<(PathBuf, &Path)> = Vec::new();
    for ((path, outcome), (_, contents)) in plan.iter().zip(modules) {
        if *outcome == WriteOutcome::Skipped {
            tracing::warn!(file = %path.display(), "skipping existing file (use --force to overwrite)");
            continue;
        }
        let tmp = staging_path(path);
        if let Err(err) = fs::write(&tmp, contents) {
            discard(&staged);
            return Err(err).with_context(|| format!("Failed to write {:?}", tmp));
        }
        staged.push((tmp, path.as_path()));
    }

    for (tmp, path) in &staged {
        fs::rename(tmp, path).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::info!(file = %path.display(), "wrote generated module");
    }
    Ok(plan.into_iter().map(|(_, outcome)| outcome).collect())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.drfgen-tmp"))
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        if let Err(err) = fs::remove_file(tmp) {
            tracing::warn!(file = %tmp.display(), %err, "failed to remove staged file");
        }
    }
}

/// The status line printed for a module in write mode.
pub fn status_line(file_name: &str, outcome: WriteOutcome) -> String {
    match outcome {
        WriteOutcome::Written => format!("- writing {file_name}"),
        WriteOutcome::Overwritten => format!("- overwriting {file_name}"),
        WriteOutcome::Skipped => {
            format!("- skipping {file_name} (already exists; use --force to overwrite)")
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_write_then_skip_then_force() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("blog");

        let first = write_module(&app_dir, "views.py", "one", false).unwrap();
        assert_eq!(first, WriteOutcome::Written);
        assert_eq!(fs::read_to_string(app_dir.join("views.py")).unwrap(), "one");

        let second = write_module(&app_dir, "views.py", "two", false).unwrap();
        assert_eq!(second, WriteOutcome::Skipped);
        assert_eq!(fs::read_to_string(app_dir.join("views.py")).unwrap(), "one");

        let third = write_module(&app_dir, "views.py", "three", true).unwrap();
        assert_eq!(third, WriteOutcome::Overwritten);
        assert_eq!(fs::read_to_string(app_dir.join("views.py")).unwrap(), "three");
    }

    #[test]
    fn test_write_modules_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("views.py")).unwrap();
        let modules = vec![
            ("serializers.py".to_string(), "s".to_string()),
            ("views.py".to_string(), "v".to_string()),
            ("urls.py".to_string(), "u".to_string()),
        ];
        let err = write_modules(dir.path(), &modules, true).unwrap_err();
        assert!(err.to_string().contains("a directory is in the way"));
        assert!(!dir.path().join("serializers.py").exists());
        assert!(!dir.path().join("urls.py").exists());
    }

    #[test]
    fn test_write_modules_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("urls.py"), "old").unwrap();
        let modules = vec![
            ("views.py".to_string(), "v".to_string()),
            ("urls.py".to_string(), "u".to_string()),
        ];
        let outcomes = write_modules(dir.path(), &modules, false).unwrap();
        assert_eq!(outcomes, vec![WriteOutcome::Written, WriteOutcome::Skipped]);
        assert_eq!(fs::read_to_string(dir.path().join("urls.py")).unwrap(), "old");
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.ends_with(".drfgen-tmp")), "{names:?}");
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(status_line("urls.py", WriteOutcome::Written), "- writing urls.py");
        assert!(status_line("urls.py", WriteOutcome::Skipped).contains("--force"));
    }
}
