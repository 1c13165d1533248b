use crate::Result;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Today's date as `YYYY-MM-DD`, used in output directory names.
pub fn current_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Create (if needed) and return `{root}/{category} {date}`.
///
/// Reports from one run of one workflow land together, dated, so reruns
/// never overwrite yesterday's output.
pub fn category_dir(root: &Path, category: &str) -> Result<PathBuf> {
    let dir = root.join(format!("{} {}", category, current_date()));
    fs::create_dir_all(&dir)?;
    tracing::debug!("Output directory: {}", dir.display());
    Ok(dir)
}

/// Move a staged download to its final artifact path.
///
/// Rename first; when that fails (staging tempdir on another filesystem),
/// fall back to copy-and-delete.
pub fn move_artifact(staged: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    match fs::rename(staged, dest) {
        Ok(()) => {}
        Err(e) => {
            tracing::debug!(
                "Rename {} -> {} failed ({}), copying instead",
                staged.display(),
                dest.display(),
                e
            );
            fs::copy(staged, dest)?;
            fs::remove_file(staged)?;
        }
    }

    tracing::info!("Saved artifact: {}", dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_category_dir_is_dated() {
        let root = TempDir::new().unwrap();
        let dir = category_dir(root.path(), "LK - Neraca").unwrap();

        assert!(dir.is_dir());
        let name = dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("LK - Neraca "));
        assert!(name.ends_with(&current_date()));
    }

    #[test]
    fn test_move_artifact_creates_parents() {
        let root = TempDir::new().unwrap();
        let staged = root.path().join("staged.xlsx");
        fs::write(&staged, b"report bytes").unwrap();

        let dest = root.path().join("out/nested/final.xlsx");
        move_artifact(&staged, &dest).unwrap();

        assert!(!staged.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"report bytes");
    }
}
