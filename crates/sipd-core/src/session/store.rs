use super::types::CookieRecord;
use crate::Result;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default session file name, relative to the working directory.
pub const DEFAULT_SESSION_FILE: &str = "cookies.json";

/// On-disk store for the portal session cookies.
///
/// The file is a single JSON array of cookie records. Writes always replace
/// the whole file through a temp-file rename, so a partially written session
/// is never observable.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a saved session exists on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the saved cookie set.
    ///
    /// A malformed file surfaces as `Error::CorruptSession` so callers can
    /// discard it and fall back to an interactive login.
    pub fn load(&self) -> Result<Vec<CookieRecord>> {
        tracing::debug!("Loading session from: {}", self.path.display());

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let cookies: Vec<CookieRecord> = serde_json::from_reader(reader)?;

        tracing::info!("Loaded {} cookies from session file", cookies.len());
        Ok(cookies)
    }

    /// Replace the session file with the given cookie set.
    pub fn save(&self, cookies: &[CookieRecord]) -> Result<()> {
        tracing::debug!("Saving session to: {}", self.path.display());

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent)?;
                parent
            }
            _ => Path::new("."),
        };

        // Write next to the target so the final rename stays on one filesystem.
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, cookies)?;
            writer.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::info!(
            "Saved {} cookies to {}",
            cookies.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Delete the session file. Succeeds when the file is already absent.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Cleared session file: {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Session file already absent: {}", self.path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
