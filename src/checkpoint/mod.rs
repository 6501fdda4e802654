use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::errors::{DigestError, DigestResult};

/// File-backed store for the single "last processed" timestamp.
///
/// A missing or blank file is the canonical "no checkpoint yet" signal and is
/// not an error; a file whose contents do not parse as RFC3339 is. Writes
/// replace the whole file in one call so a reader never sees a partial value.
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> DigestResult<Option<DateTime<Utc>>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DigestError::CheckpointRead(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let trimmed = data.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        DateTime::parse_from_rfc3339(trimmed)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(|e| {
                DigestError::CheckpointRead(format!(
                    "{}: invalid timestamp {:?}: {}",
                    self.path.display(),
                    trimmed,
                    e
                ))
            })
    }

    pub fn write(&self, value: DateTime<Utc>) -> DigestResult<()> {
        let formatted = value.to_rfc3339_opts(SecondsFormat::Secs, true);
        fs::write(&self.path, formatted).map_err(DigestError::CheckpointWrite)
    }

    /// Remove the checkpoint entirely. Missing file is a no-op.
    pub fn clear(&self) -> DigestResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DigestError::CheckpointWrite(e)),
        }
    }
}
