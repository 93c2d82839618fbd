// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Browser session persistence between runs.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// File name of the saved session inside a profile directory.
pub const SESSION_FILE: &str = "storage_state.json";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads and saves an opaque session blob for a profile directory.
pub trait SessionStore: Send + Sync {
    fn load(&self, profile_dir: &Path) -> Result<Option<Vec<u8>>, SessionError>;
    fn save(&self, profile_dir: &Path, blob: &[u8]) -> Result<(), SessionError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FileSessionStore;

impl FileSessionStore {
    pub fn session_path(profile_dir: &Path) -> PathBuf {
        profile_dir.join(SESSION_FILE)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, profile_dir: &Path) -> Result<Option<Vec<u8>>, SessionError> {
        let path = Self::session_path(profile_dir);
        match std::fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SessionError::Io { path, source }),
        }
    }

    fn save(&self, profile_dir: &Path, blob: &[u8]) -> Result<(), SessionError> {
        let path = Self::session_path(profile_dir);
        let io = |source| SessionError::Io { path: path.clone(), source };
        std::fs::create_dir_all(profile_dir).map_err(io)?;
        let mut staged = NamedTempFile::new_in(profile_dir).map_err(io)?;
        staged.write_all(blob).map_err(io)?;
        staged.persist(&path).map_err(|e| io(e.error))?;
        tracing::debug!(path = %path.display(), bytes = blob.len(), "session saved");
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{SessionError, SessionStore};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    /// In-memory session store keyed by profile directory
    #[derive(Clone, Default)]
    pub struct FakeSessionStore {
        blobs: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    }

    impl FakeSessionStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn saved(&self, profile_dir: &Path) -> Option<Vec<u8>> {
            self.blobs.lock().get(profile_dir).cloned()
        }
    }

    impl SessionStore for FakeSessionStore {
        fn load(&self, profile_dir: &Path) -> Result<Option<Vec<u8>>, SessionError> {
            Ok(self.blobs.lock().get(profile_dir).cloned())
        }

        fn save(&self, profile_dir: &Path, blob: &[u8]) -> Result<(), SessionError> {
            self.blobs.lock().insert(profile_dir.to_path_buf(), blob.to_vec());
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSessionStore;

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
