//! Local profile snapshots.
//!
//! A passed login check leaves the account's profile behind as a JSON file
//! (`user.json` or `org.json`) in the snapshot directory, which defaults to the
//! current working directory. Each write replaces the previous file.

use crate::error::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Which profile a snapshot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    /// A user profile
    User,
    /// An organization profile
    Org,
}

impl SnapshotKind {
    /// File name inside the snapshot directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            SnapshotKind::User => "user.json",
            SnapshotKind::Org => "org.json",
        }
    }

    /// Field of the lookup response holding the profile.
    pub fn field(&self) -> &'static str {
        match self {
            SnapshotKind::User => "user",
            SnapshotKind::Org => "org",
        }
    }
}

/// Directory holding the snapshot files.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Store snapshots in `root`. The directory is not created.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Store snapshots in the current working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    /// Path of the snapshot file for `kind`.
    pub fn path(&self, kind: SnapshotKind) -> PathBuf {
        self.root.join(kind.file_name())
    }

    /// Write `profile` as indented JSON, replacing any existing snapshot.
    pub async fn write(&self, kind: SnapshotKind, profile: &Value) -> Result<PathBuf> {
        let path = self.path(kind);
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&path, json.as_bytes()).await?;
        Ok(path)
    }

    /// Load the snapshot for `kind`, if one has been written.
    pub async fn load(&self, kind: SnapshotKind) -> Result<Option<Value>> {
        match fs::read_to_string(self.path(kind)).await {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::current_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FaultKind;
    use serde_json::json;

    #[tokio::test]
    async fn test_write_is_indented_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        store.write(SnapshotKind::User, &json!({"id": 1, "name": "old"})).await.unwrap();
        let path = store.write(SnapshotKind::User, &json!({"id": 1})).await.unwrap();

        assert_eq!(path, dir.path().join("user.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"id\": 1\n}");
    }

    #[tokio::test]
    async fn test_load_round_trips_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        assert_eq!(store.load(SnapshotKind::Org).await.unwrap(), None);

        store.write(SnapshotKind::Org, &json!({"orgID": "o-1"})).await.unwrap();
        assert_eq!(
            store.load(SnapshotKind::Org).await.unwrap(),
            Some(json!({"orgID": "o-1"}))
        );
        assert_eq!(store.load(SnapshotKind::User).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("absent"));

        let err = store.write(SnapshotKind::User, &json!(null)).await.unwrap_err();
        assert_eq!(err.kind(), FaultKind::Io);
    }

    #[test]
    fn test_default_is_current_dir() {
        assert_eq!(SnapshotStore::default().path(SnapshotKind::Org), Path::new("./org.json"));
    }
}
