//! Status-gated login check shared by users and organizations.

use crate::error::Result;
use crate::remote::{take_field, RemoteCaller};
use crate::snapshot::{SnapshotKind, SnapshotStore};
use samaritan_core::{Credentials, RemoteFunction};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of a login check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    /// The check passed and the profile was written to `snapshot`.
    Verified {
        /// Snapshot file written
        snapshot: PathBuf,
        /// Profile stored in the snapshot (`null` if the lookup had none)
        profile: Value,
    },
    /// The check returned a status other than 200; nothing else happened.
    Rejected {
        /// Status code of the check
        status_code: u16,
    },
}

impl LoginOutcome {
    /// Whether the check passed.
    pub fn is_verified(&self) -> bool {
        matches!(self, LoginOutcome::Verified { .. })
    }
}

/// Run `check`; on a 200 look the account up with `lookup` and snapshot it.
pub(crate) async fn gated_login(
    remote: &RemoteCaller,
    snapshots: &SnapshotStore,
    check: RemoteFunction,
    lookup: RemoteFunction,
    kind: SnapshotKind,
    credentials: &Credentials,
) -> Result<LoginOutcome> {
    let response = remote.call(check, credentials).await?;
    if !response.is_ok() {
        warn!("{} returned status {}, skipping {}", check, response.status_code, lookup);
        return Ok(LoginOutcome::Rejected {
            status_code: response.status_code,
        });
    }

    let body = remote.fetch(lookup, &credentials.lookup()).await?;
    let profile = take_field(lookup, body, kind.field(), Value::Null)?;

    let snapshot = snapshots.write(kind, &profile).await?;
    info!("Saved {} snapshot to {}", kind.field(), snapshot.display());

    Ok(LoginOutcome::Verified { snapshot, profile })
}
