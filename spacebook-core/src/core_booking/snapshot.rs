//! Whole-state snapshots
//!
//! File format: pretty-printed JSON
//! ```text
//! { "version": 1, "created_at": <unix ms>,
//!   "users": [..], "spaces": [..], "bookings": [..] }
//! ```
//! Cross references are ids; they are resolved and checked when the snapshot
//! is turned back into a [`Registry`](super::registry::Registry).
//!
//! Writes are atomic: the snapshot goes to `<file>.tmp`, is synced, then
//! renamed over the destination.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::booking::Booking;
use super::error::{BookingError, BookingResult};
use super::space::Space;
use super::user::User;

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized manager state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,

    /// Unix milliseconds at creation
    pub created_at: i64,

    pub users: Vec<User>,
    pub spaces: Vec<Space>,
    pub bookings: Vec<Booking>,
}

impl Snapshot {
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            users: self.users.len(),
            spaces: self.spaces.len(),
            bookings: self.bookings.len(),
        }
    }
}

/// Entity counts of a saved or loaded snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapshotSummary {
    pub users: usize,
    pub spaces: usize,
    pub bookings: usize,
}

/// Only the version is read first so newer files fail with a clear error
#[derive(Deserialize)]
struct SnapshotHeader {
    version: u32,
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a snapshot, replacing `path` only once the new file is complete
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> BookingResult<()> {
    let data = serde_json::to_vec_pretty(snapshot)
        .map_err(|e| BookingError::CorruptSnapshot(format!("serialization failed: {}", e)))?;

    let tmp = temp_path(path);
    {
        let file = File::create(&tmp).map_err(|e| BookingError::io(&tmp, e))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&data).map_err(|e| BookingError::io(&tmp, e))?;
        let file = writer
            .into_inner()
            .map_err(|e| BookingError::io(&tmp, e.into_error()))?;
        file.sync_all().map_err(|e| BookingError::io(&tmp, e))?;
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(BookingError::io(path, e));
    }

    debug!(path = %path.display(), bytes = data.len(), "snapshot written");
    Ok(())
}

/// Read and parse a snapshot; references are not checked here
pub fn read_snapshot(path: &Path) -> BookingResult<Snapshot> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BookingError::SnapshotNotFound(path.to_path_buf()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            return Err(BookingError::CorruptSnapshot(format!("not UTF-8: {}", e)))
        }
        Err(e) => return Err(BookingError::io(path, e)),
    };

    let header: SnapshotHeader = serde_json::from_str(&contents)
        .map_err(|e| BookingError::CorruptSnapshot(e.to_string()))?;
    if header.version != SNAPSHOT_VERSION {
        return Err(BookingError::UnsupportedSnapshotVersion(header.version));
    }

    let snapshot: Snapshot =
        serde_json::from_str(&contents).map_err(|e| BookingError::CorruptSnapshot(e.to_string()))?;

    debug!(path = %path.display(), users = snapshot.users.len(), "snapshot read");
    Ok(snapshot)
}
