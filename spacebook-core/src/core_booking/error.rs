//! Booking operation errors

use std::path::PathBuf;
use thiserror::Error;

/// Every failure a manager operation can report
///
/// Validation failures leave the manager untouched; callers can correct the
/// input and retry.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("User '{0}' already exists")]
    DuplicateUser(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Space '{0}' already exists")]
    DuplicateSpace(String),

    #[error("Space '{0}' not found")]
    SpaceNotFound(String),

    #[error("Space '{0}' has existing bookings and cannot be removed")]
    SpaceHasBookings(String),

    #[error("Invalid booking date: {0}")]
    InvalidDate(String),

    #[error("Space '{0}' is private and cannot be booked")]
    PermissionDenied(String),

    #[error("Space '{space}' is already booked on {date}")]
    DuplicateBooking { space: String, date: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot file {0} not found")]
    SnapshotNotFound(PathBuf),

    #[error("Corrupted snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedSnapshotVersion(u32),
}

impl BookingError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BookingError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures caused by the caller's input rather than the environment
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            BookingError::Io { .. }
                | BookingError::SnapshotNotFound(_)
                | BookingError::CorruptSnapshot(_)
                | BookingError::UnsupportedSnapshotVersion(_)
        )
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
