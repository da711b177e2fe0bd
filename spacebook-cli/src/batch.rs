//! One-shot export: load a backup, export one user's bookings

use anyhow::Result;
use spacebook_core::{SpaceManager, SpaceManagerImpl, UserId};
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// A failed load is reported and the export proceeds on empty state, so the
/// user will simply not be found. A missing user is not an error.
pub fn run_export<W: Write>(
    out: &mut W,
    backup_file: &Path,
    export_file: &Path,
    username: &str,
) -> Result<()> {
    let mut manager = SpaceManagerImpl::new();

    match manager.load_data(backup_file) {
        Ok(summary) => writeln!(
            out,
            "Data loaded from {} ({} users, {} spaces, {} bookings).",
            backup_file.display(),
            summary.users,
            summary.spaces,
            summary.bookings
        )?,
        Err(e) => {
            warn!(error = %e, "backup could not be loaded");
            writeln!(out, "Error loading data: {}", e)?;
        }
    }

    if manager.find_user(username).is_none() {
        writeln!(out, "User '{}' not found.", username)?;
        return Ok(());
    }

    manager.export_user_bookings(&UserId::new(username), export_file)?;
    writeln!(out, "Bookings exported to {}.", export_file.display())?;
    Ok(())
}
