//! Plain-text booking reports
//!
//! ```text
//! Prenotazioni per l'utente 'alice':
//! Spazio: Room1, Data: 01-01-2099
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::booking::BookingEntry;
use super::error::{BookingError, BookingResult};

pub fn header_line(username: &str) -> String {
    format!("Prenotazioni per l'utente '{}':", username)
}

pub fn entry_line(entry: &BookingEntry) -> String {
    format!("Spazio: {}, Data: {}", entry.space_name, entry.date)
}

/// Write the report to any sink, one newline-terminated line each
pub fn write_bookings<W: Write>(
    out: &mut W,
    username: &str,
    entries: &[BookingEntry],
) -> std::io::Result<()> {
    writeln!(out, "{}", header_line(username))?;
    for entry in entries {
        writeln!(out, "{}", entry_line(entry))?;
    }
    Ok(())
}

/// Render the report into a string
pub fn render_bookings(username: &str, entries: &[BookingEntry]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_bookings(&mut buf, username, entries);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Create (or truncate) `destination` and write the report into it
pub fn export_to_file(
    destination: &Path,
    username: &str,
    entries: &[BookingEntry],
) -> BookingResult<()> {
    let file = File::create(destination).map_err(|e| BookingError::io(destination, e))?;
    let mut writer = BufWriter::new(file);
    write_bookings(&mut writer, username, entries).map_err(|e| BookingError::io(destination, e))?;
    writer.flush().map_err(|e| BookingError::io(destination, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(space: &str, date: &str) -> BookingEntry {
        BookingEntry {
            space_name: space.to_string(),
            date: date.parse().unwrap(),
        }
    }

    #[test]
    fn test_render_layout() {
        let text = render_bookings(
            "alice",
            &[entry("Room1", "01-01-2099"), entry("Hall", "02-03-2099")],
        );
        assert_eq!(
            text,
            "Prenotazioni per l'utente 'alice':\n\
             Spazio: Room1, Data: 01-01-2099\n\
             Spazio: Hall, Data: 02-03-2099\n"
        );
    }

    #[test]
    fn test_render_without_bookings_is_header_only() {
        assert_eq!(render_bookings("bob", &[]).lines().count(), 1);
    }

    #[test]
    fn test_export_to_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_to_file(dir.path(), "alice", &[]);
        assert!(matches!(result, Err(BookingError::Io { .. })));
    }
}
