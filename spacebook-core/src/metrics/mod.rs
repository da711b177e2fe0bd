//! Metrics for the booking service
//!
//! Counters are recorded through the `metrics` facade. Without an installed
//! recorder every call is a no-op, so the library never requires one.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Instant;

pub const USERS_CREATED: &str = "spacebook.users.created";
pub const SPACES_CREATED: &str = "spacebook.spaces.created";
pub const SPACES_REMOVED: &str = "spacebook.spaces.removed";
pub const BOOKINGS_CREATED: &str = "spacebook.bookings.created";
pub const BOOKINGS_REJECTED: &str = "spacebook.bookings.rejected";
pub const SNAPSHOT_SAVE_MS: &str = "spacebook.snapshot.save.duration_ms";
pub const SNAPSHOT_LOAD_MS: &str = "spacebook.snapshot.load.duration_ms";

/// Register metric descriptions with the installed recorder
pub fn init_metrics() {
    describe_counter!(USERS_CREATED, "Number of registered users");
    describe_counter!(SPACES_CREATED, "Number of spaces added");
    describe_counter!(SPACES_REMOVED, "Number of spaces removed");
    describe_counter!(BOOKINGS_CREATED, "Number of accepted bookings");
    describe_counter!(BOOKINGS_REJECTED, "Number of booking attempts rejected by validation");
    describe_histogram!(SNAPSHOT_SAVE_MS, "Snapshot save duration in milliseconds");
    describe_histogram!(SNAPSHOT_LOAD_MS, "Snapshot load duration in milliseconds");
}

/// Increment a counter by one
pub fn record_counter(name: &'static str) {
    counter!(name).increment(1);
}

/// Timer for measuring operation duration
pub struct Timer {
    name: &'static str,
    start: Instant,
}

impl Timer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Stop the timer and record the elapsed milliseconds
    pub fn stop(self) {
        let elapsed = self.start.elapsed();
        histogram!(self.name).record(elapsed.as_secs_f64() * 1000.0);
    }
}
