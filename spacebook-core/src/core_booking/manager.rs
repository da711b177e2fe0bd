//! Manager trait for users, spaces and bookings

use std::path::Path;

use super::booking::{Booking, BookingEntry};
use super::error::BookingResult;
use super::snapshot::SnapshotSummary;
use super::space::{Space, SpaceVisibility};
use super::types::UserId;
use super::user::User;

/// Manager for the booking service
///
/// Every operation either succeeds completely or leaves the state untouched.
pub trait SpaceManager {
    /// Register a new user with empty space and booking lists
    fn create_user(&mut self, name: &str) -> BookingResult<User>;

    /// Look a user up by exact name
    fn find_user(&self, name: &str) -> Option<&User>;

    /// All users, sorted by name
    fn list_users(&self) -> Vec<&User>;

    /// Look a space up by exact name, whoever owns it
    fn find_space(&self, name: &str) -> Option<&Space>;

    /// Spaces owned by a user, in creation order
    fn list_user_spaces(&self, user: &UserId) -> BookingResult<Vec<&Space>>;

    /// Create a space owned by `user`; names are unique across all users
    fn add_space(
        &mut self,
        user: &UserId,
        name: &str,
        visibility: SpaceVisibility,
    ) -> BookingResult<Space>;

    /// Remove one of `user`'s spaces; only spaces without bookings can go
    fn remove_space(&mut self, user: &UserId, name: &str) -> BookingResult<()>;

    /// Book a space for a `DD-MM-YYYY` date that is not in the past
    fn book_space(&mut self, user: &UserId, space_name: &str, date: &str)
        -> BookingResult<Booking>;

    /// A user's bookings in the order they were made
    fn view_user_bookings(&self, user: &UserId) -> BookingResult<Vec<BookingEntry>>;

    /// Write a user's bookings to a plain-text report
    fn export_user_bookings(&self, user: &UserId, destination: &Path) -> BookingResult<()>;

    /// Save the whole state
    fn save_data(&self, destination: &Path) -> BookingResult<SnapshotSummary>;

    /// Replace the whole state with a saved snapshot; on error nothing changes
    fn load_data(&mut self, source: &Path) -> BookingResult<SnapshotSummary>;
}
