//! Manager implementation with the booking rules

use chrono::{Local, NaiveDateTime, Utc};
use std::path::Path;
use tracing::{debug, info};

use super::booking::{Booking, BookingEntry};
use super::error::{BookingError, BookingResult};
use super::manager::SpaceManager;
use super::registry::Registry;
use super::report;
use super::snapshot::{self, SnapshotSummary};
use super::space::{Space, SpaceVisibility};
use super::types::{BookingDate, UserId};
use super::user::User;
use crate::metrics::{self, Timer};

/// In-memory manager; the only owner of users, spaces and bookings
#[derive(Debug, Default)]
pub struct SpaceManagerImpl {
    registry: Registry,
}

impl SpaceManagerImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a user or space name
    fn validate_name(kind: &str, name: &str) -> BookingResult<()> {
        if name.trim().is_empty() {
            return Err(BookingError::InvalidName(format!("{} name must not be empty", kind)));
        }
        Ok(())
    }

    /// `book_space` against an explicit "now"
    ///
    /// A date is in the past when its midnight lies strictly before `now`, so
    /// today's date is rejected once the day has started.
    pub fn book_space_at(
        &mut self,
        user: &UserId,
        space_name: &str,
        date: &str,
        now: NaiveDateTime,
    ) -> BookingResult<Booking> {
        let result = self.try_book(user, space_name, date, now);
        if let Err(e) = &result {
            debug!(user = %user, space = space_name, date, error = %e, "booking rejected");
            metrics::record_counter(metrics::BOOKINGS_REJECTED);
        }
        result
    }

    fn try_book(
        &mut self,
        user: &UserId,
        space_name: &str,
        date: &str,
        now: NaiveDateTime,
    ) -> BookingResult<Booking> {
        let owner = self.registry.user(user)?;

        let date: BookingDate = date.parse()?;
        if date.is_before(now) {
            return Err(BookingError::InvalidDate(format!(
                "{} is in the past",
                date
            )));
        }

        let space = self
            .registry
            .space_by_name(space_name)
            .ok_or_else(|| BookingError::SpaceNotFound(space_name.to_string()))?;

        if space.is_private() && !owner.owns(&space.id) {
            return Err(BookingError::PermissionDenied(space_name.to_string()));
        }

        if self.registry.is_booked(space, &date) {
            return Err(BookingError::DuplicateBooking {
                space: space_name.to_string(),
                date: date.to_string(),
            });
        }

        let booking = Booking::new(user.clone(), space.id, date);
        let space_id = space.id;

        // Both lists are appended together; lookups above guarantee both exist.
        if let Some(space) = self.registry.spaces.get_mut(&space_id) {
            space.bookings.push(booking.id);
        }
        if let Some(owner) = self.registry.users.get_mut(user) {
            owner.bookings.push(booking.id);
        }
        self.registry.bookings.insert(booking.id, booking.clone());

        metrics::record_counter(metrics::BOOKINGS_CREATED);
        info!(user = %user, space = space_name, date = %date, "space booked");
        Ok(booking)
    }
}

impl SpaceManager for SpaceManagerImpl {
    fn create_user(&mut self, name: &str) -> BookingResult<User> {
        Self::validate_name("user", name)?;

        let id = UserId::new(name);
        if self.registry.users.contains_key(&id) {
            return Err(BookingError::DuplicateUser(name.to_string()));
        }

        let user = User::new(id.clone());
        self.registry.users.insert(id, user.clone());

        metrics::record_counter(metrics::USERS_CREATED);
        info!(user = name, "user created");
        Ok(user)
    }

    fn find_user(&self, name: &str) -> Option<&User> {
        let found = self.registry.users.get(&UserId::new(name));
        debug!(user = name, found = found.is_some(), "user lookup");
        found
    }

    fn list_users(&self) -> Vec<&User> {
        let mut users: Vec<&User> = self.registry.users.values().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

    fn find_space(&self, name: &str) -> Option<&Space> {
        self.registry.space_by_name(name)
    }

    fn list_user_spaces(&self, user: &UserId) -> BookingResult<Vec<&Space>> {
        let owner = self.registry.user(user)?;
        Ok(owner
            .spaces
            .iter()
            .filter_map(|id| self.registry.spaces.get(id))
            .collect())
    }

    fn add_space(
        &mut self,
        user: &UserId,
        name: &str,
        visibility: SpaceVisibility,
    ) -> BookingResult<Space> {
        self.registry.user(user)?;
        Self::validate_name("space", name)?;

        if self.registry.space_names.contains_key(name) {
            return Err(BookingError::DuplicateSpace(name.to_string()));
        }

        let space = Space::new(name.to_string(), user.clone(), visibility);
        if let Some(owner) = self.registry.users.get_mut(user) {
            owner.spaces.push(space.id);
        }
        self.registry.space_names.insert(space.name.clone(), space.id);
        self.registry.spaces.insert(space.id, space.clone());

        metrics::record_counter(metrics::SPACES_CREATED);
        info!(user = %user, space = name, ?visibility, "space added");
        Ok(space)
    }

    fn remove_space(&mut self, user: &UserId, name: &str) -> BookingResult<()> {
        let owner = self.registry.user(user)?;

        let space = owner
            .spaces
            .iter()
            .filter_map(|id| self.registry.spaces.get(id))
            .find(|s| s.name == name)
            .ok_or_else(|| BookingError::SpaceNotFound(name.to_string()))?;

        if space.has_bookings() {
            return Err(BookingError::SpaceHasBookings(name.to_string()));
        }

        let space_id = space.id;
        if let Some(owner) = self.registry.users.get_mut(user) {
            owner.spaces.retain(|id| *id != space_id);
        }
        self.registry.spaces.remove(&space_id);
        self.registry.space_names.remove(name);

        metrics::record_counter(metrics::SPACES_REMOVED);
        info!(user = %user, space = name, "space removed");
        Ok(())
    }

    fn book_space(
        &mut self,
        user: &UserId,
        space_name: &str,
        date: &str,
    ) -> BookingResult<Booking> {
        self.book_space_at(user, space_name, date, Local::now().naive_local())
    }

    fn view_user_bookings(&self, user: &UserId) -> BookingResult<Vec<BookingEntry>> {
        let owner = self.registry.user(user)?;

        Ok(owner
            .bookings
            .iter()
            .filter_map(|id| self.registry.bookings.get(id))
            .map(|b| BookingEntry {
                space_name: self
                    .registry
                    .spaces
                    .get(&b.space)
                    .map(|s| s.name.clone())
                    .unwrap_or_default(),
                date: b.date,
            })
            .collect())
    }

    fn export_user_bookings(&self, user: &UserId, destination: &Path) -> BookingResult<()> {
        let entries = self.view_user_bookings(user)?;
        report::export_to_file(destination, user.as_str(), &entries)?;

        info!(user = %user, path = %destination.display(), count = entries.len(), "bookings exported");
        Ok(())
    }

    fn save_data(&self, destination: &Path) -> BookingResult<SnapshotSummary> {
        let timer = Timer::new(metrics::SNAPSHOT_SAVE_MS);
        let snapshot = self.registry.to_snapshot(Utc::now().timestamp_millis());
        snapshot::write_snapshot(destination, &snapshot)?;
        timer.stop();

        let summary = snapshot.summary();
        info!(path = %destination.display(), ?summary, "data saved");
        Ok(summary)
    }

    fn load_data(&mut self, source: &Path) -> BookingResult<SnapshotSummary> {
        let timer = Timer::new(metrics::SNAPSHOT_LOAD_MS);
        let snapshot = snapshot::read_snapshot(source)?;
        let summary = snapshot.summary();

        // Swap only once the snapshot is fully validated.
        self.registry = Registry::from_snapshot(snapshot)?;
        timer.stop();

        info!(path = %source.display(), ?summary, "data loaded");
        Ok(summary)
    }
}
