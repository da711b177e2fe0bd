//! Arena holding every user, space and booking
//!
//! Entities reference each other by id only. The registry is the single
//! owner; a snapshot is converted into a registry only after every reference
//! has been resolved.

use std::collections::{HashMap, HashSet};

use super::booking::Booking;
use super::error::{BookingError, BookingResult};
use super::snapshot::{Snapshot, SNAPSHOT_VERSION};
use super::space::Space;
use super::types::{BookingDate, BookingId, SpaceId, UserId};
use super::user::User;

#[derive(Debug, Default)]
pub struct Registry {
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) spaces: HashMap<SpaceId, Space>,
    pub(crate) space_names: HashMap<String, SpaceId>,
    pub(crate) bookings: HashMap<BookingId, Booking>,
}

fn corrupt(msg: String) -> BookingError {
    BookingError::CorruptSnapshot(msg)
}

impl Registry {
    pub fn user(&self, id: &UserId) -> BookingResult<&User> {
        self.users
            .get(id)
            .ok_or_else(|| BookingError::UserNotFound(id.to_string()))
    }

    pub fn space_by_name(&self, name: &str) -> Option<&Space> {
        self.space_names.get(name).and_then(|id| self.spaces.get(id))
    }

    /// Whether `space` already holds a booking on `date`
    pub fn is_booked(&self, space: &Space, date: &BookingDate) -> bool {
        space
            .bookings
            .iter()
            .filter_map(|id| self.bookings.get(id))
            .any(|b| &b.date == date)
    }

    /// Collections are sorted by name (bookings by space, then date) for stable output
    pub fn to_snapshot(&self, created_at: i64) -> Snapshot {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));

        let mut spaces: Vec<Space> = self.spaces.values().cloned().collect();
        spaces.sort_by(|a, b| a.name.cmp(&b.name));

        let mut bookings: Vec<Booking> = self.bookings.values().cloned().collect();
        bookings.sort_by(|a, b| {
            let name_of = |id: &SpaceId| self.spaces.get(id).map(|s| s.name.as_str());
            name_of(&a.space)
                .cmp(&name_of(&b.space))
                .then(a.date.cmp(&b.date))
        });

        Snapshot {
            version: SNAPSHOT_VERSION,
            created_at,
            users,
            spaces,
            bookings,
        }
    }

    /// Rebuild a registry, rejecting snapshots that break any manager invariant
    pub fn from_snapshot(snapshot: Snapshot) -> BookingResult<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(BookingError::UnsupportedSnapshotVersion(snapshot.version));
        }

        let mut registry = Registry::default();

        for user in snapshot.users {
            if user.id.as_str().trim().is_empty() {
                return Err(corrupt("user with empty name".to_string()));
            }
            if registry.users.contains_key(&user.id) {
                return Err(corrupt(format!("duplicate user '{}'", user.id)));
            }
            registry.users.insert(user.id.clone(), user);
        }

        for space in snapshot.spaces {
            if space.name.trim().is_empty() {
                return Err(corrupt(format!("space {} has an empty name", space.id)));
            }
            if registry.spaces.contains_key(&space.id) {
                return Err(corrupt(format!("duplicate space id {}", space.id)));
            }
            if registry.space_names.contains_key(&space.name) {
                return Err(corrupt(format!("duplicate space name '{}'", space.name)));
            }
            let owner = registry.users.get(&space.owner).ok_or_else(|| {
                corrupt(format!("space '{}' owned by unknown user '{}'", space.name, space.owner))
            })?;
            if !owner.owns(&space.id) {
                return Err(corrupt(format!(
                    "space '{}' missing from owner '{}'",
                    space.name, space.owner
                )));
            }
            registry.space_names.insert(space.name.clone(), space.id);
            registry.spaces.insert(space.id, space);
        }

        for user in registry.users.values() {
            let mut seen = HashSet::new();
            for space_id in &user.spaces {
                let space = registry.spaces.get(space_id).ok_or_else(|| {
                    corrupt(format!("user '{}' lists unknown space {}", user.id, space_id))
                })?;
                if space.owner != user.id || !seen.insert(*space_id) {
                    return Err(corrupt(format!(
                        "space '{}' listed more than once or by a non-owner",
                        space.name
                    )));
                }
            }
        }

        for booking in snapshot.bookings {
            if registry.bookings.contains_key(&booking.id) {
                return Err(corrupt(format!("duplicate booking id {}", booking.id)));
            }
            let user = registry.users.get(&booking.user).ok_or_else(|| {
                corrupt(format!("booking {} by unknown user '{}'", booking.id, booking.user))
            })?;
            let space = registry.spaces.get(&booking.space).ok_or_else(|| {
                corrupt(format!("booking {} on unknown space {}", booking.id, booking.space))
            })?;
            if !user.bookings.contains(&booking.id) || !space.bookings.contains(&booking.id) {
                return Err(corrupt(format!(
                    "booking {} missing from its user or space",
                    booking.id
                )));
            }
            if space.is_private() && space.owner != booking.user {
                return Err(corrupt(format!(
                    "private space '{}' booked by non-owner '{}'",
                    space.name, booking.user
                )));
            }
            registry.bookings.insert(booking.id, booking);
        }

        // Every listed booking id must be a known booking that points back.
        let user_refs: usize = registry.users.values().map(|u| u.bookings.len()).sum();
        let space_refs: usize = registry.spaces.values().map(|s| s.bookings.len()).sum();
        if user_refs != registry.bookings.len() || space_refs != registry.bookings.len() {
            return Err(corrupt("booking lists out of step with booking records".to_string()));
        }
        for user in registry.users.values() {
            let mut seen = HashSet::new();
            for id in &user.bookings {
                match registry.bookings.get(id) {
                    Some(b) if b.user == user.id && seen.insert(*id) => {}
                    _ => return Err(corrupt(format!("user '{}' lists bad booking {}", user.id, id))),
                }
            }
        }
        for space in registry.spaces.values() {
            let mut dates = HashSet::new();
            for id in &space.bookings {
                match registry.bookings.get(id) {
                    Some(b) if b.space == space.id => {
                        if !dates.insert(b.date) {
                            return Err(corrupt(format!(
                                "space '{}' booked twice on {}",
                                space.name, b.date
                            )));
                        }
                    }
                    _ => {
                        return Err(corrupt(format!("space '{}' lists bad booking {}", space.name, id)))
                    }
                }
            }
        }

        Ok(registry)
    }
}
