//! User records

use serde::{Deserialize, Serialize};

use super::types::{BookingId, SpaceId, UserId};

/// A registered user
///
/// `spaces` and `bookings` keep insertion order and point into the manager's
/// collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub spaces: Vec<SpaceId>,
    pub bookings: Vec<BookingId>,
}

impl User {
    pub fn new(id: UserId) -> Self {
        User {
            id,
            spaces: Vec::new(),
            bookings: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    pub fn owns(&self, space_id: &SpaceId) -> bool {
        self.spaces.contains(space_id)
    }
}
