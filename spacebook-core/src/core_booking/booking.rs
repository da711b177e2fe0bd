//! Booking records

use serde::{Deserialize, Serialize};

use super::types::{BookingDate, BookingId, SpaceId, UserId};

/// One user holding one space for one calendar day. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub user: UserId,
    pub space: SpaceId,
    pub date: BookingDate,
}

impl Booking {
    pub fn new(user: UserId, space: SpaceId, date: BookingDate) -> Self {
        Booking {
            id: BookingId::generate(),
            user,
            space,
            date,
        }
    }
}

/// A row of a user's booking listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingEntry {
    pub space_name: String,
    pub date: BookingDate,
}
