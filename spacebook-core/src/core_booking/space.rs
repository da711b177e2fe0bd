//! Space data structures

use serde::{Deserialize, Serialize};

use super::types::{BookingId, SpaceId, UserId};

/// A named, bookable resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    /// Unique identifier
    pub id: SpaceId,

    /// Globally unique, human-readable name
    pub name: String,

    /// Fixed at creation
    pub visibility: SpaceVisibility,

    /// The user that created the Space
    pub owner: UserId,

    /// Bookings against this Space, oldest first
    pub bookings: Vec<BookingId>,
}

impl Space {
    pub fn new(name: String, owner: UserId, visibility: SpaceVisibility) -> Self {
        Space {
            id: SpaceId::generate(),
            name,
            visibility,
            owner,
            bookings: Vec::new(),
        }
    }

    pub fn is_private(&self) -> bool {
        self.visibility == SpaceVisibility::Private
    }

    pub fn has_bookings(&self) -> bool {
        !self.bookings.is_empty()
    }
}

/// Space visibility modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceVisibility {
    /// Anyone may book
    Public,
    /// Only the owner may book
    Private,
}

impl SpaceVisibility {
    pub fn from_private_flag(is_private: bool) -> Self {
        if is_private {
            SpaceVisibility::Private
        } else {
            SpaceVisibility::Public
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_space() {
        let space = Space::new(
            "Room1".to_string(),
            UserId::from("alice"),
            SpaceVisibility::from_private_flag(true),
        );

        assert_eq!(space.name, "Room1");
        assert_eq!(space.owner, UserId::from("alice"));
        assert!(space.is_private());
        assert!(!space.has_bookings());
    }

    #[test]
    fn test_visibility_serializes_lowercase() {
        let json = serde_json::to_string(&SpaceVisibility::Public).unwrap();
        assert_eq!(json, "\"public\"");
    }
}
