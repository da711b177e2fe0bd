//! Users, spaces and bookings
//!
//! ## Architecture
//!
//! - **User**: keyed by name, lists the spaces it owns and the bookings it made
//! - **Space**: globally unique name, public or private, lists its bookings
//! - **Booking**: one user, one space, one calendar day
//!
//! All three live in a single [`registry::Registry`] owned by the manager and
//! refer to each other by id.
//!
//! ## Rules
//!
//! 1. User names and space names are unique
//! 2. A space with bookings cannot be removed
//! 3. A space is booked at most once per day
//! 4. Private spaces can only be booked by their owner
//! 5. Bookings cannot start in the past

pub mod booking;
pub mod error;
pub mod manager;
pub mod manager_impl;
pub mod registry;
pub mod report;
pub mod snapshot;
pub mod space;
pub mod types;
pub mod user;

pub use booking::{Booking, BookingEntry};
pub use error::{BookingError, BookingResult};
pub use manager::SpaceManager;
pub use manager_impl::SpaceManagerImpl;
pub use snapshot::{Snapshot, SnapshotSummary, SNAPSHOT_VERSION};
pub use space::{Space, SpaceVisibility};
pub use types::{BookingDate, BookingId, SpaceId, UserId, DATE_FORMAT};
pub use user::User;
