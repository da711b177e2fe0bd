pub mod config;
pub mod core_booking;
pub mod logging;
pub mod metrics;

pub use core_booking::{
    Booking, BookingDate, BookingEntry, BookingError, BookingResult, Space, SpaceManager,
    SpaceManagerImpl, SpaceVisibility, User, UserId,
};
pub use logging::{init_logging, LogLevel};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _ = LogLevel::Info;
        let _ = SpaceManagerImpl::new();
    }
}
