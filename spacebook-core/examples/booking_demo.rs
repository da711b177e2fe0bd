//! Walks through a small booking session
//!
//! Run with:
//! ```bash
//! cargo run --example booking_demo
//! ```

use spacebook_core::core_booking::report::render_bookings;
use spacebook_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use spacebook_core::{SpaceManager, SpaceManagerImpl, SpaceVisibility};
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging_with_config(LogConfig::new(LogLevel::Info).with_timestamp(false))?;

    let mut manager = SpaceManagerImpl::new();
    let alice = manager.create_user("alice")?.id;
    let bob = manager.create_user("bob")?.id;

    manager.add_space(&alice, "Room1", SpaceVisibility::Public)?;
    manager.add_space(&alice, "Studio", SpaceVisibility::Private)?;

    manager.book_space(&bob, "Room1", "01-01-2099")?;
    if let Err(e) = manager.book_space(&bob, "Studio", "01-01-2099") {
        warn!(error = %e, "expected rejection");
    }

    let entries = manager.view_user_bookings(&bob)?;
    print!("{}", render_bookings(bob.as_str(), &entries));

    let path = std::env::temp_dir().join("spacebook-demo.json");
    let summary = manager.save_data(&path)?;
    info!(?summary, path = %path.display(), "demo state saved");
    Ok(())
}
