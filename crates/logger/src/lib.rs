//! Shared tracing setup for peercheck binaries.

mod subscriber;

pub use subscriber::{init, init_with_level};
pub use tracing::level_filters::LevelFilter;
