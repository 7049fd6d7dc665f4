pub mod cache;
pub mod clock;
pub mod cooldown;

pub use cache::TtlCache;
pub use clock::{Clock, SystemClock};
pub use cooldown::FailureTracker;
