//! Merchant order number generation.

use chrono::Utc;
use rand::Rng;

/// Generates client-facing merchant order numbers.
///
/// An order number is a full-precision UTC timestamp (`YYYYMMDDHHMMSS`)
/// followed by a random 3-digit suffix, e.g. `20260219120000123`. The
/// prefix keeps numbers time-ordered under normal clock behavior; the
/// suffix makes same-second collisions a 1-in-900 event. Collisions are
/// not prevented here; the store's uniqueness constraint surfaces them
/// as a creation failure and the caller regenerates.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderNoGenerator;

impl OrderNoGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Produces the next order number.
    pub fn next(&self) -> String {
        let prefix = Utc::now().format("%Y%m%d%H%M%S");
        let suffix: u32 = rand::thread_rng().gen_range(100..1000);
        format!("{}{}", prefix, suffix)
    }
}
