//! Transaction deadlines, in milliseconds since the network epoch.

use crate::constants::NETWORK_EPOCH_MILLIS;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Deadline(u64);

impl Deadline {
    /// Wrap a raw wire value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// `duration` from the current system time.
    pub fn from_now(duration: Duration) -> Self {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        Self::from_unix_millis(now.saturating_add(duration).as_millis() as u64)
    }

    pub fn hours(hours: u64) -> Self {
        Self::from_now(Duration::from_secs(hours.saturating_mul(3600)))
    }

    /// Convert a Unix timestamp in milliseconds. Instants before the
    /// network epoch clamp to zero.
    pub fn from_unix_millis(millis: u64) -> Self {
        Self(millis.saturating_sub(NETWORK_EPOCH_MILLIS))
    }

    pub fn instant(&self) -> u64 {
        self.0
    }

    pub fn to_unix_millis(&self) -> u64 {
        self.0.saturating_add(NETWORK_EPOCH_MILLIS)
    }
}
