//! Clock abstraction.
//!
//! The login gate compares wall-clock time against technician work
//! windows, so time is injected rather than read ambiently. Tests
//! supply a fixed clock.

use chrono::{DateTime, Utc};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Source of the current time
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// System clock (UTC)
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
