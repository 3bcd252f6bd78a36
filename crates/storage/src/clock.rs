// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! A [`Clock`] is a way to get the current date and time.
//!
//! This module defines two implementations of the [`Clock`] trait, one which
//! uses the system time, and one that uses a fixed time, swappable in tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Represents a clock which can give the current date and time
pub trait Clock: Sync {
    /// Get the current date and time
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + Send + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + Send + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// A clock which uses the system time
#[derive(Clone, Default)]
pub struct SystemClock {
    _private: (),
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        // This is the clock that the whole service uses, so this is the one
        // place where it is legitimate to look at the system time.
        #[allow(clippy::disallowed_methods)]
        Utc::now()
    }
}

/// A fake clock, which uses a fixed time, and can be advanced manually
pub struct MockClock {
    current: std::sync::Mutex<DateTime<Utc>>,
}

impl Default for MockClock {
    fn default() -> Self {
        let datetime = Utc.with_ymd_and_hms(2022, 1, 16, 14, 40, 0).unwrap();
        Self::new(datetime)
    }
}

impl MockClock {
    /// Create a new [`MockClock`], which starts at the given time
    #[must_use]
    pub fn new(datetime: DateTime<Utc>) -> Self {
        Self {
            current: std::sync::Mutex::new(datetime),
        }
    }

    /// Move the clock forward by the given amount of time
    ///
    /// # Panics
    ///
    /// Panics if the internal lock was poisoned
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap();
        *current += duration;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mocked_clock() {
        let clock = MockClock::default();

        // Time should be frozen, and not advance unless asked to
        let first = clock.now();
        let second = clock.now();
        assert_eq!(first, second);

        clock.advance(Duration::try_seconds(10).unwrap());
        let third = clock.now();
        assert_eq!(first + Duration::try_seconds(10).unwrap(), third);
    }

    #[test]
    fn test_real_clock() {
        let clock = SystemClock::default();

        // The clock should not be frozen
        let first = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = clock.now();
        assert_ne!(first, second);
    }
}
