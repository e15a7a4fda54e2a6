//! Wall-clock abstraction for testability
//!
//! Provides a trait-based approach to reading the current time so that
//! reminder scheduling and streak math can be exercised deterministically
//! without waiting for real time to pass.
//!
//! # Examples
//!
//! ```
//! use chrono::Duration;
//!
//! use streakline_common::testing::{Clock, MockClock, SystemClock};
//!
//! // Use system clock in production
//! let clock = SystemClock;
//! let _now = clock.now();
//!
//! // Use mock clock in tests
//! let mock = MockClock::new();
//! let start = mock.now();
//! mock.advance(std::time::Duration::from_secs(5));
//! assert_eq!(mock.now() - start, Duration::seconds(5));
//! ```

// Allow missing panics docs for time utilities - the mock clock panics on a
// poisoned mutex so broken tests fail early
#![allow(clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};

/// Trait for time operations to enable testing
///
/// Absolute instants are always UTC. Day boundaries are a property of the
/// user's wall clock, so the clock also reports the offset that maps UTC
/// onto local time. The offset may differ between instants (daylight
/// saving), so wall-clock targets are resolved through
/// [`Clock::offset_at`] rather than by shifting the current offset.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Offset of the local wall clock from UTC at `instant`.
    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset;

    /// Offset of the local wall clock from UTC at [`Clock::now`].
    fn offset(&self) -> FixedOffset {
        self.offset_at(self.now())
    }

    /// Current local wall-clock time without zone information.
    fn local_now(&self) -> NaiveDateTime {
        self.now().with_timezone(&self.offset()).naive_local()
    }

    /// Milliseconds since the UNIX epoch.
    fn millis_since_epoch(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Instant at which the local wall clock next reads 00:00.
    ///
    /// Exactly at midnight this is the following midnight. Days of 23 or 25
    /// hours come out at their real length.
    fn next_local_midnight(&self) -> DateTime<Utc> {
        resolve_local(self, next_midnight_after(self.local_now()))
    }
}

fn next_midnight_after(local: NaiveDateTime) -> NaiveDateTime {
    local.date().succ_opt().map_or(local, |day| day.and_time(NaiveTime::MIN))
}

/// Earliest instant at which `clock` reads `local`.
///
/// A wall-clock time skipped by a forward transition resolves to the
/// transition itself, the first instant the clock reads past it.
fn resolve_local<C: Clock + ?Sized>(clock: &C, local: NaiveDateTime) -> DateTime<Utc> {
    let shift = |offset: FixedOffset| {
        let seconds = i64::from(offset.local_minus_utc());
        Utc.from_utc_datetime(&(local - chrono::Duration::seconds(seconds)))
    };
    let reads_local = |instant: DateTime<Utc>| {
        instant.with_timezone(&clock.offset_at(instant)).naive_local() == local
    };

    let first = shift(clock.offset());
    let second = shift(clock.offset_at(first));

    match (reads_local(first), reads_local(second)) {
        (true, true) => first.min(second),
        (true, false) => first,
        (false, true) => second,
        (false, false) => first.max(second),
    }
}

/// Real system clock implementation
///
/// Uses the operating system's clock and time zone. Use this in production
/// code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        *instant.with_timezone(&Local).offset()
    }

    fn next_local_midnight(&self) -> DateTime<Utc> {
        let midnight = next_midnight_after(self.local_now());
        Local
            .from_local_datetime(&midnight)
            .earliest()
            .map_or_else(|| resolve_local(self, midnight), |instant| instant.with_timezone(&Utc))
    }
}

/// Mock clock for deterministic testing
///
/// Time only moves when the test says so. Clones share the same underlying
/// instant, so a clone handed to a service observes every `advance`.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, NaiveDate};
///
/// use streakline_common::testing::{Clock, MockClock};
///
/// let local = NaiveDate::from_ymd_opt(2025, 3, 14)
///     .and_then(|d| d.and_hms_opt(21, 30, 0))
///     .unwrap();
/// let clock = MockClock::at_local(local, FixedOffset::east_opt(3600).unwrap());
/// assert_eq!(clock.local_now(), local);
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<Utc>>>,
    offset: FixedOffset,
    /// Offset changes as `(from, offset)`, sorted by `from`
    changes: Vec<(DateTime<Utc>, FixedOffset)>,
}

impl MockClock {
    /// Create a mock clock frozen at the current real time, in UTC.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Create a mock clock frozen at `now`, with a UTC wall clock.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Arc::new(Mutex::new(now)), offset: Utc.fix(), changes: Vec::new() }
    }

    /// Create a mock clock whose local wall clock reads `local` in the zone
    /// described by `offset`.
    pub fn at_local(local: NaiveDateTime, offset: FixedOffset) -> Self {
        let clock = Self { now: Arc::new(Mutex::new(Utc::now())), offset, changes: Vec::new() };
        clock.set_local(local);
        clock
    }

    /// Switch the wall clock to `offset` from the instant `from` onwards,
    /// like a daylight-saving transition.
    ///
    /// The current instant is kept; call [`MockClock::set_local`] afterwards
    /// to place the clock by wall time.
    #[must_use]
    pub fn with_offset_change(mut self, from: DateTime<Utc>, offset: FixedOffset) -> Self {
        self.changes.push((from, offset));
        self.changes.sort_by_key(|(at, _)| *at);
        self
    }

    /// Advance the mock clock by a duration
    ///
    /// This simulates time passing without actually waiting.
    pub fn advance(&self, duration: Duration) {
        let step = chrono::Duration::from_std(duration).expect("duration fits chrono range");
        // Test utility: panic on poisoned mutex to fail tests early
        let mut now = self.now.lock().expect("mutex poisoned");
        *now += step;
    }

    /// Jump to an absolute instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        // Test utility: panic on poisoned mutex to fail tests early
        *self.now.lock().expect("mutex poisoned") = instant;
    }

    /// Jump so that the local wall clock reads `local`.
    pub fn set_local(&self, local: NaiveDateTime) {
        self.set(resolve_local(self, local));
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        // Test utility: panic on poisoned mutex to fail tests early
        *self.now.lock().expect("mutex poisoned")
    }

    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        self.changes
            .iter()
            .rev()
            .find(|(from, _)| *from <= instant)
            .map_or(self.offset, |(_, offset)| *offset)
    }
}
