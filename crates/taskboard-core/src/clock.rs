use std::sync::{Arc, Mutex, PoisonError};

use time::{Date, Duration, OffsetDateTime, UtcOffset};

/// Source of "now" for creation stamps and of "today" for due-date rules.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> OffsetDateTime;

    /// Current calendar date in the clock's offset.
    fn today(&self) -> Date {
        self.now().date()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }

    fn today(&self) -> Date {
        (**self).today()
    }
}

/// Wall clock pinned to a UTC offset.
///
/// The local offset can only be read reliably while the process is single
/// threaded, so it is captured once by [`SystemClock::local`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    /// Clock in the current local offset, or UTC when it cannot be determined.
    #[must_use]
    pub fn local() -> Self {
        Self::with_offset(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
    }

    /// Clock in a fixed offset.
    #[must_use]
    pub const fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// Offset applied to every reading.
    #[must_use]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::local()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// Manually driven clock.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<OffsetDateTime>,
}

impl FixedClock {
    /// Create a clock frozen at `now`.
    #[must_use]
    pub const fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += by;
    }

    /// Jump to an absolute instant.
    pub fn set(&self, now: OffsetDateTime) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn fixed_clock_reports_and_advances() {
        let clock = FixedClock::new(datetime!(2024-01-10 23:30 UTC));
        assert_eq!(clock.today(), date!(2024 - 01 - 10));
        clock.advance(Duration::hours(1));
        assert_eq!(clock.today(), date!(2024 - 01 - 11));
    }

    #[test]
    fn today_uses_the_clock_offset() {
        let clock = FixedClock::new(datetime!(2024-01-10 23:30 -05:00));
        assert_eq!(clock.today(), date!(2024 - 01 - 10));
    }

    #[test]
    fn system_clock_reads_in_its_offset() {
        let offset = UtcOffset::from_hms(9, 0, 0).unwrap_or(UtcOffset::UTC);
        let clock = SystemClock::with_offset(offset);
        assert_eq!(clock.now().offset(), offset);
        assert_eq!(clock.offset(), offset);
    }

    #[test]
    fn shared_clock_delegates() {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(datetime!(2024-02-01 0:00 UTC)));
        assert_eq!(clock.today(), date!(2024 - 02 - 01));
    }
}
