use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Utc,
};
use chrono_tz::Tz;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
pub const SLOT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// The wall clock the wizard validates against.
///
/// Carries the current instant and the device's time zone. Local dates are
/// resolved with the offset in effect on that date, so a listing on the far
/// side of a daylight-saving change gets its own offset. Passing it in keeps
/// validation and assembly deterministic under test.
#[derive(Debug, Clone)]
pub struct LocalClock {
    pub now: DateTime<FixedOffset>,
    zone: Tz,
}

impl LocalClock {
    #[must_use]
    pub fn new(now: DateTime<FixedOffset>, zone: Tz) -> Self {
        Self { now, zone }
    }

    /// The system clock read in `zone`.
    #[must_use]
    pub fn system(zone: Tz) -> Self {
        Self::new(Utc::now().with_timezone(&zone).fixed_offset(), zone)
    }

    /// IANA name of the clock's zone, e.g. `America/Chicago`.
    #[must_use]
    pub fn timezone(&self) -> &'static str {
        self.zone.name()
    }

    /// Combines a `YYYY-MM-DD` date and an `HH:mm` time in the local zone.
    #[must_use]
    pub fn compose(&self, date_iso: &str, time24: &str) -> Option<DateTime<FixedOffset>> {
        let date = NaiveDate::parse_from_str(date_iso.trim(), DATE_FORMAT).ok()?;
        let time = NaiveTime::parse_from_str(time24.trim(), TIME_FORMAT).ok()?;
        self.at_local(date.and_time(time))
    }

    /// Parses a `YYYY-MM-DDTHH:mm` slot in the local zone.
    #[must_use]
    pub fn parse_slot(&self, slot: &str) -> Option<DateTime<FixedOffset>> {
        let naive = NaiveDateTime::parse_from_str(slot.trim(), SLOT_FORMAT).ok()?;
        self.at_local(naive)
    }

    /// A repeated wall time (fall back) resolves to its first occurrence. A
    /// skipped one (spring forward) moves ahead by the length of the gap.
    fn at_local(&self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self.zone.from_local_datetime(&naive) {
            LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => Some(at.fixed_offset()),
            LocalResult::None => {
                let before = self
                    .zone
                    .from_local_datetime(&(naive - Duration::hours(1)))
                    .earliest()?;
                Some((before + Duration::hours(1)).fixed_offset())
            }
        }
    }

    /// `true` when `at` is strictly after now.
    #[must_use]
    pub fn is_future(&self, at: DateTime<FixedOffset>) -> bool {
        at > self.now
    }
}
