//! Resolution of provider wall-clock strings to Unix timestamps.
//!
//! WeatherAPI reports astro times as local `"hh:mm AM"` strings next to a
//! local `"YYYY-MM-DD"` date. They must be interpreted in the forecast
//! location's zone, not the server's.

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;

use crate::types::ForecastLocation;

const LOCAL_DATE_FORMAT: &str = "%Y-%m-%d";
const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const ASTRO_TIME_FORMAT: &str = "%I:%M %p";

/// The zone used to interpret a location's wall-clock strings.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LocalZone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl LocalZone {
    /// Prefers the IANA `tz_id`; falls back to the offset implied by
    /// `localtime` vs `localtime_epoch`, then to UTC.
    pub(crate) fn for_location(location: &ForecastLocation) -> Self {
        if let Ok(tz) = location.tz_id.parse::<Tz>() {
            return Self::Named(tz);
        }

        let derived = location
            .localtime
            .as_deref()
            .zip(location.localtime_epoch)
            .and_then(|(local, epoch)| derive_offset(local, epoch));

        if let Some(offset) = derived {
            tracing::debug!(tz_id = %location.tz_id, %offset, "unknown tz_id; using derived offset");
            Self::Fixed(offset)
        } else {
            tracing::warn!(tz_id = %location.tz_id, "unknown tz_id and no local time; assuming UTC");
            Self::Fixed(Utc.fix())
        }
    }

    /// Converts a local wall-clock time to a Unix timestamp.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant; times
    /// inside a DST gap are shifted forward one hour.
    pub(crate) fn timestamp(self, naive: NaiveDateTime) -> Option<i64> {
        match self {
            Self::Named(tz) => resolve(&tz, naive),
            Self::Fixed(offset) => resolve(&offset, naive),
        }
    }

    /// Parses an astro time such as `"06:45 AM"` on `date`.
    ///
    /// Returns `0` for markers like `"No moonrise"` and anything unparseable.
    pub(crate) fn astro_timestamp(self, date: &str, time: &str) -> i64 {
        let Ok(date) = NaiveDate::parse_from_str(date, LOCAL_DATE_FORMAT) else {
            return 0;
        };
        let Ok(time) = NaiveTime::parse_from_str(time.trim(), ASTRO_TIME_FORMAT) else {
            return 0;
        };
        self.timestamp(date.and_time(time)).unwrap_or(0)
    }
}

/// Hour of day of a `"YYYY-MM-DD HH:MM"` local time string.
pub(crate) fn hour_of_day(local: &str) -> Option<u32> {
    NaiveDateTime::parse_from_str(local, LOCAL_DATETIME_FORMAT)
        .ok()
        .map(|dt| dt.hour())
}

fn resolve<Z: TimeZone>(zone: &Z, naive: NaiveDateTime) -> Option<i64> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.timestamp()),
        LocalResult::None => zone
            .from_local_datetime(&(naive + TimeDelta::hours(1)))
            .earliest()
            .map(|dt| dt.timestamp()),
    }
}

/// `localtime` is truncated to the minute, so the raw difference is rounded
/// to the nearest quarter hour (the finest offset granularity in use).
fn derive_offset(local: &str, epoch: i64) -> Option<FixedOffset> {
    let local = NaiveDateTime::parse_from_str(local, LOCAL_DATETIME_FORMAT).ok()?;
    let utc = DateTime::from_timestamp(epoch, 0)?.naive_utc();
    let diff = (local - utc).num_seconds();
    let rounded = (diff + 450).div_euclid(900) * 900;
    FixedOffset::east_opt(i32::try_from(rounded).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(tz_id: &str, localtime: Option<&str>, epoch: Option<i64>) -> ForecastLocation {
        ForecastLocation {
            tz_id: tz_id.to_string(),
            localtime_epoch: epoch,
            localtime: localtime.map(str::to_string),
        }
    }

    #[test]
    fn astro_time_resolves_in_named_zone() {
        let zone = LocalZone::for_location(&location("America/New_York", None, None));
        // 2025-05-09 06:00 EDT == 10:00 UTC
        assert_eq!(zone.astro_timestamp("2025-05-09", "06:00 AM"), 1_746_784_800);
        assert_eq!(zone.astro_timestamp("2025-05-09", "06:00 PM"), 1_746_828_000);
    }

    #[test]
    fn astro_markers_normalize_to_zero() {
        let zone = LocalZone::for_location(&location("Europe/London", None, None));
        assert_eq!(zone.astro_timestamp("2025-05-09", "No moonrise"), 0);
        assert_eq!(zone.astro_timestamp("2025-05-09", ""), 0);
        assert_eq!(zone.astro_timestamp("not-a-date", "06:00 AM"), 0);
    }

    #[test]
    fn unknown_zone_uses_offset_derived_from_local_time() {
        // localtime 2025-05-09 06:00 at epoch 10:00 UTC => UTC-4
        let zone = LocalZone::for_location(&location(
            "Mars/Olympus_Mons",
            Some("2025-05-09 6:00"),
            Some(1_746_784_800),
        ));
        assert!(matches!(zone, LocalZone::Fixed(offset) if offset.local_minus_utc() == -4 * 3600));
        assert_eq!(zone.astro_timestamp("2025-05-09", "06:00 AM"), 1_746_784_800);
    }

    #[test]
    fn unknown_zone_without_local_time_is_utc() {
        let zone = LocalZone::for_location(&location("Nowhere/Special", None, None));
        assert_eq!(zone.astro_timestamp("1970-01-02", "12:00 AM"), 86_400);
    }

    #[test]
    fn dst_gap_shifts_forward_one_hour() {
        let zone = LocalZone::Named(chrono_tz::America::New_York);
        // 2025-03-09 02:30 does not exist in New York; 03:30 EDT == 07:30 UTC.
        let naive = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        assert_eq!(zone.timestamp(naive), Some(1_741_505_400));
    }

    #[test]
    fn hour_of_day_parses_local_time() {
        assert_eq!(hour_of_day("2025-05-09 23:00"), Some(23));
        assert_eq!(hour_of_day("2025-05-09 06:00"), Some(6));
        assert_eq!(hour_of_day("garbage"), None);
    }
}
