//! Calendar helpers over UTC date-times.
//!
//! Every function here works in UTC. Week-based helpers number weekdays from
//! Sunday (`0`) to Saturday (`6`).

use chrono::{
    DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Timelike, Utc,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid date provided")]
    InvalidDate,
    #[error("Invalid date string provided")]
    InvalidDateString,
    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
    #[error("invalid cron expression: {0}")]
    InvalidCron(String),
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Values that can be read as a UTC date-time.
pub trait DateInput {
    fn to_date_time(&self) -> Option<DateTime<Utc>>;
}

impl DateInput for DateTime<Utc> {
    fn to_date_time(&self) -> Option<DateTime<Utc>> {
        Some(*self)
    }
}

impl DateInput for NaiveDate {
    fn to_date_time(&self) -> Option<DateTime<Utc>> {
        Some(self.and_time(NaiveTime::MIN).and_utc())
    }
}

impl DateInput for str {
    fn to_date_time(&self) -> Option<DateTime<Utc>> {
        parse_date(self)
    }
}

impl DateInput for String {
    fn to_date_time(&self) -> Option<DateTime<Utc>> {
        parse_date(self)
    }
}

impl<T: DateInput + ?Sized> DateInput for &T {
    fn to_date_time(&self) -> Option<DateTime<Utc>> {
        (**self).to_date_time()
    }
}

/// Parse an RFC 3339 timestamp, a zone-less `YYYY-MM-DD[ T]HH:MM[:SS[.fff]]`
/// date-time, or a plain `YYYY-MM-DD` date. Zone-less input is taken as UTC.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.to_date_time())
}

fn weekday_from_sunday(date: &DateTime<Utc>) -> i64 {
    i64::from(date.weekday().num_days_from_sunday())
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// English month names, January first.
pub fn get_month_list() -> [&'static str; 12] {
    MONTHS
}

/// Format a millisecond Unix timestamp as `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use utilkit::date::timestamp_to_date;
///
/// assert_eq!(timestamp_to_date(1_672_531_200_000).unwrap(), "2023-01-01");
/// ```
pub fn timestamp_to_date(millis: i64) -> Result<String, DateError> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .ok_or(DateError::TimestampOutOfRange(millis))
}

/// Format a date as `YYYY-MM-DD`; `None` stays `None`.
pub fn format_date(date: Option<&DateTime<Utc>>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

/// Format as `YYYY-MM-DD-HH-MM-SS`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use utilkit::date::date_with_timestamp;
///
/// let date = Utc.with_ymd_and_hms(2022, 12, 30, 13, 30, 30).unwrap();
/// assert_eq!(date_with_timestamp(&date), "2022-12-30-13-30-30");
/// ```
pub fn date_with_timestamp(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d-%H-%M-%S").to_string()
}

/// Saturday of the week containing `date`, same time of day.
pub fn get_week_last_day(date: &DateTime<Utc>) -> DateTime<Utc> {
    *date + Duration::days(6 - weekday_from_sunday(date))
}

/// Monday of the week containing `date`, same time of day.
///
/// Weeks start on Sunday, so a Sunday maps to the Monday after it.
pub fn get_week_first_day(date: &DateTime<Utc>) -> DateTime<Utc> {
    *date - Duration::days(weekday_from_sunday(date) - 1)
}

/// Midnight on the last day of the month.
pub fn get_month_last_day(date: &DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let next_first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date.date_naive());
    midnight(next_first) - Duration::days(1)
}

/// Midnight on the first day of the month.
pub fn get_month_first_day(date: &DateTime<Utc>) -> DateTime<Utc> {
    midnight(date.date_naive().with_day(1).unwrap_or(date.date_naive()))
}

pub fn is_weekday(date: &DateTime<Utc>) -> bool {
    weekday_from_sunday(date) % 6 != 0
}

/// Format a date string as e.g. `January 1, 2022`.
///
/// # Examples
///
/// ```
/// use utilkit::date::to_long_date;
///
/// assert_eq!(to_long_date("2022-01-01").unwrap(), "January 1, 2022");
/// assert!(to_long_date("not a date").is_err());
/// ```
pub fn to_long_date(date: &str) -> Result<String, DateError> {
    let dt = parse_date(date).ok_or(DateError::InvalidDate)?;
    Ok(format!("{} {}, {}", MONTHS[dt.month0() as usize], dt.day(), dt.year()))
}

/// Serialize an instant as `minute hour day month weekday`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use utilkit::date::date_time_to_cron;
///
/// let date = Utc.with_ymd_and_hms(2023, 8, 18, 12, 34, 0).unwrap();
/// assert_eq!(date_time_to_cron(&date), "34 12 18 8 5");
/// ```
pub fn date_time_to_cron(date: &DateTime<Utc>) -> String {
    format!(
        "{} {} {} {} {}",
        date.minute(),
        date.hour(),
        date.day(),
        date.month(),
        weekday_from_sunday(date)
    )
}

/// Read back a string produced by [`date_time_to_cron`] as the next matching
/// instant after now.
pub fn cron_to_date_time(cron: &str) -> Result<DateTime<Utc>, DateError> {
    cron_to_date_time_from(cron, Utc::now())
}

/// Like [`cron_to_date_time`], relative to `now`.
///
/// The date is built in `now`'s year, shifted forward to the requested weekday,
/// and moved to the following year unless it is strictly after `now`. A day of
/// `*` means the 1st; a weekday of `*` skips the weekday shift.
pub fn cron_to_date_time_from(cron: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, DateError> {
    let invalid = || DateError::InvalidCron(cron.to_string());
    let fields: Vec<&str> = cron.split_whitespace().collect();
    let [minute, hour, day, month, weekday] = fields.as_slice() else {
        return Err(invalid());
    };
    let field = |s: &str| s.parse::<u32>().map_err(|_| invalid());

    let minute = field(*minute)?;
    let hour = field(*hour)?;
    let day = if *day == "*" { 1 } else { field(*day)? };
    let month = field(*month)?;

    if !(1..=31).contains(&day) {
        return Err(invalid());
    }
    // Days past the end of the month spill into the next one (Feb 29 in a
    // common year lands on Mar 1).
    let date = NaiveDate::from_ymd_opt(now.year(), month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(day - 1))))
        .ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)?;
    let mut next = date.and_time(time).and_utc();

    if *weekday != "*" {
        let weekday = i64::from(field(*weekday)?);
        if weekday > 6 {
            return Err(invalid());
        }
        let diff = (weekday - weekday_from_sunday(&next) + 7) % 7;
        next += Duration::days(diff);
    }

    if next <= now {
        next = next.with_year(next.year() + 1).unwrap_or_else(|| {
            // Feb 29 rolls over to Mar 1 in a common year.
            midnight(NaiveDate::from_ymd_opt(next.year() + 1, 3, 1).unwrap_or(next.date_naive()))
                + Duration::hours(i64::from(next.hour()))
                + Duration::minutes(i64::from(next.minute()))
        });
    }
    tracing::trace!(%cron, %next, "cron resolved");
    Ok(next)
}

/// Iterator over dates from `start` (inclusive) to `end` (exclusive).
///
/// Iteration stops early if the next step would leave chrono's supported range.
#[derive(Debug, Clone)]
pub struct DateRange {
    current: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Option<Duration>,
}

impl Iterator for DateRange {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.step.filter(|step| *step > Duration::zero())?;
        if self.current >= self.end {
            return None;
        }
        let out = self.current;
        match self.current.checked_add_signed(step) {
            Some(next) => self.current = next,
            None => self.step = None,
        }
        Some(out)
    }
}

/// Dates from `start` to `end`, `step_days` apart. A non-positive step, or one
/// too large to represent, yields nothing.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use utilkit::date::date_range;
///
/// let start = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2021, 6, 4, 0, 0, 0).unwrap();
/// assert_eq!(date_range(start, end, 1).count(), 3);
/// ```
pub fn date_range(start: DateTime<Utc>, end: DateTime<Utc>, step_days: i64) -> DateRange {
    DateRange {
        current: start,
        end,
        step: Duration::try_days(step_days),
    }
}

/// Seconds in `days` days, or `None` on overflow.
pub fn seconds_in_days(days: i64) -> Option<i64> {
    days.checked_mul(24 * 60 * 60)
}

/// Describe how long ago `date` was, e.g. `"3 hours ago"`.
pub fn time_ago(date: &DateTime<Utc>) -> String {
    time_ago_from(date, &Utc::now())
}

/// Like [`time_ago`], relative to `now`.
///
/// A unit is used only once at least two of it have passed; anything under ten
/// seconds is `"just now"`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use utilkit::date::time_ago_from;
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
/// assert_eq!(time_ago_from(&(now - Duration::hours(3)), &now), "3 hours ago");
/// assert_eq!(time_ago_from(&(now - Duration::seconds(5)), &now), "just now");
/// ```
pub fn time_ago_from(date: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let seconds = (*now - *date).num_seconds();
    let units = [
        (31_536_000, "years"),
        (2_592_000, "months"),
        (86_400, "days"),
        (3_600, "hours"),
        (60, "minutes"),
    ];
    for (size, name) in units {
        let interval = seconds.div_euclid(size);
        if interval > 1 {
            return format!("{interval} {name} ago");
        }
    }
    if seconds < 10 {
        return "just now".to_string();
    }
    format!("{seconds} seconds ago")
}

/// Zone name from the `TZ` environment variable, or `"UTC"`.
pub fn get_time_zone() -> String {
    std::env::var("TZ")
        .ok()
        .filter(|tz| !tz.trim().is_empty())
        .unwrap_or_else(|| "UTC".to_string())
}

/// Current Unix time in milliseconds.
pub fn timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current time as an ISO 8601 string with milliseconds, e.g.
/// `2025-01-26T12:42:00.123Z`.
pub fn timestamp_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalize a date string or date-time to an ISO 8601 UTC string.
///
/// # Examples
///
/// ```
/// use utilkit::date::to_utc;
///
/// assert_eq!(to_utc("2024-03-10T10:00:00+02:00").unwrap(), "2024-03-10T08:00:00.000Z");
/// assert!(to_utc("garbage").is_err());
/// ```
pub fn to_utc<D: DateInput + ?Sized>(date: &D) -> Result<String, DateError> {
    date.to_date_time()
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or(DateError::InvalidDateString)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_get_month_list() {
        let months = get_month_list();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], "January");
        assert_eq!(months[11], "December");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some(&utc(2024, 2, 9, 0, 0, 0))), Some("2024-02-09".to_string()));
        assert_eq!(format_date(None), None);
    }

    #[test]
    fn test_week_boundaries() {
        // 2022-12-30 is a Friday.
        let friday = utc(2022, 12, 30, 8, 0, 0);
        assert_eq!(get_week_first_day(&friday), utc(2022, 12, 26, 8, 0, 0));
        assert_eq!(get_week_last_day(&friday), utc(2022, 12, 31, 8, 0, 0));

        let sunday = utc(2023, 1, 1, 0, 0, 0);
        assert_eq!(get_week_first_day(&sunday), utc(2023, 1, 2, 0, 0, 0));
        assert_eq!(get_week_last_day(&sunday), utc(2023, 1, 7, 0, 0, 0));
    }

    #[test]
    fn test_month_boundaries() {
        let date = utc(2024, 2, 15, 18, 45, 0);
        assert_eq!(get_month_first_day(&date), utc(2024, 2, 1, 0, 0, 0));
        assert_eq!(get_month_last_day(&date), utc(2024, 2, 29, 0, 0, 0));
        assert_eq!(get_month_last_day(&utc(2023, 12, 5, 0, 0, 0)), utc(2023, 12, 31, 0, 0, 0));
    }

    #[test]
    fn test_is_weekday() {
        assert!(is_weekday(&utc(2022, 12, 30, 0, 0, 0)));
        assert!(!is_weekday(&utc(2022, 12, 31, 0, 0, 0)));
        assert!(!is_weekday(&utc(2023, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_to_long_date_formats() {
        assert_eq!(to_long_date("2023-08-18T12:34:00Z").unwrap(), "August 18, 2023");
        assert_eq!(to_long_date("2023-12-25 09:00:00").unwrap(), "December 25, 2023");
        assert_eq!(to_long_date("").unwrap_err(), DateError::InvalidDate);
    }

    #[test]
    fn test_cron_round_trip() {
        let date = utc(2023, 8, 18, 12, 34, 0);
        let cron = date_time_to_cron(&date);
        let now = utc(2023, 8, 1, 0, 0, 0);
        assert_eq!(cron_to_date_time_from(&cron, now).unwrap(), date);
    }

    #[test]
    fn test_cron_rolls_to_next_year() {
        let now = utc(2023, 9, 1, 0, 0, 0);
        let next = cron_to_date_time_from("34 12 18 8 5", now).unwrap();
        assert_eq!(next.year(), 2024);
        assert_eq!((next.month(), next.day(), next.hour(), next.minute()), (8, 18, 12, 34));

        // Equal to now is not in the future.
        let at = utc(2023, 8, 18, 12, 34, 0);
        assert_eq!(cron_to_date_time_from("34 12 18 8 5", at).unwrap().year(), 2024);
    }

    #[test]
    fn test_cron_weekday_shift_and_wildcards() {
        let now = utc(2023, 1, 1, 0, 0, 0);
        // 2023-03-01 is a Wednesday; weekday 5 shifts to Friday the 3rd.
        let next = cron_to_date_time_from("0 9 * 3 5", now).unwrap();
        assert_eq!(next, utc(2023, 3, 3, 9, 0, 0));
        let next = cron_to_date_time_from("0 9 * 3 *", now).unwrap();
        assert_eq!(next, utc(2023, 3, 1, 9, 0, 0));
    }

    #[test]
    fn test_cron_leap_day_in_common_year() {
        let leap = utc(2024, 2, 29, 8, 15, 0);
        let cron = date_time_to_cron(&leap);
        assert_eq!(cron, "15 8 29 2 4");
        // 2025-02-29 spills to Saturday Mar 1, then shifts to Thursday Mar 6.
        let now = utc(2025, 1, 1, 0, 0, 0);
        let next = cron_to_date_time_from(&cron, now).unwrap();
        assert_eq!(next, utc(2025, 3, 6, 8, 15, 0));
        assert_eq!(weekday_from_sunday(&next), weekday_from_sunday(&leap));

        let next = cron_to_date_time_from("0 0 29 2 *", utc(2023, 1, 1, 0, 0, 0)).unwrap();
        assert_eq!(next, utc(2023, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_cron_invalid() {
        let now = utc(2023, 1, 1, 0, 0, 0);
        assert!(matches!(cron_to_date_time_from("1 2 3", now), Err(DateError::InvalidCron(_))));
        assert!(cron_to_date_time_from("61 0 1 1 0", now).is_err());
        assert!(cron_to_date_time_from("0 0 1 13 0", now).is_err());
        assert!(cron_to_date_time_from("0 0 1 1 9", now).is_err());
        assert!(cron_to_date_time_from("0 0 32 1 *", now).is_err());
        assert!(cron_to_date_time_from("0 0 0 1 *", now).is_err());
        assert!(cron_to_date_time_from("0 24 1 1 *", now).is_err());
    }

    #[test]
    fn test_date_range_step() {
        let start = utc(2021, 6, 1, 0, 0, 0);
        let end = utc(2021, 6, 10, 0, 0, 0);
        let days: Vec<u32> = date_range(start, end, 3).map(|d| d.day()).collect();
        assert_eq!(days, vec![1, 4, 7]);
        assert_eq!(date_range(start, end, 0).count(), 0);
        assert_eq!(date_range(end, start, 1).count(), 0);
    }

    #[test]
    fn test_date_range_extreme_steps() {
        let start = utc(2021, 6, 1, 0, 0, 0);
        assert_eq!(date_range(start, utc(2021, 6, 10, 0, 0, 0), i64::MAX).count(), 0);

        // Roughly 100k years per step; the fourth step would pass the last
        // representable instant.
        let dates: Vec<_> = date_range(start, DateTime::<Utc>::MAX_UTC, 36_500_000).collect();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0], start);
    }

    #[test]
    fn test_seconds_in_days() {
        assert_eq!(seconds_in_days(1), Some(86_400));
        assert_eq!(seconds_in_days(30), Some(2_592_000));
        assert_eq!(seconds_in_days(-2), Some(-172_800));
        assert_eq!(seconds_in_days(i64::MAX / 86_400 + 1), None);
        assert_eq!(seconds_in_days(i64::MIN), None);
    }

    #[test]
    fn test_time_ago_thresholds() {
        let now = utc(2024, 5, 1, 12, 0, 0);
        assert_eq!(time_ago_from(&(now - Duration::days(800)), &now), "2 years ago");
        assert_eq!(time_ago_from(&(now - Duration::days(90)), &now), "3 months ago");
        assert_eq!(time_ago_from(&(now - Duration::days(2)), &now), "2 days ago");
        // One day is below every threshold except hours.
        assert_eq!(time_ago_from(&(now - Duration::days(1)), &now), "24 hours ago");
        assert_eq!(time_ago_from(&(now - Duration::minutes(5)), &now), "5 minutes ago");
        assert_eq!(time_ago_from(&(now - Duration::seconds(90)), &now), "90 seconds ago");
        assert_eq!(time_ago_from(&(now - Duration::seconds(9)), &now), "just now");
    }

    #[test]
    fn test_timestamps() {
        assert!(timestamp() > 1_600_000_000_000);
        let iso = timestamp_iso();
        assert!(iso.ends_with('Z'));
        assert_eq!(iso.len(), "2025-01-26T12:42:00.123Z".len());
    }

    #[test]
    fn test_to_utc_inputs() {
        let dt = utc(2020, 1, 2, 3, 4, 5);
        assert_eq!(to_utc(&dt).unwrap(), "2020-01-02T03:04:05.000Z");
        assert_eq!(to_utc("2020-01-02").unwrap(), "2020-01-02T00:00:00.000Z");
        assert_eq!(to_utc(&"2020-01-02".to_string()).unwrap(), "2020-01-02T00:00:00.000Z");
        assert_eq!(to_utc("nope").unwrap_err().to_string(), "Invalid date string provided");
    }

    #[test]
    fn test_timestamp_to_date() {
        assert_eq!(timestamp_to_date(0).unwrap(), "1970-01-01");
        assert!(timestamp_to_date(i64::MAX).is_err());
    }
}
