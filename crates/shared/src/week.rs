use time::{
    Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time,
    format_description::well_known::Rfc3339,
    macros::{format_description, time},
};
use time_tz::{OffsetError, PrimitiveDateTimeExt, ToTimezone, timezones};

const LAST_MILLISECOND: Time = time!(23:59:59.999);

/// Local Monday 00:00:00.000 to local Sunday 23:59:59.999. Each bound carries
/// the offset in effect at that wall-clock time, so weeks with a DST change
/// are an hour shorter or longer than seven days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl Week {
    /// Returns the week containing the given instant, as seen in `tz`
    pub fn containing(reference: OffsetDateTime, tz: &str) -> Self {
        let local = to_timezone(reference, tz);
        let days_since_monday = local.weekday().number_days_from_monday() as i64;

        Self::starting(local.date() - Duration::days(days_since_monday), tz)
    }

    /// Week whose first day is `monday`
    pub fn starting(monday: Date, tz: &str) -> Self {
        Self {
            start: local(monday.with_time(Time::MIDNIGHT), tz),
            end: local((monday + Duration::days(6)).with_time(LAST_MILLISECOND), tz),
        }
    }

    /// Local date of the first day.
    pub fn monday(&self) -> Date {
        self.start.date()
    }

    pub fn previous(&self, tz: &str) -> Self {
        Self::starting(self.monday() - Duration::weeks(1), tz)
    }

    pub fn next(&self, tz: &str) -> Self {
        Self::starting(self.monday() + Duration::weeks(1), tz)
    }

    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// A week plus the calendar labels shown above it.
///
/// `year` and `month` describe the local reference date, not the week bounds,
/// so a week spanning two months is labelled with the month it was requested
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub year: i32,
    pub month: Month,
    pub week_number: u8,
    pub week: Week,
}

impl WeekWindow {
    pub fn new(reference: OffsetDateTime, tz: &str) -> Self {
        let date = to_timezone(reference, tz).date();

        Self {
            year: date.year(),
            month: date.month(),
            week_number: iso_week_number(date),
            week: Week::containing(reference, tz),
        }
    }

    pub fn now(tz: &str) -> Self {
        Self::new(OffsetDateTime::now_utc(), tz)
    }

    pub fn month_name(&self) -> String {
        self.month.to_string()
    }
}

/// ISO-8601 week number: the week belongs to the year of its Thursday.
pub fn iso_week_number(date: Date) -> u8 {
    date.iso_week()
}

pub fn is_valid_timezone(tz: &str) -> bool {
    timezones::get_by_name(tz).is_some()
}

/// Converts an instant to the given IANA timezone, unknown names keep the
/// instant untouched.
pub fn to_timezone(instant: OffsetDateTime, tz: &str) -> OffsetDateTime {
    match timezones::get_by_name(tz) {
        Some(tz) => instant.to_timezone(tz),
        _ => instant,
    }
}

/// Attaches the offset `tz` uses at the given wall-clock time. An ambiguous
/// time (clocks going back) takes the first candidate, a skipped one (clocks
/// going forward) takes the offset in effect before the jump. Unknown names
/// are read as UTC.
pub fn local(date_time: PrimitiveDateTime, tz: &str) -> OffsetDateTime {
    let Some(zone) = timezones::get_by_name(tz) else {
        return date_time.assume_utc();
    };

    match date_time.assume_timezone(zone) {
        Ok(instant) => instant,
        Err(OffsetError::Ambiguous(first, _)) => first,
        Err(OffsetError::Undefined) => date_time.assume_timezone_utc(zone),
    }
}

pub fn now(tz: &str) -> OffsetDateTime {
    to_timezone(OffsetDateTime::now_utc(), tz)
}

/// Parses a `weekStart` reference, either a full RFC 3339 instant or a plain
/// `YYYY-MM-DD` date taken as local midnight.
pub fn parse_reference(input: &str, tz: &str) -> Option<OffsetDateTime> {
    let input = input.trim();

    if let Ok(instant) = OffsetDateTime::parse(input, &Rfc3339) {
        return Some(to_timezone(instant, tz));
    }

    let date = Date::parse(input, format_description!("[year]-[month]-[day]")).ok()?;

    Some(local(date.with_time(Time::MIDNIGHT), tz))
}
