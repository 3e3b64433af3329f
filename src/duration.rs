//! Calendar-aware duration breakdown and formatting.
//!
//! The span between two instants is decomposed into calendar-correct years
//! and months (month arithmetic clamps to the end of the target month, so
//! one month after January 31st is the last day of February) followed by
//! fixed-length days, hours, minutes, seconds and milliseconds.
//!
//! Formatting expands runs of the single-letter tokens `Y M D h m s v` to
//! zero-padded fields of the run length; any other letter is a fatal
//! formatting error. Non-alphabetic characters pass through unchanged.

use chrono::{Datelike, Months, NaiveDateTime};

use crate::error::ClockError;

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Add whole months with end-of-month clamping. Month arithmetic never
/// overflows for the dates a clock handles, so a failed add keeps the input.
fn add_months(date: NaiveDateTime, months: u32) -> NaiveDateTime {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// A start-to-end span broken into calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
}

impl Duration {
    /// Break down the span between two instants. Argument order does not
    /// matter; the span is always non-negative.
    pub fn between(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };

        // Full calendar years: the year difference, walked back while
        // adding it overshoots the end.
        let mut years = (end.year() - start.year()) as i64;
        while years > 0 && add_months(start, years as u32 * 12) > end {
            years -= 1;
        }
        let cursor = add_months(start, years as u32 * 12);

        // Full calendar months within the final year.
        let mut months =
            (end.year() - cursor.year()) as i64 * 12 + (end.month() as i64 - cursor.month() as i64);
        months = months.max(0);
        while months > 0 && add_months(cursor, months as u32) > end {
            months -= 1;
        }
        let cursor = add_months(cursor, months as u32);

        // The remainder is fixed-length time.
        let ms = (end - cursor).num_milliseconds().max(0);
        Duration {
            years,
            months,
            days: ms / MS_PER_DAY,
            hours: ms % MS_PER_DAY / MS_PER_HOUR,
            minutes: ms % MS_PER_HOUR / MS_PER_MINUTE,
            seconds: ms % MS_PER_MINUTE / MS_PER_SECOND,
            milliseconds: ms % MS_PER_SECOND,
        }
    }

    fn field(&self, token: char) -> Option<i64> {
        match token {
            'Y' => Some(self.years),
            'M' => Some(self.months),
            'D' => Some(self.days),
            'h' => Some(self.hours),
            'm' => Some(self.minutes),
            's' => Some(self.seconds),
            'v' => Some(self.milliseconds),
            _ => None,
        }
    }

    /// Expand a token pattern against this breakdown.
    ///
    /// Each run of a recognized token letter becomes that field zero-padded
    /// to the run length (`mm` -> minutes, two digits). An unrecognized
    /// letter is a hard failure.
    pub fn format(&self, pattern: &str) -> Result<String, ClockError> {
        let mut out = String::with_capacity(pattern.len());
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if !c.is_ascii_alphabetic() {
                out.push(c);
                continue;
            }

            let mut run: usize = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                run += 1;
            }

            match self.field(c) {
                Some(value) => out.push_str(&format!("{value:0run$}")),
                None => {
                    return Err(ClockError::InvalidFormatToken(
                        std::iter::repeat_n(c, run).collect(),
                    ));
                }
            }
        }

        Ok(out)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn plain_time_span() {
        let d = Duration::between(at(2024, 1, 1, 0, 0, 0), at(2024, 1, 1, 1, 2, 3));
        assert_eq!((d.hours, d.minutes, d.seconds), (1, 2, 3));
        assert_eq!(d.days, 0);
    }

    #[test]
    fn argument_order_does_not_matter() {
        let forward = Duration::between(at(2024, 1, 1, 0, 0, 0), at(2024, 3, 1, 0, 0, 0));
        let backward = Duration::between(at(2024, 3, 1, 0, 0, 0), at(2024, 1, 1, 0, 0, 0));
        assert_eq!(forward, backward);
        assert_eq!(forward.months, 2);
    }

    #[test]
    fn calendar_months_clamp_at_month_end() {
        // Jan 31 -> Mar 1: one month (to end of Feb) plus one day.
        let d = Duration::between(at(2024, 1, 31, 0, 0, 0), at(2024, 3, 1, 0, 0, 0));
        assert_eq!(d.months, 1);
        assert_eq!(d.days, 1);
    }

    #[test]
    fn years_use_calendar_arithmetic() {
        let d = Duration::between(at(2020, 6, 15, 0, 0, 0), at(2023, 6, 14, 0, 0, 0));
        assert_eq!(d.years, 2);
        assert_eq!(d.months, 11);

        let d = Duration::between(at(2020, 6, 15, 0, 0, 0), at(2023, 6, 15, 0, 0, 0));
        assert_eq!(d.years, 3);
        assert_eq!(d.months, 0);
    }

    #[test]
    fn leap_day_span() {
        let d = Duration::between(at(2024, 2, 28, 0, 0, 0), at(2024, 3, 1, 0, 0, 0));
        assert_eq!(d.days, 2);
    }

    #[test]
    fn format_pads_to_run_length() {
        let d = Duration::between(at(2024, 1, 1, 0, 0, 0), at(2024, 1, 1, 1, 2, 3));
        assert_eq!(d.format("hh:mm:ss").unwrap(), "01:02:03");
        assert_eq!(d.format("m:s").unwrap(), "2:3");
    }

    #[test]
    fn format_keeps_separators() {
        let d = Duration::between(at(2024, 1, 1, 0, 0, 0), at(2024, 1, 3, 0, 0, 0));
        assert_eq!(d.format("DD hh:mm").unwrap(), "02 00:00");
    }

    #[test]
    fn unknown_token_is_fatal() {
        let d = Duration::default();
        assert_eq!(
            d.format("hh:xx").unwrap_err(),
            ClockError::InvalidFormatToken("xx".to_string())
        );
    }

    #[test]
    fn milliseconds_token() {
        let start = at(2024, 1, 1, 0, 0, 0);
        let end = start + chrono::Duration::milliseconds(1_234);
        let d = Duration::between(start, end);
        assert_eq!(d.format("s.vvv").unwrap(), "1.234");
    }
}
