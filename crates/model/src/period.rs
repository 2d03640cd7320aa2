use chrono::{DateTime, Datelike as _, Days, Local, Months, Timelike as _};
use eyre::Error;
use serde::Serialize;
use strum::{Display, EnumString};

/// Requested report granularity. Parsed from the `Daily`/`Weekly`/`Monthly`
/// request keyword; anything else is rejected before a single read runs.
#[derive(Serialize, Display, EnumString, PartialEq, Eq, Clone, Copy, Debug, Default)]
#[strum(ascii_case_insensitive)]
pub enum Period {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

/// Half-open time interval `[from, to)` on the host clock. The host-local
/// timezone is a fixed convention, never inferred per vendor.
#[derive(Serialize, PartialEq, Eq, Clone, Copy, Debug)]
pub struct Window {
    pub from: DateTime<Local>,
    pub to: DateTime<Local>,
}

impl Window {
    pub fn contains(&self, at: DateTime<Local>) -> bool {
        self.from <= at && at < self.to
    }
}

/// Current window paired with the comparable previous one.
#[derive(Serialize, PartialEq, Eq, Clone, Copy, Debug)]
pub struct Comparison {
    pub current: Window,
    pub previous: Window,
}

impl Period {
    /// Resolves the current and previous comparison windows at `now`.
    ///
    /// Daily compares against the full prior calendar day, Weekly against
    /// the 7 days before the most recent week start (Sunday), Monthly
    /// against the entire preceding calendar month.
    pub fn comparison(&self, now: DateTime<Local>) -> Result<Comparison, Error> {
        fn inner(period: Period, now: DateTime<Local>) -> Option<Comparison> {
            let current_from = match period {
                Period::Daily => floor_day(now)?,
                Period::Weekly => {
                    let days_back = now.weekday().num_days_from_sunday() as u64;
                    floor_day(now.checked_sub_days(Days::new(days_back))?)?
                }
                Period::Monthly => floor_day(now.with_day0(0)?)?,
            };
            let previous_from = match period {
                Period::Daily => current_from.checked_sub_days(Days::new(1))?,
                Period::Weekly => current_from.checked_sub_days(Days::new(7))?,
                Period::Monthly => current_from.checked_sub_months(Months::new(1))?,
            };
            Some(Comparison {
                current: Window {
                    from: current_from,
                    to: now,
                },
                previous: Window {
                    from: previous_from,
                    to: current_from,
                },
            })
        }
        inner(*self, now)
            .ok_or_else(|| eyre::eyre!("Failed to resolve {} windows at {}", self, now))
    }
}

/// Twelve full calendar months ending at the current one, oldest first.
/// Month arithmetic re-normalizes across year boundaries.
pub fn rolling_months(now: DateTime<Local>) -> Result<Vec<Window>, Error> {
    fn inner(now: DateTime<Local>) -> Option<Vec<Window>> {
        let month_start = floor_day(now.with_day0(0)?)?;
        let mut windows = Vec::with_capacity(12);
        for back in (0..12u32).rev() {
            let from = month_start.checked_sub_months(Months::new(back))?;
            let to = from.checked_add_months(Months::new(1))?;
            windows.push(Window { from, to });
        }
        Some(windows)
    }
    inner(now).ok_or_else(|| eyre::eyre!("Failed to resolve rolling months at {}", now))
}

fn floor_day(date_time: DateTime<Local>) -> Option<DateTime<Local>> {
    date_time
        .with_hour(0)?
        .with_minute(0)?
        .with_second(0)?
        .with_nanosecond(0)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_daily_windows() {
        let now = at(2024, 5, 15, 13, 30);
        let cmp = Period::Daily.comparison(now).unwrap();
        assert_eq!(cmp.current.from, at(2024, 5, 15, 0, 0));
        assert_eq!(cmp.current.to, now);
        assert_eq!(cmp.previous.from, at(2024, 5, 14, 0, 0));
        assert_eq!(cmp.previous.to, at(2024, 5, 15, 0, 0));
    }

    #[test]
    fn test_weekly_windows_start_sunday() {
        // 2024-05-15 is a Wednesday.
        let now = at(2024, 5, 15, 9, 0);
        let cmp = Period::Weekly.comparison(now).unwrap();
        assert_eq!(cmp.current.from, at(2024, 5, 12, 0, 0));
        assert_eq!(cmp.previous.from, at(2024, 5, 5, 0, 0));
        assert_eq!(cmp.previous.to, at(2024, 5, 12, 0, 0));
    }

    #[test]
    fn test_weekly_on_sunday_itself() {
        // 2024-05-12 is a Sunday: the current week starts today.
        let now = at(2024, 5, 12, 18, 45);
        let cmp = Period::Weekly.comparison(now).unwrap();
        assert_eq!(cmp.current.from, at(2024, 5, 12, 0, 0));
        assert_eq!(cmp.previous.from, at(2024, 5, 5, 0, 0));
    }

    #[test]
    fn test_monthly_windows_roll_over_year() {
        let now = at(2025, 1, 10, 8, 0);
        let cmp = Period::Monthly.comparison(now).unwrap();
        assert_eq!(cmp.current.from, at(2025, 1, 1, 0, 0));
        assert_eq!(cmp.previous.from, at(2024, 12, 1, 0, 0));
        assert_eq!(cmp.previous.to, at(2025, 1, 1, 0, 0));
    }

    #[test]
    fn test_rolling_months_contiguous() {
        let now = at(2024, 3, 20, 12, 0);
        let windows = rolling_months(now).unwrap();
        assert_eq!(windows.len(), 12);
        assert_eq!(windows[0].from, at(2023, 4, 1, 0, 0));
        assert_eq!(windows[11].from, at(2024, 3, 1, 0, 0));
        assert_eq!(windows[11].to, at(2024, 4, 1, 0, 0));
        for pair in windows.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }

    #[test]
    fn test_period_keyword_parsing() {
        assert_eq!("Daily".parse::<Period>().unwrap(), Period::Daily);
        assert_eq!("monthly".parse::<Period>().unwrap(), Period::Monthly);
        assert!("Hourly".parse::<Period>().is_err());
        assert_eq!(Period::default(), Period::Monthly);
    }
}
