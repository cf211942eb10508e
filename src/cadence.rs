//! Rebalance timing: cadence variants and the intraday trading window.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use serde::Deserialize;

use crate::state::RebalanceState;

/// How often the host evaluates the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// One tick per trading day.
    Daily,
    /// Multiple ticks per day (e.g. minute bars).
    Intraday,
}

/// When rebalance ticks become eligible.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Cadence {
    /// Eligible once at least `days` days have passed since the last
    /// rebalance. Always eligible while no rebalance has happened yet.
    ElapsedDays { days: i64 },

    /// Eligible only inside a fixed month/day window each year, regardless
    /// of when the last rebalance happened. Defaults cover the whole month.
    CalendarWindow {
        month: u32,
        #[serde(default = "default_day_start")]
        day_start: u32,
        #[serde(default = "default_day_end")]
        day_end: u32,
    },
}

fn default_day_start() -> u32 {
    1
}
fn default_day_end() -> u32 {
    31
}

/// Time-of-day bounds for sub-daily evaluation, inclusive on both ends.
///
/// Sub-daily ticks would otherwise fire all through an eligible day;
/// bounding them keeps rebalances away from the open/close auctions. With
/// daily granularity the window is not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IntradayWindow {
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
}

fn default_start_hour() -> u32 {
    10
}
fn default_end_hour() -> u32 {
    15
}

impl Default for IntradayWindow {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
        }
    }
}

impl IntradayWindow {
    fn contains<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let hour = now.hour();
        hour >= self.start_hour && hour <= self.end_hour
    }
}

/// The timing gate: a cadence plus the intraday window.
///
/// Checked first on every tick, before the drift computation and before
/// any open-order query, since most ticks are not rebalance-eligible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulePolicy {
    pub cadence: Cadence,
    pub intraday: IntradayWindow,
}

impl SchedulePolicy {
    /// Whether `now` is an eligible rebalance moment.
    ///
    /// Calendar fields (month, day, hour) are read in `now`'s own timezone,
    /// so hosts should pass exchange-local time. Elapsed-day arithmetic is
    /// done in UTC.
    pub fn is_eligible<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        state: &RebalanceState,
        granularity: Granularity,
    ) -> bool {
        let cadence_ok = match self.cadence {
            Cadence::ElapsedDays { days } => match state.last_rebalance() {
                None => true,
                Some(last) => now.with_timezone(&Utc) >= last + Duration::days(days),
            },
            Cadence::CalendarWindow {
                month,
                day_start,
                day_end,
            } => now.month() == month && now.day() >= day_start && now.day() <= day_end,
        };

        if !cadence_ok {
            return false;
        }

        match granularity {
            Granularity::Daily => true,
            Granularity::Intraday => self.intraday.contains(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn policy(cadence: Cadence) -> SchedulePolicy {
        SchedulePolicy {
            cadence,
            intraday: IntradayWindow::default(),
        }
    }

    fn recorded(ts: DateTime<Utc>) -> RebalanceState {
        let mut state = RebalanceState::new();
        state.record(ts);
        state
    }

    #[test]
    fn elapsed_days_eligible_when_unset() {
        let policy = policy(Cadence::ElapsedDays { days: 20 });
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap();

        assert!(policy.is_eligible(&now, &RebalanceState::new(), Granularity::Daily));
    }

    #[test]
    fn elapsed_days_boundary_is_inclusive() {
        let policy = policy(Cadence::ElapsedDays { days: 20 });
        let last = Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap();
        let state = recorded(last);

        let just_before = last + Duration::days(20) - Duration::seconds(1);
        let exactly = last + Duration::days(20);

        assert!(!policy.is_eligible(&just_before, &state, Granularity::Daily));
        assert!(policy.is_eligible(&exactly, &state, Granularity::Daily));
        assert!(policy.is_eligible(&(exactly + Duration::days(5)), &state, Granularity::Daily));
    }

    #[test]
    fn elapsed_days_compares_in_utc() {
        let policy = policy(Cadence::ElapsedDays { days: 1 });
        let last = Utc.with_ymd_and_hms(2024, 1, 10, 20, 0, 0).unwrap();
        let state = recorded(last);

        // 2024-01-11 16:00 -05:00 is 21:00 UTC, one day plus an hour later.
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = eastern.with_ymd_and_hms(2024, 1, 11, 16, 0, 0).unwrap();

        assert!(policy.is_eligible(&now, &state, Granularity::Daily));
    }

    #[test]
    fn calendar_window_matches_month_and_days() {
        let policy = policy(Cadence::CalendarWindow {
            month: 12,
            day_start: 20,
            day_end: 31,
        });

        let november = Utc.with_ymd_and_hms(2024, 11, 25, 15, 0, 0).unwrap();
        let early_december = Utc.with_ymd_and_hms(2024, 12, 5, 15, 0, 0).unwrap();
        let window = Utc.with_ymd_and_hms(2024, 12, 27, 15, 0, 0).unwrap();

        assert!(!policy.is_eligible(&november, &RebalanceState::new(), Granularity::Daily));
        assert!(!policy.is_eligible(&early_december, &RebalanceState::new(), Granularity::Daily));
        assert!(policy.is_eligible(&window, &RebalanceState::new(), Granularity::Daily));
    }

    #[test]
    fn calendar_window_ignores_last_rebalance() {
        let policy = policy(Cadence::CalendarWindow {
            month: 12,
            day_start: 20,
            day_end: 31,
        });
        let state = recorded(Utc.with_ymd_and_hms(2024, 12, 26, 15, 0, 0).unwrap());
        let next_day = Utc.with_ymd_and_hms(2024, 12, 27, 15, 0, 0).unwrap();

        assert!(policy.is_eligible(&next_day, &state, Granularity::Daily));
    }

    #[test]
    fn intraday_window_bounds_are_inclusive() {
        let policy = policy(Cadence::ElapsedDays { days: 1 });

        let at = |hour| Utc.with_ymd_and_hms(2024, 3, 1, hour, 30, 0).unwrap();

        assert!(!policy.is_eligible(&at(9), &RebalanceState::new(), Granularity::Intraday));
        assert!(policy.is_eligible(&at(10), &RebalanceState::new(), Granularity::Intraday));
        assert!(policy.is_eligible(&at(15), &RebalanceState::new(), Granularity::Intraday));
        assert!(!policy.is_eligible(&at(16), &RebalanceState::new(), Granularity::Intraday));
    }

    #[test]
    fn daily_granularity_skips_intraday_window() {
        let policy = policy(Cadence::ElapsedDays { days: 1 });
        let early = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();

        assert!(policy.is_eligible(&early, &RebalanceState::new(), Granularity::Daily));
        assert!(!policy.is_eligible(&early, &RebalanceState::new(), Granularity::Intraday));
    }

    #[test]
    fn cadence_parses_from_toml() {
        let elapsed: Cadence = toml::from_str("kind = \"elapsed-days\"\ndays = 20\n").unwrap();
        assert_eq!(elapsed, Cadence::ElapsedDays { days: 20 });

        let window: Cadence =
            toml::from_str("kind = \"calendar-window\"\nmonth = 12\nday_start = 20\n").unwrap();
        assert_eq!(
            window,
            Cadence::CalendarWindow {
                month: 12,
                day_start: 20,
                day_end: 31,
            }
        );
    }
}
