//! Calendar granularities used for time-axis ticks, coarsest first.

use super::{Tick, TickKind};
use crate::utils::date_formatter::{format_date, to_seconds, to_zoned, SmartDateFormat};
use chrono::{DateTime, Datelike, Duration, Months, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const YEAR: f64 = 365.2425 * DAY;
const MONTH: f64 = YEAR / 12.0;

/// Hard cap on the number of ticks a single walk may emit.
const MAX_TICKS: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Granularity {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    SixHours,
    Hour,
    FiveMinutes,
    Minute,
    TenSeconds,
    Second,
}

impl Granularity {
    pub const ALL: [Granularity; 11] = [
        Granularity::Year,
        Granularity::Quarter,
        Granularity::Month,
        Granularity::Week,
        Granularity::Day,
        Granularity::SixHours,
        Granularity::Hour,
        Granularity::FiveMinutes,
        Granularity::Minute,
        Granularity::TenSeconds,
        Granularity::Second,
    ];

    /// How many units of this granularity a duration spans.
    ///
    /// The five-minute rule is measured in twelfths of an hour rather than
    /// in five-minute units, so an hour-long window qualifies for it at five
    /// base ticks.
    pub fn magnitude(&self, duration_secs: f64) -> f64 {
        match self {
            Self::Year => duration_secs / YEAR,
            Self::Quarter => duration_secs / (MONTH * 3.0),
            Self::Month => duration_secs / MONTH,
            Self::Week => duration_secs / (DAY * 7.0),
            Self::Day => duration_secs / DAY,
            Self::SixHours => duration_secs / (HOUR * 6.0),
            Self::Hour => duration_secs / HOUR,
            Self::FiveMinutes => duration_secs / HOUR * 5.0,
            Self::Minute => duration_secs / MINUTE,
            Self::TenSeconds => duration_secs / 10.0,
            Self::Second => duration_secs,
        }
    }

    /// The last round boundary at or before `date`, in local time.
    pub fn anchor(&self, date: &DateTime<Tz>) -> DateTime<Tz> {
        let local = date.naive_local();
        let day = local.date();
        let naive = match self {
            Self::Year => day.with_ordinal(1).map(|d| d.and_time(NaiveTime::MIN)),
            Self::Quarter => day
                .with_day(1)
                .and_then(|d| d.with_month0(d.month0() / 3 * 3))
                .map(|d| d.and_time(NaiveTime::MIN)),
            Self::Month => day.with_day(1).map(|d| d.and_time(NaiveTime::MIN)),
            Self::Week => Some(
                (day - Duration::days(day.weekday().num_days_from_monday() as i64))
                    .and_time(NaiveTime::MIN),
            ),
            Self::Day => Some(day.and_time(NaiveTime::MIN)),
            Self::SixHours => day.and_hms_opt(local.hour() / 6 * 6, 0, 0),
            Self::Hour => day.and_hms_opt(local.hour(), 0, 0),
            Self::FiveMinutes => day.and_hms_opt(local.hour(), local.minute() / 5 * 5, 0),
            Self::Minute => day.and_hms_opt(local.hour(), local.minute(), 0),
            Self::TenSeconds => {
                day.and_hms_opt(local.hour(), local.minute(), local.second() / 10 * 10)
            }
            Self::Second => day.and_hms_opt(local.hour(), local.minute(), local.second()),
        };
        match naive {
            Some(n) => localize(date.timezone(), n).min(*date),
            None => *date,
        }
    }

    /// Advances one unit. Calendar units step in local time so they stay on
    /// local boundaries across DST changes.
    pub fn step(&self, date: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let tz = date.timezone();
        let local = date.naive_local();
        let next = match self {
            Self::Year => localize(tz, local.checked_add_months(Months::new(12))?),
            Self::Quarter => localize(tz, local.checked_add_months(Months::new(3))?),
            Self::Month => localize(tz, local.checked_add_months(Months::new(1))?),
            Self::Week => localize(tz, local + Duration::days(7)),
            Self::Day => localize(tz, local + Duration::days(1)),
            Self::SixHours => localize(tz, local + Duration::hours(6)),
            Self::Hour => *date + Duration::hours(1),
            Self::FiveMinutes => *date + Duration::minutes(5),
            Self::Minute => *date + Duration::minutes(1),
            Self::TenSeconds => *date + Duration::seconds(10),
            Self::Second => *date + Duration::seconds(1),
        };
        (next > *date).then_some(next)
    }

    pub fn label(&self, date: &DateTime<Tz>, intermediate: bool) -> String {
        let format = match (self, intermediate) {
            (Self::Year, _) => SmartDateFormat::Year,
            (Self::Quarter, false) => return format!("{} {}", format_date(date, SmartDateFormat::Quarter), date.year()),
            (Self::Quarter, true) => SmartDateFormat::Quarter,
            (Self::Month, false) => SmartDateFormat::MonthYear,
            (Self::Month, true) => SmartDateFormat::Month,
            (Self::Week | Self::Day, false) => SmartDateFormat::DayMonth,
            (Self::Week | Self::Day, true) => return date.format("%d").to_string(),
            (Self::SixHours | Self::Hour | Self::FiveMinutes | Self::Minute, false)
                if is_midnight(date) =>
            {
                SmartDateFormat::DayMonth
            }
            (Self::SixHours | Self::Hour | Self::FiveMinutes | Self::Minute, _) => {
                SmartDateFormat::HourMin
            }
            (Self::TenSeconds | Self::Second, false) => SmartDateFormat::HourMinSec,
            (Self::TenSeconds | Self::Second, true) => return date.format(":%S").to_string(),
        };
        format_date(date, format)
    }

    pub fn full_label(&self, date: &DateTime<Tz>) -> String {
        let format = match self {
            Self::Year | Self::Quarter | Self::Month | Self::Week | Self::Day => {
                return date.format("%d %b %Y").to_string()
            }
            Self::SixHours | Self::Hour | Self::FiveMinutes | Self::Minute => SmartDateFormat::Full,
            Self::TenSeconds | Self::Second => SmartDateFormat::FullSec,
        };
        format_date(date, format)
    }
}

fn is_midnight(date: &DateTime<Tz>) -> bool {
    date.hour() == 0 && date.minute() == 0 && date.second() == 0
}

/// Resolves a local wall-clock time. Times skipped by a DST jump resolve to
/// the first valid instant after them.
fn localize(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt;
    }
    let mut probe = naive;
    for _ in 0..4 {
        probe += Duration::minutes(30);
        if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
            return dt;
        }
    }
    tz.from_utc_datetime(&naive)
}

/// Ordered, immutable list of granularities. Rule `i + 1` is the next-finer
/// rule of rule `i`.
#[derive(Clone, Debug)]
pub struct TickRuleChain {
    rules: Vec<Granularity>,
    tz: Tz,
}

impl Default for TickRuleChain {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl TickRuleChain {
    pub fn new(tz: Tz) -> Self {
        Self {
            rules: Granularity::ALL.to_vec(),
            tz,
        }
    }

    pub fn rules(&self) -> &[Granularity] {
        &self.rules
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Ticks of rule `index` inside `[start, end]`.
    ///
    /// With `is_base`, the two boundaries are emitted with full labels and the
    /// stretches between a boundary and the nearest regular tick are filled
    /// by the next-finer rule.
    pub fn fill_range(&self, index: usize, start: f64, end: f64, is_base: bool) -> Vec<Tick> {
        let Some(rule) = self.rules.get(index) else {
            return Vec::new();
        };
        let (Some(start_dt), Some(end_dt)) = (to_zoned(start, self.tz), to_zoned(end, self.tz))
        else {
            return Vec::new();
        };

        let mut ticks = self.walk(*rule, &start_dt, &end_dt, TickKind::Regular);
        if !is_base {
            return ticks;
        }

        let mut extra = Vec::new();
        match (ticks.first(), ticks.last()) {
            (Some(first), Some(last)) => {
                extra.extend(self.fill_intermediate(index, start, first.value));
                extra.extend(self.fill_intermediate(index, last.value, end));
            }
            _ => extra.extend(self.fill_intermediate(index, start, end)),
        }
        extra.push(Tick {
            value: start,
            label: rule.full_label(&start_dt),
            kind: TickKind::Boundary,
        });
        extra.push(Tick {
            value: end,
            label: rule.full_label(&end_dt),
            kind: TickKind::Boundary,
        });

        ticks.extend(extra);
        merge_ticks(ticks)
    }

    /// Ticks of the rule after `index`, strictly between `start` and `end`.
    pub fn fill_intermediate(&self, index: usize, start: f64, end: f64) -> Vec<Tick> {
        let Some(rule) = self.rules.get(index + 1) else {
            return Vec::new();
        };
        if !(end > start) {
            return Vec::new();
        }
        let (Some(start_dt), Some(end_dt)) = (to_zoned(start, self.tz), to_zoned(end, self.tz))
        else {
            return Vec::new();
        };
        self.walk(*rule, &start_dt, &end_dt, TickKind::Intermediate)
            .into_iter()
            .filter(|t| t.value > start)
            .collect()
    }

    fn walk(
        &self,
        rule: Granularity,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
        kind: TickKind,
    ) -> Vec<Tick> {
        let mut ticks: Vec<Tick> = Vec::new();
        let mut cursor = rule.anchor(start);
        while cursor < *end && ticks.len() < MAX_TICKS {
            if cursor >= *start {
                let value = to_seconds(&cursor);
                if ticks.last().map_or(true, |t| !same_instant(t.value, value)) {
                    ticks.push(Tick {
                        value,
                        label: rule.label(&cursor, kind == TickKind::Intermediate),
                        kind,
                    });
                }
            }
            match rule.step(&cursor) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        ticks
    }
}

fn same_instant(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// Sorts by time and keeps one tick per instant, preferring boundaries over
/// regular ticks over intermediate ones.
pub(crate) fn merge_ticks(mut ticks: Vec<Tick>) -> Vec<Tick> {
    ticks.sort_by(|a, b| {
        a.value
            .total_cmp(&b.value)
            .then_with(|| a.kind.priority().cmp(&b.kind.priority()))
    });
    let mut merged: Vec<Tick> = Vec::with_capacity(ticks.len());
    for tick in ticks {
        match merged.last() {
            Some(last) if same_instant(last.value, tick.value) => {}
            _ => merged.push(tick),
        }
    }
    merged
}
