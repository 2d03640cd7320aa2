use std::collections::BTreeMap;

use chrono::{Datelike as _, NaiveDate, Timelike as _};
use model::decimal::Decimal;
use model::period::Window;
use model::reports::{DayPoint, HourBucket, MonthPoint, Season, SeasonBucket};
use model::transaction::Transaction;

/// Chart bucketizers. Output ordering is part of the contract: charts are
/// rendered in sequence, so every series comes out sorted by bucket key.

/// Groups rows by local calendar date, ascending.
pub fn daily_series(rows: &[Transaction]) -> Vec<DayPoint> {
    let mut buckets: BTreeMap<NaiveDate, (Decimal, u64)> = BTreeMap::new();
    for tx in rows {
        let bucket = buckets.entry(tx.local_time().date_naive()).or_default();
        bucket.0 += tx.amount;
        bucket.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(date, (total, orders))| DayPoint {
            date,
            total,
            orders,
        })
        .collect()
}

/// One bucket per supplied window, zero-filled, in window order. With the
/// rolling 12-month windows this always yields exactly 12 points, oldest
/// first.
pub fn monthly_series(windows: &[Window], rows: &[Transaction]) -> Vec<MonthPoint> {
    windows
        .iter()
        .map(|window| {
            let mut total = Decimal::zero();
            let mut orders = 0;
            for tx in rows {
                if window.contains(tx.local_time()) {
                    total += tx.amount;
                    orders += 1;
                }
            }
            MonthPoint {
                month: window.from.date_naive(),
                total,
                orders,
            }
        })
        .collect()
}

pub const HOUR_RANGES: [(u32, u32); 4] = [(10, 14), (14, 15), (15, 20), (20, 24)];

/// Counts rows per fixed time-of-day range on the local hour. Hours
/// outside [10, 24) fall into no bucket and are not counted anywhere;
/// inherited reporting behavior, pending product clarification.
pub fn hour_buckets(rows: &[Transaction]) -> Vec<HourBucket> {
    HOUR_RANGES
        .iter()
        .map(|&(from_hour, to_hour)| {
            let orders = rows
                .iter()
                .filter(|tx| {
                    let hour = tx.local_time().hour();
                    from_hour <= hour && hour < to_hour
                })
                .count() as u64;
            HourBucket {
                from_hour,
                to_hour,
                orders,
            }
        })
        .collect()
}

pub fn season_of(month0: u32) -> Season {
    match month0 {
        11 | 0 | 1 => Season::Winter,
        2..=4 => Season::Spring,
        5..=7 => Season::Summer,
        _ => Season::Autumn,
    }
}

const SEASONS: [Season; 4] = [
    Season::Winter,
    Season::Spring,
    Season::Summer,
    Season::Autumn,
];

/// Per-season counts for one calendar year. The four buckets partition
/// that year's rows: every month maps to exactly one season.
pub fn season_buckets(rows: &[Transaction], year: i32) -> Vec<SeasonBucket> {
    let mut counts = [0u64; 4];
    for tx in rows {
        let local = tx.local_time();
        if local.year() != year {
            continue;
        }
        let season = season_of(local.month0());
        let index = SEASONS.iter().position(|s| *s == season).unwrap_or(0);
        counts[index] += 1;
    }
    SEASONS
        .iter()
        .zip(counts)
        .map(|(&season, orders)| SeasonBucket { season, orders })
        .collect()
}
