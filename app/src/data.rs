// In app/src/data.rs

use chrono::{Duration, NaiveDate};
use core_types::Bar;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A small embedded daily close series for demo runs.
///
/// Price-history files and their formats belong to an external feed
/// collaborator, so the binary ships its own deterministic series instead
/// of parsing one: a drift lower through the moving-average warm-up, a
/// rally, a sell-off, and a second rally into the end of the run.
const DEMO_CLOSES: [Decimal; 66] = [
    dec!(100.00),
    dec!(99.60),
    dec!(99.85),
    dec!(99.30),
    dec!(99.45),
    dec!(98.90),
    dec!(99.10),
    dec!(98.55),
    dec!(98.70),
    dec!(98.20),
    dec!(98.40),
    dec!(97.85),
    dec!(98.05),
    dec!(97.60),
    dec!(97.75),
    dec!(97.20),
    dec!(97.35),
    dec!(96.90),
    dec!(97.05),
    dec!(96.60),
    dec!(96.75),
    dec!(97.40),
    dec!(98.10),
    dec!(98.90),
    dec!(99.70),
    dec!(100.60),
    dec!(101.40),
    dec!(102.20),
    dec!(103.10),
    dec!(103.90),
    dec!(104.60),
    dec!(105.30),
    dec!(105.10),
    dec!(105.80),
    dec!(106.40),
    dec!(106.10),
    dec!(106.70),
    dec!(107.20),
    dec!(106.90),
    dec!(107.40),
    dec!(106.80),
    dec!(105.90),
    dec!(104.70),
    dec!(103.40),
    dec!(102.10),
    dec!(100.80),
    dec!(99.60),
    dec!(98.40),
    dec!(97.30),
    dec!(96.40),
    dec!(95.70),
    dec!(95.20),
    dec!(94.90),
    dec!(95.40),
    dec!(96.20),
    dec!(97.10),
    dec!(98.20),
    dec!(99.30),
    dec!(100.40),
    dec!(101.50),
    dec!(102.40),
    dec!(103.20),
    dec!(103.80),
    dec!(104.30),
    dec!(104.70),
    dec!(105.00),
];

/// The embedded series as dated bars, one per calendar day from 2019-06-03.
pub fn demo_bars() -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(2019, 6, 3).unwrap_or_default();
    DEMO_CLOSES
        .iter()
        .enumerate()
        .map(|(i, close)| Bar {
            date: start + Duration::days(i as i64),
            close: *close,
        })
        .collect()
}
