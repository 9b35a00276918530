// In crates/runner/src/feed.rs

use chrono::NaiveDate;
use core_types::{Bar, Error, Result, Step};
use num_traits::cast::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use ta::Next;
use ta::indicators::SimpleMovingAverage as Sma;

/// Keeps only the bars inside the optional `[from, to]` date range.
pub fn filter_range(bars: &[Bar], from: Option<NaiveDate>, to: Option<NaiveDate>) -> Vec<Bar> {
    bars.iter()
        .copied()
        .filter(|bar| from.is_none_or(|d| bar.date >= d))
        .filter(|bar| to.is_none_or(|d| bar.date <= d))
        .collect()
}

/// Annotates raw bars with their trailing simple moving average.
///
/// The average itself is not ours: it is delegated to the `ta` crate, the
/// same way the original setup delegated it to its framework. Bars inside
/// the warm-up window (the first `window - 1`) are consumed but produce no
/// step, so strategies only ever see a fully formed average.
#[derive(Debug, Clone, Copy)]
pub struct SmaFeed {
    window: u32,
}

impl SmaFeed {
    pub fn new(window: u32) -> Self {
        Self { window }
    }

    pub fn annotate(&self, bars: &[Bar]) -> Result<Vec<Step>> {
        let mut sma = Sma::new(self.window as usize).map_err(|_| Error::InvalidConfig {
            reason: format!("moving-average window must be at least 1, got {}", self.window),
        })?;

        let warmup = self.window as usize - 1;
        let mut steps = Vec::with_capacity(bars.len().saturating_sub(warmup));
        for (i, bar) in bars.iter().enumerate() {
            let close = bar.close.to_f64().ok_or_else(|| Error::InvalidConfig {
                reason: format!("close {} is not representable as f64", bar.close),
            })?;
            let average = sma.next(close);
            if i < warmup {
                continue;
            }
            steps.push(Step {
                date: bar.date,
                close: bar.close,
                average: Decimal::from_f64(average).unwrap_or_default(),
            });
        }

        Ok(steps)
    }
}
