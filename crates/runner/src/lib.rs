// In crates/runner/src/lib.rs

pub mod feed;

use broker::Broker;
use chrono::NaiveDate;
use core_types::{Decision, Error, Result, Step};
use rust_decimal::Decimal;
use strategies::Strategy;
use tracing::info;

/// The knobs the entry point turns before a run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Starting cash balance handed to the broker.
    pub starting_cash: Decimal,
    /// Per-trade commission rate charged by the broker.
    pub commission_rate: f64,
    /// Fixed number of units per order.
    pub stake: u32,
    /// Drop bars dated before this.
    pub from_date: Option<NaiveDate>,
    /// Drop bars dated after this.
    pub to_date: Option<NaiveDate>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            starting_cash: Decimal::from(100_000),
            commission_rate: 0.002,
            stake: 10,
            from_date: None,
            to_date: None,
        }
    }
}

/// What a finished run reports back to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub starting_value: Decimal,
    pub final_value: Decimal,
    pub steps: usize,
}

/// Drives one strategy against one broker over a prepared feed.
///
/// This is the glue the original runner script provided: it owns nothing
/// clever, it only sequences the per-step protocol. Each step is fully
/// processed before the next begins, on a single thread:
///
/// 1. advance the broker clock (orders from the prior step resolve here),
/// 2. deliver order notifications, then trade records, to the strategy,
/// 3. ask the strategy for a decision on the current step,
/// 4. submit the resulting order, if any, and hand the handle back to the
///    strategy so it can track it as pending.
pub struct Session {
    config: RunConfig,
    strategy: Box<dyn Strategy>,
    broker: Box<dyn Broker>,
}

impl Session {
    pub fn new(config: RunConfig, strategy: Box<dyn Strategy>, broker: Box<dyn Broker>) -> Self {
        Self {
            config,
            strategy,
            broker,
        }
    }

    pub fn run(&mut self, steps: &[Step]) -> Result<RunSummary> {
        if steps.is_empty() {
            return Err(Error::EmptyFeed);
        }

        self.broker.set_cash(self.config.starting_cash);
        self.broker.set_commission(self.config.commission_rate);

        let starting_value = self.broker.value();
        info!(
            strategy = self.strategy.name(),
            broker = self.broker.name(),
            "Starting Portfolio Value: {:.2}",
            starting_value
        );

        for step in steps {
            self.broker.advance(step.close);

            for notification in self.broker.drain_notifications() {
                self.strategy.notify_order(&notification);
            }
            for trade in self.broker.drain_trades() {
                self.strategy.notify_trade(&trade);
            }

            match self.strategy.on_bar(step, self.broker.is_holding()) {
                Decision::Buy => {
                    let handle = self.broker.submit_buy();
                    self.strategy.order_submitted(handle);
                }
                Decision::Sell => {
                    let handle = self.broker.submit_sell();
                    self.strategy.order_submitted(handle);
                }
                Decision::Hold => {}
            }
        }

        let final_value = self.broker.value();
        self.strategy.on_stop(final_value);
        info!("Final Portfolio Value: {:.2}", final_value);

        Ok(RunSummary {
            starting_value,
            final_value,
            steps: steps.len(),
        })
    }
}
