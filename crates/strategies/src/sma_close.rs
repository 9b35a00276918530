// In crates/strategies/src/sma_close.rs

use crate::Strategy;
use crate::types::SmaCloseSettings;
use chrono::NaiveDate;
use core_types::{Decision, Fill, OrderHandle, OrderNotification, OrderOutcome, Step, TradeRecord};
use rust_decimal::Decimal;

/// The stateful struct for the SMA close-crossover strategy.
///
/// The rule is deliberately simple: buy when flat and the close is strictly
/// above its moving average, sell when holding and the close is strictly
/// below it. Equality triggers nothing on either side. At most one order is
/// in flight at a time; while `pending` is set every bar is a Hold.
#[derive(Debug)]
pub struct SmaClose {
    settings: SmaCloseSettings,
    /// The order submitted but not yet resolved, if any.
    pending: Option<OrderHandle>,
    /// Execution price of the most recent completed buy.
    last_buy_price: Option<Decimal>,
    /// Commission paid on the most recent completed buy.
    last_buy_commission: Option<Decimal>,
}

impl SmaClose {
    /// Creates a new `SmaClose` strategy instance from its settings.
    pub fn new(settings: SmaCloseSettings) -> Self {
        Self {
            settings,
            pending: None,
            last_buy_price: None,
            last_buy_commission: None,
        }
    }

    pub fn settings(&self) -> &SmaCloseSettings {
        &self.settings
    }

    pub fn pending(&self) -> Option<OrderHandle> {
        self.pending
    }

    pub fn last_buy_price(&self) -> Option<Decimal> {
        self.last_buy_price
    }

    pub fn last_buy_commission(&self) -> Option<Decimal> {
        self.last_buy_commission
    }

    /// Logging helper; `force` bypasses the verbosity toggle.
    fn log(&self, date: Option<NaiveDate>, txt: &str, force: bool) {
        if self.settings.verbose_logging || force {
            match date {
                Some(date) => tracing::info!(strategy = self.name(), "{}, {}", date, txt),
                None => tracing::info!(strategy = self.name(), "{}", txt),
            }
        }
    }
}

fn fill_line(verb: &str, fill: &Fill) -> String {
    format!(
        "{} EXECUTED, Price: {:.2}, Cost: {:.2}, Comm {:.2}",
        verb, fill.price, fill.cost, fill.commission
    )
}

fn trade_line(trade: &TradeRecord) -> String {
    format!(
        "OPERATION PROFIT, GROSS, {:.2}, NET, {:.2}",
        trade.pnl, trade.pnl_comm
    )
}

impl Strategy for SmaClose {
    fn name(&self) -> &'static str {
        "SmaClose"
    }

    fn on_bar(&mut self, step: &Step, is_holding: bool) -> Decision {
        // Log the closing price of the bar under evaluation.
        self.log(Some(step.date), &format!("Close, {:.2}", step.close), false);

        // An order is still in flight; we cannot send a second one.
        if self.pending.is_some() {
            return Decision::Hold;
        }

        if !is_holding {
            // Not in the market yet; enter if the close broke above the average.
            if step.close > step.average {
                self.log(Some(step.date), &format!("BUY CREATE, {:.2}", step.close), false);
                return Decision::Buy;
            }
        } else if step.close < step.average {
            self.log(Some(step.date), &format!("SELL CREATE, {:.2}", step.close), false);
            return Decision::Sell;
        }

        Decision::Hold
    }

    fn order_submitted(&mut self, handle: OrderHandle) {
        self.pending = Some(handle);
    }

    fn notify_order(&mut self, notification: &OrderNotification) {
        match notification.outcome {
            // Order submitted/accepted by the broker - nothing to do yet.
            OrderOutcome::Submitted | OrderOutcome::Accepted => return,
            OrderOutcome::CompletedBuy(fill) => {
                self.log(None, &fill_line("BUY", &fill), false);
                self.last_buy_price = Some(fill.price);
                self.last_buy_commission = Some(fill.commission);
            }
            OrderOutcome::CompletedSell(fill) => {
                self.log(None, &fill_line("SELL", &fill), false);
            }
            OrderOutcome::Canceled | OrderOutcome::Margin | OrderOutcome::Rejected => {
                self.log(None, "Order Canceled/Margin/Rejected", false);
            }
        }

        // Write down: no pending order.
        self.pending = None;
    }

    fn notify_trade(&mut self, trade: &TradeRecord) {
        if !trade.closed {
            return;
        }

        self.log(None, &trade_line(trade), false);
    }

    fn on_stop(&mut self, final_value: Decimal) {
        self.log(
            None,
            &format!(
                "(MA Period {:2}) Ending Value {:.2}",
                self.settings.average_window, final_value
            ),
            true,
        );
    }
}
