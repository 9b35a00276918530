// In crates/strategies/src/lib.rs

use core_types::{Decision, OrderHandle, OrderNotification, Step, TradeRecord};
use rust_decimal::Decimal;

pub mod sma_close;
pub mod types;

/// The callback surface the simulation engine drives a strategy through.
///
/// A strategy is a stateful entity: it is created once per run and the
/// engine calls back into it, strictly sequentially, one time step at a
/// time. It never calls the engine directly — its `on_bar` answer is a
/// `Decision`, and the driver owns turning that into an order submission.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// Evaluate one time step and decide whether to trade.
    fn on_bar(&mut self, step: &Step, is_holding: bool) -> Decision;

    /// The driver's half of the pending-order contract: called with the
    /// handle of the order it just submitted on this strategy's behalf.
    fn order_submitted(&mut self, handle: OrderHandle);

    /// An order lifecycle transition reported by the engine.
    fn notify_order(&mut self, notification: &OrderNotification);

    /// A round-trip trade record reported by the engine.
    fn notify_trade(&mut self, trade: &TradeRecord);

    /// The run is over; `final_value` is the closing portfolio value.
    fn on_stop(&mut self, final_value: Decimal);
}
