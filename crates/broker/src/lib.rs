// In crates/broker/src/lib.rs

use core_types::{OrderHandle, OrderNotification, TradeRecord};
use rust_decimal::Decimal;

pub mod sim;

// Re-export the simulated implementation.
pub use sim::SimBroker;

/// The engine services a strategy run consumes.
///
/// This is the surface of the external simulation framework as seen from
/// this workspace: order submission, position and value queries, and the
/// cash/commission knobs the entry point turns before a run.
///
/// Submission is fire-and-forget: it always returns a handle, and any
/// failure (margin, broker rejection) arrives later as an
/// `OrderNotification`, never as an error. The driver polls the two
/// `drain_*` queues once per time step and forwards their contents to the
/// strategy before asking it for a new decision.
pub trait Broker {
    /// The name of the broker backend.
    fn name(&self) -> &'static str;

    /// Sets the starting cash balance.
    fn set_cash(&mut self, amount: Decimal);

    /// Sets the per-trade commission rate (e.g. 0.002 for 0.2%).
    fn set_commission(&mut self, rate: f64);

    /// Advances the broker clock to a bar with the given close. Orders
    /// submitted on the previous bar resolve here.
    fn advance(&mut self, close: Decimal);

    fn submit_buy(&mut self) -> OrderHandle;

    fn submit_sell(&mut self) -> OrderHandle;

    /// Whether a position is currently open.
    fn is_holding(&self) -> bool;

    /// Current portfolio value: cash plus any open position marked at the
    /// latest close.
    fn value(&self) -> Decimal;

    /// Order lifecycle transitions accumulated since the last drain.
    fn drain_notifications(&mut self) -> Vec<OrderNotification>;

    /// Round-trip trade records accumulated since the last drain.
    fn drain_trades(&mut self) -> Vec<TradeRecord>;
}
