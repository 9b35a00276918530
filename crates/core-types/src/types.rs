// In crates/core-types/src/types.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single historical price observation: one date, one closing price.
///
/// The feed collaborator owns where these come from; by the time a `Bar`
/// reaches this workspace it is assumed well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// One engine time step as seen by a strategy: the current close together
/// with the externally precomputed moving-average value for the same bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub date: NaiveDate,
    pub close: Decimal,
    pub average: Decimal,
}

/// The direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

/// What a strategy wants done on a given time step. The caller (the session
/// driver) is responsible for actually submitting the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

/// Opaque identifier for an order submitted to the engine.
///
/// A strategy holds at most one of these at a time: its pending-order slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderHandle(pub u64);

/// Execution details attached to a completed order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    /// The price the order executed at.
    pub price: Decimal,
    /// The notional value of the execution (price * quantity).
    pub cost: Decimal,
    /// The commission charged by the broker for this execution.
    pub commission: Decimal,
}

/// The fixed set of order lifecycle outcomes reported by the engine.
///
/// An order is resolved exactly once, by exactly one of the terminal
/// variants; `Submitted` and `Accepted` are intermediate and carry no data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderOutcome {
    Submitted,
    Accepted,
    CompletedBuy(Fill),
    CompletedSell(Fill),
    Canceled,
    Margin,
    Rejected,
}

impl OrderOutcome {
    /// Whether this outcome resolves the order (as opposed to an
    /// intermediate in-flight status).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderOutcome::Submitted | OrderOutcome::Accepted)
    }
}

/// A single order lifecycle transition, delivered to the strategy that
/// submitted the order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderNotification {
    pub handle: OrderHandle,
    pub outcome: OrderOutcome,
}

/// Emitted by the engine when a round-trip position closes.
///
/// Read-only to strategies; used for reporting only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeRecord {
    /// False while the trade is still open; strategies ignore those.
    pub closed: bool,
    /// Gross profit and loss for the round trip.
    pub pnl: Decimal,
    /// Profit and loss net of entry and exit commissions.
    pub pnl_comm: Decimal,
}
