// In crates/broker/src/sim.rs

use crate::Broker;
use core_types::{Fill, OrderHandle, OrderNotification, OrderOutcome, Side, TradeRecord};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// An open long position held by the simulated broker.
#[derive(Debug, Clone, Copy)]
struct Lot {
    entry_price: Decimal,
    quantity: Decimal,
    entry_commission: Decimal,
}

/// A deterministic stand-in for the external simulation framework's broker.
///
/// It is intentionally naive: one symbol, long-only, fixed stake, market
/// orders filled at the close of the bar after submission, commission as a
/// flat rate on notional value. It exists so the session driver, the entry
/// point, and the integration tests have an engine surface to run against.
#[derive(Debug)]
pub struct SimBroker {
    cash: Decimal,
    commission_rate: Decimal,
    stake: Decimal,
    last_close: Option<Decimal>,
    position: Option<Lot>,
    queued: VecDeque<(OrderHandle, Side)>,
    notifications: Vec<OrderNotification>,
    trades: Vec<TradeRecord>,
    next_id: u64,
}

impl SimBroker {
    /// Creates a broker trading a fixed number of units per order.
    pub fn new(stake: u32) -> Self {
        Self {
            cash: Decimal::ZERO,
            commission_rate: Decimal::ZERO,
            stake: Decimal::from(stake),
            last_close: None,
            position: None,
            queued: VecDeque::new(),
            notifications: Vec::new(),
            trades: Vec::new(),
            next_id: 0,
        }
    }

    fn submit(&mut self, side: Side) -> OrderHandle {
        self.next_id += 1;
        let handle = OrderHandle(self.next_id);
        self.queued.push_back((handle, side));
        self.notifications.push(OrderNotification {
            handle,
            outcome: OrderOutcome::Submitted,
        });
        self.notifications.push(OrderNotification {
            handle,
            outcome: OrderOutcome::Accepted,
        });
        handle
    }

    fn resolve(&mut self, handle: OrderHandle, side: Side, close: Decimal) {
        let outcome = match side {
            Side::Buy => self.fill_buy(close),
            Side::Sell => self.fill_sell(close),
        };
        self.notifications.push(OrderNotification { handle, outcome });
    }

    fn fill_buy(&mut self, close: Decimal) -> OrderOutcome {
        if self.position.is_some() {
            // Long-only book: a second entry order has nothing to act on.
            return OrderOutcome::Rejected;
        }

        let cost = close * self.stake;
        let commission = cost * self.commission_rate;
        if self.cash < cost + commission {
            tracing::warn!(cash = %self.cash, cost = %cost, "Margin: not enough cash for entry");
            return OrderOutcome::Margin;
        }

        self.cash -= cost + commission;
        self.position = Some(Lot {
            entry_price: close,
            quantity: self.stake,
            entry_commission: commission,
        });
        OrderOutcome::CompletedBuy(Fill {
            price: close,
            cost,
            commission,
        })
    }

    fn fill_sell(&mut self, close: Decimal) -> OrderOutcome {
        let Some(lot) = self.position.take() else {
            return OrderOutcome::Rejected;
        };

        let proceeds = close * lot.quantity;
        let commission = proceeds * self.commission_rate;
        self.cash += proceeds - commission;

        let pnl = (close - lot.entry_price) * lot.quantity;
        self.trades.push(TradeRecord {
            closed: true,
            pnl,
            pnl_comm: pnl - lot.entry_commission - commission,
        });

        OrderOutcome::CompletedSell(Fill {
            price: close,
            cost: proceeds,
            commission,
        })
    }
}

impl Broker for SimBroker {
    fn name(&self) -> &'static str {
        "SimBroker"
    }

    fn set_cash(&mut self, amount: Decimal) {
        self.cash = amount;
    }

    fn set_commission(&mut self, rate: f64) {
        self.commission_rate = Decimal::from_f64(rate).unwrap_or_default();
    }

    fn advance(&mut self, close: Decimal) {
        self.last_close = Some(close);
        while let Some((handle, side)) = self.queued.pop_front() {
            self.resolve(handle, side, close);
        }
    }

    fn submit_buy(&mut self) -> OrderHandle {
        self.submit(Side::Buy)
    }

    fn submit_sell(&mut self) -> OrderHandle {
        self.submit(Side::Sell)
    }

    fn is_holding(&self) -> bool {
        self.position.is_some()
    }

    fn value(&self) -> Decimal {
        match (&self.position, self.last_close) {
            (Some(lot), Some(close)) => self.cash + lot.quantity * close,
            (Some(lot), None) => self.cash + lot.quantity * lot.entry_price,
            (None, _) => self.cash,
        }
    }

    fn drain_notifications(&mut self) -> Vec<OrderNotification> {
        std::mem::take(&mut self.notifications)
    }

    fn drain_trades(&mut self) -> Vec<TradeRecord> {
        std::mem::take(&mut self.trades)
    }
}
