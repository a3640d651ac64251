//! Wire-level types shared by the engine and its callers.

use serde::{Deserialize, Serialize};

/// Which side of the book an order sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Unique order identifier, stable across the engine's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

/// An incoming order to submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: i32,
    pub qty: i64,
}

/// One execution, carrying the maker's resting price (trades always print
/// at the maker's price, never the taker's).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub qty: i64,
    pub price: i32,
    pub taker_id: OrderId,
    pub maker_id: OrderId,
}

/// Why an operation produced no mutation. Carried for diagnostics only —
/// the engine never treats this as a thrown error, only an in-band result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum RejectReason {
    #[error("quantity must be positive, got {0}")]
    NonPositiveQty(i64),
    #[error("price {price} outside tick band [{min}, {max}]")]
    PriceOutOfBand { price: i32, min: i32, max: i32 },
    #[error("order id {0:?} is already resting")]
    DuplicateId(OrderId),
    #[error("order id {0:?} is not currently resting")]
    NotResting(OrderId),
}

/// Outcome of a `submit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddResult {
    /// The incoming order fully filled with no remainder.
    FullyMatched,
    /// No fills occurred; the whole order now rests in the book.
    FullyRested,
    /// Some fills occurred and a remainder now rests in the book.
    PartiallyRested,
    /// The order was rejected; no mutation occurred.
    Rejected(RejectReason),
}

/// Outcome of a `replace`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceResult {
    pub success: bool,
    pub add_result: AddResult,
}

impl ReplaceResult {
    /// `true` if the replace succeeded and left a resting remainder.
    pub fn rested(&self) -> bool {
        self.success
            && matches!(
                self.add_result,
                AddResult::FullyRested | AddResult::PartiallyRested
            )
    }

    /// The id wasn't resting, so no submit was attempted. Per spec.md §9,
    /// implementers must not silently recover by submitting the new order
    /// when the id was absent.
    pub(crate) fn not_found(id: OrderId) -> Self {
        Self {
            success: false,
            add_result: AddResult::Rejected(RejectReason::NotResting(id)),
        }
    }
}

/// The engine's sole observable side channel: trade executions and ids
/// that just fully closed out as a maker.
///
/// The engine never owns a sink (spec.md §9): it is passed as a per-call
/// generic parameter, so the engine stays decoupled from sink lifetime and
/// storage. Implementations must not re-enter the engine from inside
/// these calls.
pub trait TradeSink {
    fn on_trade(&mut self, trade: Trade);
    fn on_order_closed(&mut self, id: OrderId);
}

/// A [`TradeSink`] that records everything for later inspection — the form
/// tests and the benchmark driver use.
#[derive(Default, Debug)]
pub struct RecordingSink {
    pub trades: Vec<Trade>,
    pub closed_order_ids: Vec<OrderId>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns the ids closed since the last call, mirroring the
    /// client-facing `closedOrderIds` protocol of spec.md §6.
    pub fn take_closed(&mut self) -> Vec<OrderId> {
        std::mem::take(&mut self.closed_order_ids)
    }
}

impl TradeSink for RecordingSink {
    fn on_trade(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    fn on_order_closed(&mut self, id: OrderId) {
        self.closed_order_ids.push(id);
    }
}

/// A [`TradeSink`] that discards everything — for pure-throughput profiling
/// where the cost of recording would dominate the measurement.
#[derive(Default)]
pub struct NullSink;

impl TradeSink for NullSink {
    fn on_trade(&mut self, _trade: Trade) {}
    fn on_order_closed(&mut self, _id: OrderId) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_carries_maker_price() {
        let t = Trade {
            qty: 5,
            price: 1000,
            taker_id: OrderId(10),
            maker_id: OrderId(1),
        };
        assert_eq!(t.price, 1000);
        assert_eq!(t.qty, 5);
    }

    #[test]
    fn replace_result_rested_requires_success() {
        let rejected = ReplaceResult {
            success: true,
            add_result: AddResult::Rejected(RejectReason::NonPositiveQty(0)),
        };
        assert!(!rejected.rested());

        let fully_rested = ReplaceResult {
            success: true,
            add_result: AddResult::FullyRested,
        };
        assert!(fully_rested.rested());

        let not_found = ReplaceResult::not_found(OrderId(1));
        assert!(!not_found.success);
        assert!(!not_found.rested());
    }
}
