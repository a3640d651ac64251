//! The matching engine: the orchestrator that ties the node pool, price
//! levels, price ladders and id index together behind `submit`/`cancel`/
//! `replace`.
//!
//! Single-threaded, synchronous, no internal concurrency: every operation
//! runs to completion on the calling thread and none of it suspends,
//! yields, or can be interrupted mid-operation.

use crate::id_index::{IdIndex, OrderRef};
use crate::node_pool::NodePool;
use crate::price_ladder::{PriceLadder, TickBand};
use crate::types::{AddResult, Order, OrderId, RejectReason, ReplaceResult, Side, TradeSink};

/// A fresh engine instance is fully independent; there is no global state.
pub struct MatchingEngine {
    band: TickBand,
    pool: NodePool,
    bids: PriceLadder,
    asks: PriceLadder,
    index: IdIndex,
}

impl MatchingEngine {
    /// `expected_orders` pre-reserves pool capacity; `max_order_id` sizes
    /// the dense id index. Neither is a hard cap — the pool grows and the
    /// index resizes on demand if exceeded.
    pub fn new(expected_orders: usize, max_order_id: usize, band: TickBand) -> Self {
        Self {
            band,
            pool: NodePool::with_capacity(expected_orders),
            bids: PriceLadder::new(Side::Buy, band),
            asks: PriceLadder::new(Side::Sell, band),
            index: IdIndex::with_capacity(max_order_id),
        }
    }

    #[inline]
    pub fn best_bid(&self) -> Option<i32> {
        self.bids.best_price()
    }

    #[inline]
    pub fn best_ask(&self) -> Option<i32> {
        self.asks.best_price()
    }

    /// Count of currently-resting ids — equal to the id index size.
    #[inline]
    pub fn live_orders(&self) -> usize {
        self.index.len()
    }

    /// Checks the quantified invariants of spec.md §8 against the current
    /// book state. `Ok(())` if every invariant holds; otherwise a message
    /// naming the first one that doesn't. O(n) in the number of resting
    /// orders — a verification tool for tests and fuzzing, not a hot path.
    pub fn check_invariants(&self) -> Result<(), String> {
        for (name, ladder) in [("bids", &self.bids), ("asks", &self.asks)] {
            for level in ladder.levels() {
                let cached = level.total_qty();
                let recomputed = level.recompute_total_qty(&self.pool);
                if cached != recomputed {
                    return Err(format!(
                        "{name} level totalQuantity {cached} != recomputed {recomputed}"
                    ));
                }
                if cached < 0 {
                    return Err(format!("{name} level totalQuantity {cached} is negative"));
                }
            }
            if !ladder.best_matches_scan() {
                return Err(format!("{name} best cursor disagrees with a full scan"));
            }
        }

        let indexed: usize = [&self.bids, &self.asks]
            .iter()
            .flat_map(|l| l.levels().iter())
            .map(|level| level.node_count(&self.pool))
            .sum();
        if indexed != self.index.len() {
            return Err(format!(
                "id index has {} entries but {indexed} nodes are resting",
                self.index.len()
            ));
        }

        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            if bid >= ask {
                return Err(format!("resting bid {bid} crosses resting ask {ask}"));
            }
        }

        Ok(())
    }

    /// Submits an order. Walks the opposite ladder from its best cursor
    /// while marketable, filling FIFO within each level; any remainder
    /// rests at the tail of its own-side level.
    pub fn submit<S: TradeSink>(&mut self, order: Order, sink: &mut S) -> AddResult {
        if order.qty <= 0 {
            return AddResult::Rejected(RejectReason::NonPositiveQty(order.qty));
        }
        if !self.band.contains(order.price) {
            return AddResult::Rejected(RejectReason::PriceOutOfBand {
                price: order.price,
                min: self.band.min_tick,
                max: self.band.max_tick,
            });
        }
        if self.index.contains(order.id) {
            return AddResult::Rejected(RejectReason::DuplicateId(order.id));
        }

        tracing::trace!(
            id = order.id.0,
            side = ?order.side,
            price = order.price,
            qty = order.qty,
            "submit"
        );

        let mut remaining = order.qty;
        let mut filled_any = false;

        // Split self into disjoint field borrows: the opposite ladder is
        // walked for crossing, the own-side ladder only touched for the
        // remainder at the very end.
        let MatchingEngine {
            pool,
            bids,
            asks,
            index,
            ..
        } = self;
        let (opp_ladder, own_ladder) = match order.side {
            Side::Buy => (asks, bids),
            Side::Sell => (bids, asks),
        };

        while remaining > 0 && opp_ladder.is_marketable_against(order.side, order.price) {
            let opp_price = opp_ladder
                .best_price()
                .expect("marketable implies a best price exists");
            let level = opp_ladder.level_mut(opp_price);
            let maker_handle = level
                .peek_front()
                .expect("non-empty level has a front node");
            let maker_id = pool.get(maker_handle).id;
            let maker_qty = pool.get(maker_handle).qty;

            let fill = remaining.min(maker_qty);
            remaining -= fill;
            pool.get_mut(maker_handle).qty -= fill;
            level.reduce_total(fill);
            filled_any = true;

            sink.on_trade(crate::types::Trade {
                qty: fill,
                price: opp_price,
                taker_id: order.id,
                maker_id,
            });

            if pool.get(maker_handle).qty == 0 {
                level.pop_front(pool);
                index.remove(maker_id);
                pool.free(maker_handle);
                sink.on_order_closed(maker_id);
                opp_ladder.on_level_possibly_emptied(opp_price, pool);
            }
        }

        if remaining > 0 {
            let handle = pool.alloc(order.id, order.side, order.price, remaining);
            own_ladder.level_mut(order.price).push_back(handle, pool);
            index.insert(
                order.id,
                OrderRef {
                    side: order.side,
                    price: order.price,
                    node: handle,
                },
            );
            own_ladder.tighten_best_on_insert(order.price);
        }

        if !filled_any {
            AddResult::FullyRested
        } else if remaining == 0 {
            AddResult::FullyMatched
        } else {
            AddResult::PartiallyRested
        }
    }

    /// Cancels a resting order. Returns `false` (no mutation) if `id` isn't
    /// currently resting.
    pub fn cancel(&mut self, id: OrderId) -> bool {
        let Some(r) = self.index.remove(id) else {
            return false;
        };
        tracing::trace!(id = id.0, "cancel");
        let MatchingEngine {
            pool, bids, asks, ..
        } = self;
        let ladder = match r.side {
            Side::Buy => bids,
            Side::Sell => asks,
        };
        let level = ladder.level_mut(r.price);
        level.erase(r.node, pool);
        pool.free(r.node);
        ladder.on_level_possibly_emptied(r.price, pool);
        true
    }

    /// Semantically `cancel(id)` followed by `submit` of the replacement at
    /// the old side with the new price/qty — side can never change via
    /// replace. If the cancel fails (id missing) no submit is attempted and
    /// no trades are emitted, per spec.md §9: a failed lookup must not be
    /// silently recovered by submitting anyway.
    pub fn replace<S: TradeSink>(
        &mut self,
        id: OrderId,
        new_price: i32,
        new_qty: i64,
        sink: &mut S,
    ) -> ReplaceResult {
        let Some(r) = self.index.lookup(id) else {
            return ReplaceResult::not_found(id);
        };
        let old_side = r.side;

        let removed = self.cancel(id);
        debug_assert!(removed, "index and ladder disagreed about id presence");

        let add_result = self.submit(
            Order {
                id,
                side: old_side,
                price: new_price,
                qty: new_qty,
            },
            sink,
        );
        ReplaceResult {
            success: true,
            add_result,
        }
    }
}
