//! Seeded synthetic workload generation for the benchmark driver.

use orderbook::{Order, OrderId, Side, TickBand, Trade, TradeSink};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;

/// Tracks which ids are believed to be resting client-side, reconciled
/// periodically against the engine via `StatsSink`'s closed-id drain so
/// it never drifts from what the engine actually holds.
#[derive(Default)]
pub struct LiveSetTracker {
    live: HashSet<u64>,
}

impl LiveSetTracker {
    pub fn insert(&mut self, id: u64) {
        self.live.insert(id);
    }

    pub fn remove(&mut self, id: u64) {
        self.live.remove(&id);
    }

    pub fn reconcile_closed(&mut self, closed: &[OrderId]) {
        for id in closed {
            self.live.remove(&id.0);
        }
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn sample_existing(&self, rng: &mut StdRng) -> Option<u64> {
        if self.live.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.live.len());
        self.live.iter().nth(idx).copied()
    }
}

/// Trade sink for the driver: accumulates aggregate counters instead of
/// buffering every `Trade`, since a run can produce millions of fills.
#[derive(Default)]
pub struct StatsSink {
    pub trade_count: u64,
    pub filled_qty: i64,
    closed_ids: Vec<OrderId>,
}

impl StatsSink {
    pub fn drain_closed(&mut self) -> Vec<OrderId> {
        std::mem::take(&mut self.closed_ids)
    }
}

impl TradeSink for StatsSink {
    fn on_trade(&mut self, trade: Trade) {
        self.trade_count += 1;
        self.filled_qty += trade.qty;
    }

    fn on_order_closed(&mut self, id: OrderId) {
        self.closed_ids.push(id);
    }
}

/// Picks an order side and price around a mid-price, biasing price choice
/// so that roughly `cross_pct` percent of submits land marketable against
/// the opposite side of the book.
pub fn gen_price(rng: &mut StdRng, band: TickBand, side: Side, cross_pct: u8) -> i32 {
    let mid = (band.min_tick + band.max_tick) / 2;
    let half_spread = ((band.max_tick - band.min_tick) / 4).max(1);
    let marketable = rng.gen_range(0..100) < cross_pct;
    let offset = rng.gen_range(0..=half_spread);
    let raw = match (side, marketable) {
        (Side::Buy, true) => mid + offset,
        (Side::Buy, false) => mid - offset,
        (Side::Sell, true) => mid - offset,
        (Side::Sell, false) => mid + offset,
    };
    raw.clamp(band.min_tick, band.max_tick)
}

pub fn gen_qty(rng: &mut StdRng) -> i64 {
    rng.gen_range(1..=500)
}

pub fn gen_side(rng: &mut StdRng) -> Side {
    if rng.gen_bool(0.5) {
        Side::Buy
    } else {
        Side::Sell
    }
}

pub fn new_order(rng: &mut StdRng, id: u64, band: TickBand, cross_pct: u8) -> Order {
    let side = gen_side(rng);
    let price = gen_price(rng, band, side, cross_pct);
    let qty = gen_qty(rng);
    Order {
        id: OrderId(id),
        side,
        price,
        qty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const BAND: TickBand = TickBand {
        min_tick: 900,
        max_tick: 1100,
    };

    #[test]
    fn generated_prices_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = gen_price(&mut rng, BAND, Side::Buy, 50);
            assert!((BAND.min_tick..=BAND.max_tick).contains(&p));
        }
    }

    #[test]
    fn live_set_tracker_reconciles_closed_ids() {
        let mut tracker = LiveSetTracker::default();
        tracker.insert(1);
        tracker.insert(2);
        tracker.reconcile_closed(&[OrderId(1)]);
        assert_eq!(tracker.len(), 1);
        assert!(tracker.sample_existing(&mut StdRng::seed_from_u64(1)) == Some(2));
    }

    #[test]
    fn stats_sink_accumulates_without_buffering_trades() {
        let mut sink = StatsSink::default();
        sink.on_trade(Trade {
            qty: 5,
            price: 1000,
            taker_id: OrderId(1),
            maker_id: OrderId(2),
        });
        sink.on_order_closed(OrderId(2));
        assert_eq!(sink.trade_count, 1);
        assert_eq!(sink.filled_qty, 5);
        assert_eq!(sink.drain_closed(), vec![OrderId(2)]);
        assert!(sink.drain_closed().is_empty());
    }
}
