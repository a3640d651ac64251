//! Array-indexed price ladder: one fixed-size array of price levels per
//! side, plus a lazily-maintained best-price cursor.
//!
//! The valid tick band is small and dense, so direct indexing beats a
//! tree-based price map: no pointer chasing, no allocation per new price.

use crate::node_pool::NodePool;
use crate::price_level::PriceLevel;
use crate::types::Side;

/// Inclusive tick band `[min, max]` a ladder is built over.
#[derive(Clone, Copy, Debug)]
pub struct TickBand {
    pub min_tick: i32,
    pub max_tick: i32,
}

impl TickBand {
    pub fn new(min_tick: i32, max_tick: i32) -> Self {
        assert!(min_tick <= max_tick, "empty tick band");
        Self { min_tick, max_tick }
    }

    #[inline]
    pub fn contains(&self, tick: i32) -> bool {
        tick >= self.min_tick && tick <= self.max_tick
    }

    #[inline]
    pub fn num_levels(&self) -> usize {
        (self.max_tick - self.min_tick + 1) as usize
    }

    #[inline]
    fn index_of(&self, tick: i32) -> usize {
        (tick - self.min_tick) as usize
    }

    #[inline]
    fn tick_of(&self, index: usize) -> i32 {
        self.min_tick + index as i32
    }
}

/// One side (bids or asks) of the book: a dense array of [`PriceLevel`]s
/// plus a best-price cursor.
///
/// `best_idx` for bids is the largest index of a non-empty level, or `-1`
/// if none. For asks it is the smallest index of a non-empty level, or
/// `num_levels` if none. The cursor may lag conservatively after a level
/// empties but is re-tightened by `advance_best` before any crossing
/// decision relies on it.
pub struct PriceLadder {
    side: Side,
    band: TickBand,
    levels: Vec<PriceLevel>,
    best_idx: i64,
}

impl PriceLadder {
    pub fn new(side: Side, band: TickBand) -> Self {
        let levels = vec![PriceLevel::empty(); band.num_levels()];
        let best_idx = match side {
            Side::Buy => -1,
            Side::Sell => band.num_levels() as i64,
        };
        Self {
            side,
            band,
            levels,
            best_idx,
        }
    }

    #[inline]
    pub fn band(&self) -> TickBand {
        self.band
    }

    /// Total mapping over the valid band. Panics if `tick` is out of band;
    /// the engine gates this before calling.
    #[inline]
    pub fn level_mut(&mut self, tick: i32) -> &mut PriceLevel {
        &mut self.levels[self.band.index_of(tick)]
    }

    #[inline]
    pub fn level(&self, tick: i32) -> &PriceLevel {
        &self.levels[self.band.index_of(tick)]
    }

    /// Best resting price for this side, if any.
    pub fn best_price(&self) -> Option<i32> {
        let empty_sentinel = match self.side {
            Side::Buy => -1,
            Side::Sell => self.levels.len() as i64,
        };
        if self.best_idx == empty_sentinel {
            None
        } else {
            Some(self.band.tick_of(self.best_idx as usize))
        }
    }

    /// If `tick` strictly improves the cursor (or the side was empty),
    /// moves the cursor to it. Called right after inserting a resting
    /// order at `tick`.
    pub fn tighten_best_on_insert(&mut self, tick: i32) {
        let idx = self.band.index_of(tick) as i64;
        let improves = match self.side {
            Side::Buy => idx > self.best_idx,
            Side::Sell => idx < self.best_idx,
        };
        if improves {
            self.best_idx = idx;
        }
    }

    /// Walks the cursor away from its current extreme toward the interior
    /// until a non-empty level is found, or the cursor passes out of band
    /// (the side is empty). Called after the current best level empties.
    pub fn advance_best(&mut self) {
        let len = self.levels.len() as i64;
        match self.side {
            Side::Buy => {
                while self.best_idx >= 0 && self.levels[self.best_idx as usize].is_empty() {
                    self.best_idx -= 1;
                }
            }
            Side::Sell => {
                while self.best_idx < len && self.levels[self.best_idx as usize].is_empty() {
                    self.best_idx += 1;
                }
            }
        }
    }

    /// True if the best level for this side is marketable against
    /// `incoming_price` from the opposite side (buy crosses when
    /// `incoming_price >= best_ask`; sell crosses when
    /// `incoming_price <= best_bid`).
    pub fn is_marketable_against(&self, incoming_side: Side, incoming_price: i32) -> bool {
        match (incoming_side, self.best_price()) {
            (Side::Buy, Some(ask)) => incoming_price >= ask,
            (Side::Sell, Some(bid)) => incoming_price <= bid,
            _ => false,
        }
    }

    /// Removes `qty` worth of book volume at `tick` and, if the level just
    /// emptied and was the current best, advances the cursor. `pool` is
    /// needed only to decide emptiness, not to mutate nodes.
    pub fn on_level_possibly_emptied(&mut self, tick: i32, _pool: &NodePool) {
        let idx = self.band.index_of(tick) as i64;
        if idx == self.best_idx && self.levels[idx as usize].is_empty() {
            self.advance_best();
        }
    }

    /// All levels in band order — used only by invariant checks.
    pub fn levels(&self) -> &[PriceLevel] {
        &self.levels
    }

    /// Recomputes the best cursor from scratch by scanning every level, and
    /// reports whether it agrees with the cached cursor (spec.md §8
    /// invariant 2). O(n): test-only.
    pub fn best_matches_scan(&self) -> bool {
        let scanned = match self.side {
            Side::Buy => self
                .levels
                .iter()
                .rposition(|l| !l.is_empty())
                .map(|i| i as i64)
                .unwrap_or(-1),
            Side::Sell => self
                .levels
                .iter()
                .position(|l| !l.is_empty())
                .map(|i| i as i64)
                .unwrap_or(self.levels.len() as i64),
        };
        scanned == self.best_idx
    }
}
