//! Single-symbol, in-memory, price-time-priority limit order matching
//! engine.
//!
//! Five collaborating pieces, leaves first:
//! - [`node_pool`] — freelist-backed allocator handing out stable node
//!   handles.
//! - [`price_level`] — intrusive FIFO of nodes at one price tick.
//! - [`price_ladder`] — array-indexed price ladder per side plus a
//!   lazily-maintained best-price cursor.
//! - [`id_index`] — dense id → node-location lookup.
//! - [`engine`] — the orchestrator: `submit`/`cancel`/`replace`.
//!
//! Single-threaded, synchronous; no internal concurrency. A fresh
//! [`MatchingEngine`] instance is fully independent.

pub mod engine;
pub mod id_index;
pub mod node_pool;
pub mod price_ladder;
pub mod price_level;
pub mod types;

pub use engine::MatchingEngine;
pub use price_ladder::TickBand;
pub use types::{
    AddResult, NullSink, Order, OrderId, RecordingSink, RejectReason, ReplaceResult, Side, Trade,
    TradeSink,
};
