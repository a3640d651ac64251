//! Matching engine profiling and walkthrough binary.
//!
//! Runs latency/throughput micro-benchmarks followed by a narrated
//! walkthrough of the engine's core scenarios: full cross, partial fill,
//! FIFO ordering, cancel, and replace.

use orderbook::{MatchingEngine, Order, OrderId, RecordingSink, Side, TickBand};


const BAND: TickBand = TickBand {
    min_tick: 0,
    max_tick: 20_000,
};

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Matching Engine Profiling Lab ===");

    latency_test::run_latency_tests();
    latency_test::run_throughput_test(std::time::Duration::from_secs(10));

    println!("\n=== Scenario Walkthrough ===");
    run_scenario_walkthrough();
}

/// Walks through the book's core behaviors end to end: resting a spread,
/// partial and full crosses, FIFO within a level, cancel, and replace.
fn run_scenario_walkthrough() {
    let mut engine = MatchingEngine::new(16, 16, BAND);
    let mut sink = RecordingSink::new();

    let ask = Order {
        id: OrderId(1),
        side: Side::Sell,
        price: 15000,
        qty: 100,
    };
    let bid = Order {
        id: OrderId(2),
        side: Side::Buy,
        price: 14950,
        qty: 50,
    };

    println!("Resting ask: {} @ {}", ask.qty, ask.price);
    engine.submit(ask, &mut sink);

    println!("Resting bid: {} @ {}", bid.qty, bid.price);
    engine.submit(bid, &mut sink);

    println!("Best bid: {:?}", engine.best_bid());
    println!("Best ask: {:?}", engine.best_ask());

    let crossing_bid = Order {
        id: OrderId(3),
        side: Side::Buy,
        price: 15000,
        qty: 75,
    };
    println!(
        "Crossing bid: {} @ {}",
        crossing_bid.qty, crossing_bid.price
    );
    let result = engine.submit(crossing_bid, &mut sink);
    println!("Add result: {:?}", result);

    for trade in sink.trades.drain(..) {
        println!(
            "  Trade: {} @ {} (taker={:?}, maker={:?})",
            trade.qty, trade.price, trade.taker_id, trade.maker_id
        );
    }

    println!(
        "Book after partial fill: bid={:?}, ask={:?}",
        engine.best_bid(),
        engine.best_ask()
    );

    println!(
        "Cancelling resting bid {:?}: {}",
        bid.id,
        engine.cancel(bid.id)
    );
    println!("Book after cancel: bid={:?}", engine.best_bid());

    let replace = engine.replace(OrderId(1), 14900, 25, &mut sink);
    println!(
        "Replace ask {:?} -> price=14900 qty=25: {:?}",
        OrderId(1),
        replace
    );
    for trade in sink.trades.drain(..) {
        println!("  Trade from replace: {} @ {}", trade.qty, trade.price);
    }
    println!(
        "Final book: bid={:?}, ask={:?}",
        engine.best_bid(),
        engine.best_ask()
    );
}
