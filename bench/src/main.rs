mod args;
mod workload;

use args::{Args, Mode};
use clap::Parser;
use orderbook::{MatchingEngine, TickBand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Instant;
use workload::{LiveSetTracker, StatsSink};

const BAND: TickBand = TickBand {
    min_tick: 1,
    max_tick: 200_000,
};

#[derive(Serialize)]
struct RunStats {
    mode: &'static str,
    ops: u64,
    seed: u64,
    elapsed_ms: f64,
    ops_per_sec: f64,
    trades: u64,
    filled_qty: i64,
    live_orders_final: usize,
    live_orders_tracked: usize,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    if let Err(e) = args.validate() {
        tracing::error!(error = %e, "invalid benchmark configuration");
        std::process::exit(1);
    }

    let mut engine = MatchingEngine::new(args.ops as usize, args.ops as usize, BAND);
    let mut sink = StatsSink::default();
    let mut tracker = LiveSetTracker::default();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let cross_pct = args.effective_cross();
    let started = Instant::now();

    for i in 0..args.ops {
        let roll = rng.gen_range(0..100u8);
        if roll < args.add || tracker.len() == 0 {
            let order = workload::new_order(&mut rng, i, BAND, cross_pct);
            let result = engine.submit(order, &mut sink);
            if matches!(
                result,
                orderbook::AddResult::FullyRested | orderbook::AddResult::PartiallyRested
            ) {
                tracker.insert(order.id.0);
            }
        } else if roll < args.add + args.cancel {
            if let Some(id) = tracker.sample_existing(&mut rng) {
                engine.cancel(orderbook::OrderId(id));
                tracker.remove(id);
            }
        } else if let Some(id) = tracker.sample_existing(&mut rng) {
            let side = workload::gen_side(&mut rng);
            let price = workload::gen_price(&mut rng, BAND, side, cross_pct);
            let qty = workload::gen_qty(&mut rng);
            let result = engine.replace(orderbook::OrderId(id), price, qty, &mut sink);
            if !result.rested() {
                tracker.remove(id);
            }
        }

        let closed = sink.drain_closed();
        if !closed.is_empty() {
            tracker.reconcile_closed(&closed);
        }

        if args.prune_every > 0 && i > 0 && i % args.prune_every == 0 {
            if let Err(msg) = engine.check_invariants() {
                tracing::error!(op_index = i, error = %msg, "invariant violated mid-run");
                std::process::exit(1);
            }
            tracing::trace!(
                op_index = i,
                engine_live = engine.live_orders(),
                tracked_live = tracker.len(),
                "prune checkpoint"
            );
        }
    }

    let elapsed = started.elapsed();
    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    let ops_per_sec = if elapsed.as_secs_f64() > 0.0 {
        args.ops as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    if let Err(msg) = engine.check_invariants() {
        tracing::error!(error = %msg, "invariant violated at end of run");
        std::process::exit(1);
    }

    let stats = RunStats {
        mode: match args.mode {
            Mode::Maintenance => "maintenance",
            Mode::Match => "match",
        },
        ops: args.ops,
        seed: args.seed,
        elapsed_ms,
        ops_per_sec,
        trades: sink.trade_count,
        filled_qty: sink.filled_qty,
        live_orders_final: engine.live_orders(),
        live_orders_tracked: tracker.len(),
    };

    tracing::info!(?stats.ops, ?stats.elapsed_ms, ?stats.ops_per_sec, "run complete");
    println!("{}", serde_json::to_string_pretty(&stats).unwrap());
}
