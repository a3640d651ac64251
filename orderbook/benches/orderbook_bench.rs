use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orderbook::{MatchingEngine, NullSink, Order, OrderId, Side, TickBand};

const BAND: TickBand = TickBand {
    min_tick: 0,
    max_tick: 20_000,
};

fn order(id: u64, side: Side, price: i32, qty: i64) -> Order {
    Order {
        id: OrderId(id),
        side,
        price,
        qty,
    }
}

fn bench_order_submission(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_submission");

    for &num_orders in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::new("non_crossing_orders", num_orders),
            &num_orders,
            |b, &num_orders| {
                b.iter(|| {
                    let mut eng = MatchingEngine::new(num_orders, num_orders, BAND);
                    let mut sink = NullSink;
                    for i in 0..num_orders {
                        let o = order(
                            i as u64,
                            if i % 2 == 0 { Side::Buy } else { Side::Sell },
                            if i % 2 == 0 {
                                10000 - i as i32
                            } else {
                                10100 + i as i32
                            },
                            100,
                        );
                        black_box(eng.submit(o, &mut sink));
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_order_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_matching");

    for &depth in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("crossing_orders", depth),
            &depth,
            |b, &depth| {
                b.iter_batched(
                    || {
                        let mut eng = MatchingEngine::new(depth * 2, depth * 2 + 1, BAND);
                        let mut sink = NullSink;
                        for i in 0..depth {
                            eng.submit(
                                order(i as u64, Side::Sell, 10000 + i as i32, 100),
                                &mut sink,
                            );
                            eng.submit(
                                order((i + depth) as u64, Side::Buy, 9999 - i as i32, 100),
                                &mut sink,
                            );
                        }
                        eng
                    },
                    |mut eng| {
                        let mut sink = NullSink;
                        let crossing = order(
                            (depth * 2) as u64,
                            Side::Buy,
                            10000 + depth as i32,
                            (depth * 50) as i64,
                        );
                        black_box(eng.submit(crossing, &mut sink))
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_market_data_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_data");

    let mut eng = MatchingEngine::new(2000, 2000, BAND);
    let mut sink = NullSink;
    for i in 0..1000 {
        eng.submit(order(i, Side::Sell, 10000 + i as i32, 100), &mut sink);
        eng.submit(order(i + 1000, Side::Buy, 9999 - i as i32, 100), &mut sink);
    }

    group.bench_function("best_bid", |b| b.iter(|| black_box(eng.best_bid())));

    group.bench_function("best_ask", |b| b.iter(|| black_box(eng.best_ask())));

    group.finish();
}

fn bench_order_cancellation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cancellation");

    for &num_orders in [100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("eager_remove", num_orders),
            &num_orders,
            |b, &num_orders| {
                b.iter_batched(
                    || {
                        let mut eng = MatchingEngine::new(num_orders, num_orders, BAND);
                        let mut sink = NullSink;
                        let mut order_ids = Vec::new();
                        for i in 0..num_orders {
                            let o = order(i as u64, Side::Buy, 10000 - (i as i32), 100);
                            order_ids.push(o.id);
                            eng.submit(o, &mut sink);
                        }
                        (eng, order_ids)
                    },
                    |(mut eng, order_ids)| {
                        for (i, &id) in order_ids.iter().enumerate() {
                            if i % 2 == 0 {
                                black_box(eng.cancel(id));
                            }
                        }
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_high_frequency_scenario(c: &mut Criterion) {
    let mut group = c.benchmark_group("hft_scenario");

    group.bench_function("rapid_order_flow", |b| {
        b.iter(|| {
            let mut eng = MatchingEngine::new(1000, 1000, BAND);
            let mut sink = NullSink;
            let mut order_id = 1u64;

            for _ in 0..100 {
                for i in 0..5 {
                    eng.submit(order(order_id, Side::Sell, 10000 + i, 100), &mut sink);
                    order_id += 1;
                    eng.submit(order(order_id, Side::Buy, 9999 - i, 100), &mut sink);
                    order_id += 1;
                }

                let crossing = order(order_id, Side::Buy, 10002, 300);
                order_id += 1;
                black_box(eng.submit(crossing, &mut sink));

                black_box(eng.best_bid());
                black_box(eng.best_ask());
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_order_submission,
    bench_order_matching,
    bench_market_data_access,
    bench_order_cancellation,
    bench_high_frequency_scenario
);

criterion_main!(benches);
