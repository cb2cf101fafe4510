use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, Criterion};

use herald::Emitter;

type Hits = Rc<RefCell<u64>>;

fn make_emitter_with_tree() -> (Emitter<u64>, Hits) {
    let hits: Hits = Rc::new(RefCell::new(0));
    let mut emitter = Emitter::new();

    // A small namespace tree with a mix of subscriber variants, so emission
    // measures realistic dispatch work rather than an empty registry walk.
    for leaf in 0..16 {
        let event = format!("alpha.beta.gamma{leaf}");
        emitter.on(&event, &hits, |count| *count += 1);
    }
    emitter
        .on("alpha.beta.gamma0", &hits, |count| *count += 1)
        .several("alpha.beta", &hits, |count| *count += 1, 1_000_000)
        .through("alpha", &hits, |count| *count += 1, 4);

    (emitter, hits)
}

fn bench_emit_bubbling(c: &mut Criterion) {
    c.bench_function("emit/bubbling_three_levels", |b| {
        // Fresh state per sample so counter-limited subscribers do not
        // exhaust across samples; setup is excluded from timing.
        b.iter_custom(|iters| {
            let (mut emitter, _hits) = make_emitter_with_tree();
            emitter.emit("alpha.beta.gamma0");

            let start = Instant::now();
            for _ in 0..iters {
                emitter.emit("alpha.beta.gamma0");
            }
            start.elapsed()
        });
    });
}

fn bench_subscription_churn(c: &mut Criterion) {
    c.bench_function("emit/subscription_churn", |b| {
        b.iter_custom(|iters| {
            let hits: Hits = Rc::new(RefCell::new(0));
            let mut emitter = Emitter::new();

            let start = Instant::now();
            for _ in 0..iters {
                emitter.on("alpha.beta.gamma", &hits, |count| *count += 1);
                emitter.off("alpha", &hits);
            }
            start.elapsed()
        });
    });
}

criterion_group!(benches, bench_emit_bubbling, bench_subscription_churn);
criterion_main!(benches);
