/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion,
};
use implicit_treap::Treap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn bench_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("treap");

    for &len in &[1_000_usize, 100_000] {
        let values: Vec<i64> = (0..len as i64).collect();

        group.bench_with_input(BenchmarkId::new("build", len), &values, |b, v| {
            b.iter(|| Treap::build_with_seed(black_box(v.iter().copied()), 1))
        });

        let mut treap = Treap::build_with_seed(values.iter().copied(), 1);
        let mut rng = StdRng::seed_from_u64(233);
        group.bench_function(BenchmarkId::new("insert_erase", len), |b| {
            b.iter(|| {
                let pos = rng.gen_range(0..treap.len());
                treap.insert(pos, black_box(7)).unwrap();
                treap.erase(pos).unwrap()
            })
        });
        group.bench_function(BenchmarkId::new("reverse_sum", len), |b| {
            b.iter(|| {
                let l = rng.gen_range(0..len);
                let r = rng.gen_range(l..len);
                treap.reverse(l, r).unwrap();
                treap.range_sum(l, r).unwrap()
            })
        });
        group.bench_function(BenchmarkId::new("move_range", len), |b| {
            b.iter(|| {
                let l = rng.gen_range(0..len);
                let r = rng.gen_range(l..len);
                let pos = rng.gen_range(0..len);
                treap.move_range(l, r, pos).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ops);
criterion_main!(benches);
