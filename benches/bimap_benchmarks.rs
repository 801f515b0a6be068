use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use tether_bimap::BiMap;

const SIZES: &[usize] = &[1000, 10000];

// Two ordered maps kept in sync by hand, the usual alternative to a bimap.
#[derive(Default)]
struct MapPair {
    by_left: BTreeMap<usize, usize>,
    by_right: BTreeMap<usize, usize>,
}

impl MapPair {
    fn insert(&mut self, left: usize, right: usize) -> bool {
        if self.by_left.contains_key(&left) || self.by_right.contains_key(&right) {
            return false;
        }
        self.by_left.insert(left, right);
        self.by_right.insert(right, left);
        true
    }

    fn erase_left(&mut self, left: &usize) -> bool {
        match self.by_left.remove(left) {
            Some(right) => {
                self.by_right.remove(&right);
                true
            }
            None => false,
        }
    }
}

fn shuffled(size: usize) -> Vec<usize> {
    let mut keys: Vec<usize> = (0..size).collect();
    for i in (1..size).rev() {
        keys.swap(i, rand::random_range(0..=i));
    }
    keys
}

fn bench_insert_shuffled(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_shuffled");

    for &size in SIZES {
        let keys = shuffled(size);
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("bimap", size), &size, |b, _| {
            b.iter(|| {
                let mut map = BiMap::new();
                for &key in &keys {
                    map.insert(black_box(key), black_box(size - key));
                }
                map
            })
        });

        group.bench_with_input(BenchmarkId::new("bimap_preallocated", size), &size, |b, _| {
            b.iter(|| {
                let mut map = BiMap::with_capacity(size);
                for &key in &keys {
                    map.insert(black_box(key), black_box(size - key));
                }
                map
            })
        });

        group.bench_with_input(BenchmarkId::new("btree_pair", size), &size, |b, _| {
            b.iter(|| {
                let mut map = MapPair::default();
                for &key in &keys {
                    map.insert(black_box(key), black_box(size - key));
                }
                map.by_left.len()
            })
        });
    }

    group.finish();
}

fn bench_lookup_both_sides(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_both_sides");

    for &size in SIZES {
        let keys = shuffled(size);
        let access_keys: Vec<usize> = (0..100).map(|_| rand::random_range(0..size)).collect();
        group.throughput(criterion::Throughput::Elements(2 * access_keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("bimap", size), &size, |b, _| {
            let map: BiMap<usize, usize> = keys.iter().map(|&k| (k, k * 3)).collect();

            b.iter(|| {
                let mut sum = 0;
                for &key in &access_keys {
                    if let Ok(right) = map.at_left(&black_box(key)) {
                        sum += *right;
                    }
                    if let Ok(left) = map.at_right(&black_box(key * 3)) {
                        sum += *left;
                    }
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("btree_pair", size), &size, |b, _| {
            let mut map = MapPair::default();
            for &key in &keys {
                map.insert(key, key * 3);
            }

            b.iter(|| {
                let mut sum = 0;
                for &key in &access_keys {
                    if let Some(right) = map.by_left.get(&black_box(key)) {
                        sum += *right;
                    }
                    if let Some(left) = map.by_right.get(&black_box(key * 3)) {
                        sum += *left;
                    }
                }
                sum
            })
        });
    }

    group.finish();
}

fn bench_flip(c: &mut Criterion) {
    let mut group = c.benchmark_group("flip");

    for &size in SIZES {
        let keys = shuffled(size);
        let access_keys: Vec<usize> = (0..100).map(|_| rand::random_range(0..size)).collect();
        group.throughput(criterion::Throughput::Elements(access_keys.len() as u64));

        // Find on the left, then read the right neighbour of the partner.
        group.bench_with_input(BenchmarkId::new("bimap", size), &size, |b, _| {
            let map: BiMap<usize, usize> = keys.iter().map(|&k| (k, size - k)).collect();

            b.iter(|| {
                let mut sum = 0;
                for &key in &access_keys {
                    let mut cursor = map.find_left(&black_box(key)).flip();
                    cursor.move_next();
                    sum += cursor.other().copied().unwrap_or_default();
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("btree_pair", size), &size, |b, _| {
            let mut map = MapPair::default();
            for &key in &keys {
                map.insert(key, size - key);
            }

            b.iter(|| {
                let mut sum = 0;
                for &key in &access_keys {
                    if let Some(&right) = map.by_left.get(&black_box(key)) {
                        sum += map
                            .by_right
                            .range(right + 1..)
                            .next()
                            .map(|(_, left)| *left)
                            .unwrap_or_default();
                    }
                }
                sum
            })
        });
    }

    group.finish();
}

fn bench_erase_shuffled(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_shuffled");

    for &size in SIZES {
        let keys = shuffled(size);
        let erase_order = shuffled(size);
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("bimap", size), &size, |b, _| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k + 1)).collect::<BiMap<usize, usize>>(),
                |mut map| {
                    for key in &erase_order {
                        map.erase_left(black_box(key));
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("btree_pair", size), &size, |b, _| {
            b.iter_batched(
                || {
                    let mut map = MapPair::default();
                    for &key in &keys {
                        map.insert(key, key + 1);
                    }
                    map
                },
                |mut map| {
                    for key in &erase_order {
                        map.erase_left(black_box(key));
                    }
                    map.by_left.len()
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");

    for &size in SIZES {
        let keys = shuffled(size);
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("bimap_right", size), &size, |b, _| {
            let map: BiMap<usize, usize> = keys.iter().map(|&k| (k, size - k)).collect();

            b.iter(|| {
                let mut sum = 0;
                for (right, left) in map.iter_right() {
                    sum += black_box(*right) ^ black_box(*left);
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("btree_pair_right", size), &size, |b, _| {
            let mut map = MapPair::default();
            for &key in &keys {
                map.insert(key, size - key);
            }

            b.iter(|| {
                let mut sum = 0;
                for (right, left) in &map.by_right {
                    sum += black_box(*right) ^ black_box(*left);
                }
                sum
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_shuffled,
    bench_lookup_both_sides,
    bench_flip,
    bench_erase_shuffled,
    bench_iteration,
);
criterion_main!(benches);
