use avl_collections::avl_tree::AvlMap;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 1_000;

fn gen_keys() -> Vec<u32> {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    (0..NUM_OF_OPERATIONS).map(|_| rng.next_u32()).collect()
}

fn bench_btreemap_insert(c: &mut Criterion) {
    let keys = gen_keys();
    c.bench_function("bench btreemap insert", move |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for key in &keys {
                map.insert(*key, *key);
            }
            map
        })
    });
}

fn bench_btreemap_get(c: &mut Criterion) {
    let keys = gen_keys();
    let map = keys.iter().map(|key| (*key, *key)).collect::<BTreeMap<u32, u32>>();
    c.bench_function("bench btreemap get", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_avl_map_insert(c: &mut Criterion) {
    let keys = gen_keys();
    c.bench_function("bench avl_tree insert", move |b| {
        b.iter(|| {
            let mut map = AvlMap::new();
            for key in &keys {
                map.insert(*key, *key);
            }
            map
        })
    });
}

fn bench_avl_map_get(c: &mut Criterion) {
    let keys = gen_keys();
    let map = keys.iter().map(|key| (*key, *key)).collect::<AvlMap<u32, u32>>();
    c.bench_function("bench avl_tree get", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_avl_map_insert_remove(c: &mut Criterion) {
    let keys = gen_keys();
    c.bench_function("bench avl_tree insert remove", move |b| {
        b.iter(|| {
            let mut map = AvlMap::new();
            for key in &keys {
                map.insert(*key, *key);
            }
            for key in &keys {
                black_box(map.remove(key));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_btreemap_get,
    bench_btreemap_insert,
    bench_avl_map_get,
    bench_avl_map_insert,
    bench_avl_map_insert_remove,
);
criterion_main!(benches);
