use circvec::CircVec;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::VecDeque;

fn bench_push_and_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back then pop_front (1001)");
    group.bench_function("CircVec", |b| {
        b.iter(|| {
            let mut deque = CircVec::new();
            for i in 0..1001 {
                deque.push_back(black_box(i));
            }

            let mut sum = 0;
            while let Some(value) = deque.pop_front() {
                sum += value;
            }
            assert_eq!(sum, 500500);
        })
    });
    group.bench_function("VecDeque", |b| {
        b.iter(|| {
            let mut deque = VecDeque::new();
            for i in 0..1001 {
                deque.push_back(black_box(i));
            }

            let mut sum = 0;
            while let Some(value) = deque.pop_front() {
                sum += value;
            }
            assert_eq!(sum, 500500);
        })
    });
    group.finish();
}

fn bench_mixed_ends(c: &mut Criterion) {
    let mut group = c.benchmark_group("push both ends, pop both ends (1000)");
    group.bench_function("CircVec", |b| {
        b.iter(|| {
            let mut deque = CircVec::new();
            for i in 0..500 {
                deque.push_front(black_box(i));
                deque.push_back(black_box(i));
            }
            while deque.pop_front().is_some() {
                black_box(deque.pop_back());
            }
        })
    });
    group.bench_function("VecDeque", |b| {
        b.iter(|| {
            let mut deque = VecDeque::new();
            for i in 0..500 {
                deque.push_front(black_box(i));
                deque.push_back(black_box(i));
            }
            while deque.pop_front().is_some() {
                black_box(deque.pop_back());
            }
        })
    });
    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum (1001)");
    let deque = (0..1001).collect::<CircVec<u64>>();
    let vec_deque = (0..1001).collect::<VecDeque<u64>>();

    group.bench_function("CircVec::iter", |b| {
        b.iter(|| assert_eq!(black_box(&deque).iter().sum::<u64>(), 500500))
    });
    group.bench_function("CircVec spans", |b| {
        b.iter(|| {
            let (front, back) = black_box(&deque).as_slices();
            assert_eq!(front.iter().sum::<u64>() + back.iter().sum::<u64>(), 500500);
        })
    });
    group.bench_function("VecDeque::iter", |b| {
        b.iter(|| assert_eq!(black_box(&vec_deque).iter().sum::<u64>(), 500500))
    });
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get (1001)");
    let deque = (0..1001).collect::<CircVec<u64>>();
    let vec_deque = (0..1001).collect::<VecDeque<u64>>();

    group.bench_function("CircVec", |b| {
        b.iter(|| {
            let mut sum = 0;
            for i in 0..1001 {
                if let Some(x) = deque.get(black_box(i * 2)) {
                    sum += x;
                }
            }
            assert_eq!(sum, 250500);
        })
    });
    group.bench_function("VecDeque", |b| {
        b.iter(|| {
            let mut sum = 0;
            for i in 0..1001 {
                if let Some(x) = vec_deque.get(black_box(i * 2)) {
                    sum += x;
                }
            }
            assert_eq!(sum, 250500);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_push_and_pop, bench_mixed_ends, bench_iter, bench_get);
criterion_main!(benches);
