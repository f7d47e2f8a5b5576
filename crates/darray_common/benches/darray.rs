use criterion::{black_box, criterion_group, criterion_main, Criterion};

use darray_common::collections::*;

fn filled(len: u32) -> DArray<u32> {
    let mut arr = DArray::new(None).unwrap();
    for i in 0..len {
        arr.append(i).unwrap();
    }
    arr
}

fn darray_append(c: &mut Criterion) {
    c.bench_function("DArray::append(100)", |b| b.iter(|| {
        let mut arr = DArray::<u32>::new(None).unwrap();
        for i in 0..100 {
            arr.append(i).unwrap();
        }
        arr
    }));
    c.bench_function("Vec::push(100)", |b| b.iter(|| {
        let mut arr = Vec::<u32>::new();
        for i in 0..100 {
            arr.push(i);
        }
        arr
    }));
}

fn darray_insert_front(c: &mut Criterion) {
    c.bench_function("DArray::insert(0) x100", |b| b.iter(|| {
        let mut arr = DArray::<u32>::new(None).unwrap();
        for i in 0..100 {
            arr.insert(0, i).unwrap();
        }
        arr
    }));
    c.bench_function("Vec::insert(0) x100", |b| b.iter(|| {
        let mut arr = Vec::<u32>::new();
        for i in 0..100 {
            arr.insert(0, i);
        }
        arr
    }));
}

fn darray_pop(c: &mut Criterion) {
    c.bench_function("DArray::pop(back) x100", |b| b.iter(|| {
        let mut arr = filled(100);
        while !arr.is_empty() {
            arr.pop(arr.len() - 1).unwrap();
        }
        arr
    }));
    c.bench_function("Vec::pop x100", |b| b.iter(|| {
        let mut arr: Vec<u32> = (0..100).collect();
        while arr.pop().is_some() {}
        arr
    }));
}

fn darray_sort(c: &mut Criterion) {
    let source: Vec<u32> = (0..1000u32).map(|i| i.wrapping_mul(2654435761) % 1000).collect();

    c.bench_function("DArray::sort(1000)", |b| b.iter(|| {
        let mut arr = DArray::<u32>::new(None).unwrap();
        for &i in &source {
            arr.append(i).unwrap();
        }
        arr.sort(u32::cmp);
        arr
    }));
    c.bench_function("slice::sort_unstable(1000)", |b| b.iter(|| {
        let mut arr = source.clone();
        arr.sort_unstable();
        arr
    }));
}

fn darray_search(c: &mut Criterion) {
    let arr = filled(1000);
    c.bench_function("DArray::search(1000)", |b| b.iter(|| {
        arr.search(black_box(&999), u32::cmp)
    }));
}

criterion_group!(darray,
    darray_append,
    darray_insert_front,
    darray_pop,
    darray_sort,
    darray_search,
);
criterion_main!(darray);
