//! Benchmarking the pure decoding operations that every snapshot performs many times over.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use cpu_topology::{Midr, Uarch, Vendor, uarch_of, vendor_of};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

// A large server with a few holes in the online list.
const LONG_CPULIST: &str = "0-63,65-127,129-191,193-255";

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    group.bench_function("midr", |b| {
        b.iter(|| black_box(Midr::decode(black_box(0x410F_D034))).part_number());
    });

    group.bench_function("uarch_of_known", |b| {
        b.iter(|| uarch_of(black_box(Uarch::CortexA76.code())));
    });

    group.bench_function("uarch_of_unknown", |b| {
        b.iter(|| uarch_of(black_box(0xDEAD_BEEF)));
    });

    group.bench_function("vendor_of", |b| {
        b.iter(|| vendor_of(black_box(Vendor::Arm.code())));
    });

    group.finish();

    let mut group = c.benchmark_group("cpulist");

    group.bench_function("parse", |b| {
        b.iter(|| cpulist::parse(black_box(LONG_CPULIST)));
    });

    group.bench_function("contains", |b| {
        b.iter(|| cpulist::contains(black_box(LONG_CPULIST), black_box(200)));
    });

    group.finish();
}
