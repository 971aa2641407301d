//! Encode/decode throughput for full archives.

use codec::{decode_archive, encode_archive, CodecLimits, Player, RegionArchive};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use schema::IdentityTable;

#[path = "../tests/common/mod.rs"]
mod common;

fn bench_player(c: &mut Criterion) {
    let mut player = common::maximal_player();
    let bytes = encode_archive(&mut player, &IdentityTable).unwrap();
    let limits = CodecLimits::default();

    let mut group = c.benchmark_group("player");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("encode", |b| {
        b.iter(|| encode_archive(black_box(&mut player), &IdentityTable).unwrap())
    });

    group.bench_function("decode", |b| {
        b.iter(|| decode_archive::<Player>(black_box(&bytes), &IdentityTable, &limits).unwrap())
    });

    group.finish();
}

fn bench_region(c: &mut Criterion) {
    let mut region = common::maximal_region();
    let bytes = encode_archive(&mut region, &IdentityTable).unwrap();
    let limits = CodecLimits::default();

    let mut group = c.benchmark_group("region");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("encode", |b| {
        b.iter(|| encode_archive(black_box(&mut region), &IdentityTable).unwrap())
    });

    group.bench_function("decode", |b| {
        b.iter(|| {
            decode_archive::<RegionArchive>(black_box(&bytes), &IdentityTable, &limits).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_player, bench_region);
criterion_main!(benches);
