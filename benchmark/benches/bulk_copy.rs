// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Bulk copy benchmarks.
//!
//! Measures slice copies and direct-buffer copies between a mapped region
//! and process memory at various sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mapshare_benchmark::ScratchRegion;
use mapshare_core::shm::access;
use mapshare_core::{ByteBuffer, DirectBuffer};
use std::time::Duration;

/// Copy sizes to benchmark (in bytes).
const COPY_SIZES: &[usize] = &[64, 256, 1024, 4096, 16384, 65536];

const REGION_SIZE: u64 = 1024 * 1024;

fn bench_slice_copy(c: &mut Criterion) {
    let scratch = ScratchRegion::new(REGION_SIZE).expect("Failed to map region");
    let base = scratch.address();
    let mut group = c.benchmark_group("slice_copy");
    group.measurement_time(Duration::from_secs(5));

    for &size in COPY_SIZES {
        group.throughput(Throughput::Bytes(size as u64 * 2)); // Write + read

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let src = vec![0xABu8; size];
            let mut dst = vec![0u8; size];

            b.iter(|| unsafe {
                access::put_bytes(base, black_box(&src));
                access::get_bytes(base, black_box(&mut dst));
            });
        });
    }

    group.finish();
}

fn bench_direct_buffer_copy(c: &mut Criterion) {
    let scratch = ScratchRegion::new(REGION_SIZE).expect("Failed to map region");
    let base = scratch.address();
    let mut group = c.benchmark_group("direct_buffer_copy");
    group.measurement_time(Duration::from_secs(5));

    for &size in COPY_SIZES {
        group.throughput(Throughput::Bytes(size as u64 * 2));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let src = DirectBuffer::from_slice(&vec![0xCDu8; size]);
            let mut dst = DirectBuffer::new(size);

            b.iter(|| {
                dst.rewind();
                unsafe {
                    access::put_buffer(base, &src, size).expect("put_buffer failed");
                    access::get_buffer(base, &mut dst, size).expect("get_buffer failed");
                }
                black_box(dst.position());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_slice_copy, bench_direct_buffer_copy);

criterion_main!(benches);
