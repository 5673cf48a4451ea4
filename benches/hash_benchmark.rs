use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Write;

use hashsum_rs::hash::{self, HashMode};

/// Create test data of the given size for benchmarking.
fn make_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn bench_sum_bytes(c: &mut Criterion) {
    let sizes = [1024, 64 * 1024, 1024 * 1024, 10 * 1024 * 1024];

    let mut group = c.benchmark_group("sum_bytes");
    for &size in &sizes {
        let data = make_test_data(size);
        let label = if size >= 1024 * 1024 {
            format!("{}MB", size / (1024 * 1024))
        } else {
            format!("{}KB", size / 1024)
        };

        group.throughput(Throughput::Bytes(size as u64));

        for mode in HashMode::ALL {
            group.bench_with_input(BenchmarkId::new(mode.name(), &label), &data, |b, data| {
                b.iter(|| hash::sum_bytes(mode, data));
            });
        }
    }
    group.finish();
}

fn bench_sum_file(c: &mut Criterion) {
    // A temp file exercises the streaming path end to end.
    let size = 10 * 1024 * 1024;
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(&make_test_data(size)).unwrap();
    f.flush().unwrap();

    let mut group = c.benchmark_group("sum_file");
    group.sample_size(10);
    group.throughput(Throughput::Bytes(size as u64));

    for mode in [HashMode::Sha256, HashMode::Md5, HashMode::Crc32] {
        group.bench_with_input(
            BenchmarkId::new(mode.name(), "10MB"),
            f.path(),
            |b, path| {
                b.iter(|| hash::sum_file(mode, path).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_sum_bytes, bench_sum_file);
criterion_main!(benches);
