use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use huffman_canon::HuffmanCodec;

fn generate_low_entropy_bytes(size: usize) -> Vec<u8> {
    let pattern = b"aaaaaaaabbbbccd ";
    pattern.iter().copied().cycle().take(size).collect()
}

fn generate_high_entropy_bytes(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i.wrapping_mul(2_654_435_761) >> 7) as u8).collect()
}

const BENCH_DATA_SIZE: usize = 65536; // 64 KB

fn bench_codec(c: &mut Criterion) {
    let inputs = [
        ("low_entropy", generate_low_entropy_bytes(BENCH_DATA_SIZE)),
        ("high_entropy", generate_high_entropy_bytes(BENCH_DATA_SIZE)),
    ];

    let mut group = c.benchmark_group("huffman");
    group.throughput(Throughput::Bytes(BENCH_DATA_SIZE as u64));

    for (name, data) in &inputs {
        let compressed = HuffmanCodec::compress_bytes(data).unwrap();

        group.bench_function(format!("compress/{name}"), |b| {
            b.iter(|| HuffmanCodec::compress_bytes(black_box(data)).unwrap())
        });
        group.bench_function(format!("decompress/{name}"), |b| {
            b.iter(|| {
                HuffmanCodec::decompress_bytes(black_box(&compressed)).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
