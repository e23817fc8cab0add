use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use rigor_buffer::Buffer;
use std::hint::black_box;

const PAYLOAD: &[u8] = &[0x5A; 4096];

fn bench_append(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("append");

    group.bench_function("growable-from-64", |bench| {
        bench.iter(|| {
            let mut buf = Buffer::growable(64).unwrap();
            for chunk in PAYLOAD.chunks(16) {
                buf.append_bytes(chunk).unwrap();
            }
            black_box(buf.len())
        })
    });

    group.bench_function("growable-presized", |bench| {
        bench.iter(|| {
            let mut buf = Buffer::growable(PAYLOAD.len() * 2).unwrap();
            for chunk in PAYLOAD.chunks(16) {
                buf.append_bytes(chunk).unwrap();
            }
            black_box(buf.len())
        })
    });

    group.bench_function("fixed", |bench| {
        let mut storage = vec![0u8; PAYLOAD.len() * 2];
        bench.iter(|| {
            let mut buf = Buffer::fixed(&mut storage).unwrap();
            for chunk in PAYLOAD.chunks(16) {
                buf.append_bytes(chunk).unwrap();
            }
            black_box(buf.len())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_append);
criterion_main!(benches);
