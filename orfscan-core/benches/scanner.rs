use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use orfscan_core::sequence::codons::StartCodonMatcher;
use orfscan_core::sequence::scanner::find_all_orfs;
use std::time::Duration;

fn configure_criterion() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .warm_up_time(Duration::from_secs(2))
        .sample_size(20)
        .noise_threshold(0.02)
}

/// Deterministic pseudo-random transcript (xorshift), so runs compare
fn synthetic_transcript(length: usize) -> Vec<u8> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..length)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            b"ACGT"[(state & 3) as usize]
        })
        .collect()
}

fn bench_find_all_orfs(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_all_orfs");
    let patterns: [(&str, &[&str]); 2] = [("ATG", &["ATG"]), ("NTG", &["NTG"])];

    for length in [2_000, 20_000, 200_000] {
        let sequence = synthetic_transcript(length);
        group.throughput(Throughput::Bytes(length as u64));

        for (label, codons) in patterns {
            let starts = StartCodonMatcher::new(codons).unwrap();
            group.bench_with_input(BenchmarkId::new(label, length), &sequence, |b, sequence| {
                b.iter(|| find_all_orfs(black_box(sequence), &starts));
            });
        }
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_find_all_orfs
}
criterion_main!(benches);
