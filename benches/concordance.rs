use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::io::sink;

use cotrans::output::{Mode, PairWriter};
use cotrans::{Analysis, Config, PresenceMatrix};

/// Builds a deterministic pseudo-random presence matrix
fn matrix(genes: usize, organisms: usize) -> PresenceMatrix {
    let mut matrix = PresenceMatrix::new(organisms);
    let mut state = 0x2545_f491_4f6c_dd1du64;
    for gene in 0..genes {
        let values = (0..organisms)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                Some(if state % 5 == 0 { 0.0 } else { 2.0 })
            })
            .collect();
        matrix
            .push_row(&format!("OG{gene}"), values)
            .expect("keys are unique");
    }
    matrix
}

fn score_all(analysis: &Analysis) -> u64 {
    let mut writer = PairWriter::new(sink(), Mode::Exhaustive);
    analysis
        .write_all_pairs(&mut writer)
        .expect("writing to sink never fails")
        .emitted()
}

fn concordance_benchmark(c: &mut Criterion) {
    let m = matrix(1000, 200);

    let sequential = Analysis::new(m.clone(), Config::default());
    c.bench_function("all pairs 1000", |b| {
        b.iter(|| score_all(black_box(&sequential)))
    });

    let parallel = Analysis::new(
        m,
        Config::builder()
            .threads(0)
            .build()
            .expect("default config is valid"),
    );
    c.bench_function("all pairs-parallel 1000", |b| {
        b.iter(|| score_all(black_box(&parallel)))
    });
}

criterion_group!(concordance, concordance_benchmark);
criterion_main!(concordance);
