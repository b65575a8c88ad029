//! Performance benchmarks for note extraction

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pianoscribe::{extract_from_samples, ExtractionConfig};

fn bench_extract_from_samples(c: &mut Criterion) {
    // Synthetic 30-second piano-ish signal: a new decaying tone every 0.5s
    let sample_rate = 44100u32;
    let mut samples = vec![0.0f32; sample_rate as usize * 30];
    let note_freqs = [261.63f32, 329.63, 392.0, 523.25];

    for (n, chunk) in samples
        .chunks_mut(sample_rate as usize / 2)
        .enumerate()
    {
        let freq = note_freqs[n % note_freqs.len()];
        for (i, sample) in chunk.iter_mut().enumerate() {
            let t = i as f32 / sample_rate as f32;
            *sample = 0.6 * (-t * 3.0).exp() * (2.0 * std::f32::consts::PI * freq * t).sin();
        }
    }

    let config = ExtractionConfig::default();

    c.bench_function("extract_from_samples_30s", |b| {
        b.iter(|| {
            let _ = extract_from_samples(
                black_box(&samples),
                black_box(44100),
                black_box(&config),
            );
        });
    });
}

criterion_group!(benches, bench_extract_from_samples);
criterion_main!(benches);
