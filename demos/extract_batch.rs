//! Example: Extract note events from multiple audio files in parallel
//!
//! Usage:
//!   cargo run --release --example extract_batch -- [--jobs N] <file1> <file2> ...
//!
//! Parallelism is across files; each file's 88 pitch channels are also
//! processed in parallel inside the library.

use rayon::prelude::*;

use pianoscribe::io::decode_audio;
use pianoscribe::{extract_from_samples, ExtractionConfig, ExtractionSummary};

fn process_file(path: &str, config: &ExtractionConfig) -> Result<ExtractionSummary, String> {
    let (samples, sample_rate) = decode_audio(path).map_err(|e| e.to_string())?;
    let duration = samples.len() as f32 / sample_rate as f32;

    let events =
        extract_from_samples(&samples, sample_rate, config).map_err(|e| e.to_string())?;

    Ok(ExtractionSummary::new(path.to_string(), sample_rate, duration, events))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut files: Vec<String> = Vec::new();
    let mut jobs: Option<usize> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--jobs" {
            jobs = args.next().and_then(|v| v.parse().ok());
        } else {
            files.push(arg);
        }
    }

    if files.is_empty() {
        return Err("Usage: extract_batch [--jobs N] <file1> <file2> ...".into());
    }

    if let Some(n) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .expect("Failed to build rayon thread pool");
    }

    let config = ExtractionConfig::default();

    let results: Vec<(String, Result<ExtractionSummary, String>)> = files
        .par_iter()
        .map(|path| (path.clone(), process_file(path, &config)))
        .collect();

    let mut failures = 0;
    for (path, result) in results {
        match result {
            Ok(summary) => {
                println!(
                    "{}: {} events over {:.2}s",
                    path, summary.num_events, summary.duration
                );
                let stem = path
                    .rsplit_once('.')
                    .map(|(stem, _)| stem)
                    .unwrap_or(path.as_str());
                let out_path = format!("{}_notes.json", stem);
                std::fs::write(&out_path, serde_json::to_string_pretty(&summary)?)?;
            }
            Err(e) => {
                eprintln!("{}: FAILED ({})", path, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("{} file(s) failed", failures);
        std::process::exit(1);
    }

    Ok(())
}
