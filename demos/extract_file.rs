//! Example: Extract note events from a single audio file
//!
//! Usage:
//!   cargo run --release --example extract_file -- <audio-file> [output.json]

use pianoscribe::io::decode_audio;
use pianoscribe::{extract_from_samples, ExtractionConfig, ExtractionSummary};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or("Usage: extract_file <audio-file> [output.json]")?;
    let output = args.next();

    let (samples, sample_rate) = decode_audio(&input)?;
    let duration = samples.len() as f32 / sample_rate as f32;

    let config = ExtractionConfig::default();
    let events = extract_from_samples(&samples, sample_rate, &config)?;

    let summary = ExtractionSummary::new(input.clone(), sample_rate, duration, events);

    println!("Extraction results for {}:", input);
    println!("  Duration: {:.2}s at {} Hz", summary.duration, summary.sample_rate);
    println!("  Events: {}", summary.num_events);
    for event in summary.events.iter().take(20) {
        println!(
            "    {:>8.3}s  {:<4} (midi {:>3})  magnitude {:.3}  strength {:.3}",
            event.time, event.note_name, event.midi_number, event.magnitude, event.onset_strength
        );
    }
    if summary.num_events > 20 {
        println!("    ... and {} more", summary.num_events - 20);
    }

    if let Some(path) = output {
        std::fs::write(&path, serde_json::to_string_pretty(&summary)?)?;
        println!("Saved to {}", path);
    }

    Ok(())
}
