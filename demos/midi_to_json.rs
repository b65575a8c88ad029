//! Example: Convert a MIDI file to a JSON note-event document
//!
//! Usage:
//!   cargo run --release --example midi_to_json -- <file.mid> [output.json]

use pianoscribe::midi::extract_midi_notes;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or("Usage: midi_to_json <file.mid> [output.json]")?;
    let output = args.next();

    let extraction = extract_midi_notes(&input)?;

    println!("Converted {}:", extraction.source_file);
    println!("  Duration: {:.2}s", extraction.duration);
    println!("  Tempo: {:.1} BPM", extraction.bpm);
    println!("  Events: {}", extraction.num_events);

    if let Some(path) = output {
        std::fs::write(&path, serde_json::to_string_pretty(&extraction)?)?;
        println!("Saved to {}", path);
    }

    Ok(())
}
