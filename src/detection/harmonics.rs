//! Harmonic suppression of near-simultaneous detections
//!
//! A struck piano note produces energy across its whole harmonic series, so
//! one physical keystroke can trigger onset detections on many pitch
//! channels within a few milliseconds. A genuine chord rarely has more than
//! a few concurrently attacked fundamentals, while harmonics of one note
//! show up as many weaker simultaneous peaks. This module suppresses the
//! weak co-occurring detections and caps how many survive per window.

use crate::detection::RawEvent;

/// Temporal window for grouping near-simultaneous events, in seconds
const WINDOW_SECONDS: f32 = 0.03;

/// Events below this fraction of the window's strongest magnitude are
/// treated as harmonic residue and dropped
const STRONG_EVENT_RATIO: f32 = 0.7;

/// Maximum events kept per window
const MAX_EVENTS_PER_WINDOW: usize = 3;

/// Filter a time-sorted event sequence, suppressing likely harmonics
///
/// Windows are formed by a forward scan: each window starts at the first
/// unconsumed event and absorbs every subsequent event strictly less than
/// 30 ms after that first event. The boundary is relative to the window's
/// first element, not a fixed grid, so a long cluster can split into
/// several windows depending on exact spacing. This chaining behavior is
/// deliberate; changing it would change which events are suppressed.
///
/// Within a window of size > 1:
/// 1. Events below 70% of the window's maximum magnitude are dropped.
/// 2. If more than 3 remain, only the 3 strongest are kept (stable on
///    magnitude ties), re-ordered by time afterwards.
///
/// Single-event windows pass through unchanged. Inter-window order is
/// preserved, so the output remains time-sorted.
pub fn resolve_harmonics(events: Vec<RawEvent>) -> Vec<RawEvent> {
    if events.len() < 2 {
        return events;
    }

    log::debug!("Resolving harmonics over {} raw events", events.len());

    let mut resolved: Vec<RawEvent> = Vec::with_capacity(events.len());
    let mut start = 0;

    while start < events.len() {
        let window_start_time = events[start].time;
        let mut end = start + 1;
        while end < events.len() && events[end].time < window_start_time + WINDOW_SECONDS {
            end += 1;
        }

        if end - start == 1 {
            resolved.push(events[start].clone());
        } else {
            let window = &events[start..end];
            resolved.extend(filter_window(window));
        }

        start = end;
    }

    log::debug!("Harmonic resolution kept {} events", resolved.len());

    resolved
}

/// Apply the strong-event floor and the per-window cap to one window
fn filter_window(window: &[RawEvent]) -> Vec<RawEvent> {
    let max_magnitude = window
        .iter()
        .map(|e| e.magnitude)
        .fold(0.0f32, f32::max);

    let mut strong: Vec<RawEvent> = window
        .iter()
        .filter(|e| e.magnitude >= STRONG_EVENT_RATIO * max_magnitude)
        .cloned()
        .collect();

    if strong.len() > MAX_EVENTS_PER_WINDOW {
        // Stable sort: equal magnitudes keep their original time order
        strong.sort_by(|a, b| {
            b.magnitude
                .partial_cmp(&a.magnitude)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        strong.truncate(MAX_EVENTS_PER_WINDOW);
        // Restore time order so the flattened sequence stays sorted
        strong.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
    }

    strong
}
