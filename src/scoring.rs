use std::collections::HashMap;

use crate::types::{Fix, Spot};

// Logistic decay: steepness 12, midpoint at normalized age t = 1, so the
// earliest fix weighs ≈ 6e-6 and a fix made "now" weighs 0.5.
const DECAY_STEEPNESS: f64 = 12.0;

/// Ranks files by accumulated decay-weighted fix activity.
///
/// `fixes` must be chronologically ascending as produced by
/// [`crate::git::history::scan_fixes`]; the per-file totals are accumulated
/// in one pass over that order, so floating-point summation is reproducible
/// run-to-run on identical history. `now` is supplied by the caller, which
/// keeps scoring deterministic under test.
///
/// Returns the fixes sorted by descending file count and the spots sorted by
/// descending score, both truncated to at most `depth` entries.
pub fn score(fixes: Vec<Fix>, now: i64, depth: usize) -> (Vec<Fix>, Vec<Spot>) {
    if fixes.is_empty() {
        return (Vec::new(), Vec::new());
    }

    // The normalization window moves with `now`: t is 0 at the earliest fix
    // and 1 at `now`. Identical histories scanned at different times yield
    // different absolute scores — they only compare files within one run.
    let span = (now - fixes[0].timestamp) as f64;

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut spots: Vec<Spot> = Vec::new();

    for fix in &fixes {
        let t = if span > 0.0 {
            1.0 - (now - fix.timestamp) as f64 / span
        } else {
            1.0 // every fix is at `now`, nothing to normalize
        };
        let weight = 1.0 / (1.0 + (-DECAY_STEEPNESS * t + DECAY_STEEPNESS).exp());

        for file in &fix.files {
            match index.get(file).copied() {
                Some(at) => spots[at].score += weight,
                None => {
                    index.insert(file.clone(), spots.len());
                    spots.push(Spot { file: file.clone(), score: weight });
                }
            }
        }
    }

    // Both sorts are stable: equal totals keep first-appearance order, equal
    // file counts keep chronological order.
    spots.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    spots.truncate(depth);

    let mut fixes = fixes;
    fixes.sort_by_key(|f| std::cmp::Reverse(f.files.len()));
    fixes.truncate(depth);

    (fixes, spots)
}
