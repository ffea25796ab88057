//! N-gram scoring of text against a registry snapshot

use crate::registry::Snapshot;
use std::collections::BTreeMap;
use std::time::Instant;
use yali_core::{Identification, LanguageScore};

/// Byte n-grams of every non-blank, trimmed line of `text`.
///
/// Lines shorter than `n` contribute nothing.
pub fn extract_ngrams(text: &str, n: usize) -> impl Iterator<Item = &[u8]> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .flat_map(move |line| line.as_bytes().windows(n.max(1)))
        .filter(move |window| window.len() == n)
}

/// Score `text` against every class in `snapshot`.
///
/// Each extracted n-gram adds its per-class weight to that class; the
/// accumulators are then normalized to sum to 1.0. The result covers every
/// loaded class, ordered by descending score and then ascending class id.
pub fn identify(snapshot: &Snapshot, text: &str) -> Identification {
    let start = Instant::now();

    let Some(n) = snapshot.ngram() else {
        return Identification {
            latency_us: start.elapsed().as_micros() as u64,
            ..Default::default()
        };
    };

    let mut accumulators: BTreeMap<&str, f64> = snapshot.classes().map(|c| (c, 0.0)).collect();
    let mut extracted = 0;
    let mut matched = 0;

    for ngram in extract_ngrams(text, n) {
        extracted += 1;
        let Some(weights) = snapshot.lookup(ngram) else {
            continue;
        };
        matched += 1;
        for (class, weight) in weights {
            if let Some(acc) = accumulators.get_mut(class.as_ref()) {
                *acc += weight;
            }
        }
    }

    let total: f64 = accumulators.values().sum();
    let mut scores: Vec<LanguageScore> = accumulators
        .into_iter()
        .map(|(class, acc)| {
            let score = if total > 0.0 { acc / total } else { 0.0 };
            LanguageScore::new(class, score)
        })
        .collect();
    scores.sort_by(LanguageScore::rank_cmp);

    Identification {
        scores,
        ngrams_extracted: extracted,
        ngrams_matched: matched,
        latency_us: start.elapsed().as_micros() as u64,
    }
}
