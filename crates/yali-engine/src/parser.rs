//! Model file parsing
//!
//! A decompressed model is line oriented:
//!
//! ```text
//! <n-gram length>
//! <metadata line, ignored>
//! <ngram>\t<count>
//! ...
//! ```
//!
//! N-grams are byte strings. Models are built from byte n-grams, so a token
//! may hold a partial UTF-8 sequence and the body is never decoded as text.

use std::collections::HashMap;
use yali_core::{Error, Result};

/// Normalized n-gram distribution of a single class
#[derive(Debug, Clone)]
pub struct FrequencyModel {
    ngram: usize,
    weights: HashMap<Box<[u8]>, f64>,
    skipped_lines: usize,
}

impl FrequencyModel {
    /// N-gram length declared in the model header
    pub fn ngram(&self) -> usize {
        self.ngram
    }

    /// Weight of an n-gram, if the model knows it
    pub fn weight(&self, ngram: &[u8]) -> Option<f64> {
        self.weights.get(ngram).copied()
    }

    /// Number of distinct n-grams
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all weights: 1.0 for a non-empty model, 0.0 when every count was zero
    pub fn weight_sum(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Body lines dropped as malformed
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], f64)> {
        self.weights.iter().map(|(k, v)| (k.as_ref(), *v))
    }

    pub(crate) fn into_weights(self) -> HashMap<Box<[u8]>, f64> {
        self.weights
    }

    #[cfg(test)]
    pub(crate) fn empty(ngram: usize) -> Self {
        Self {
            ngram,
            weights: HashMap::new(),
            skipped_lines: 0,
        }
    }
}

/// Parse a decompressed model.
///
/// `source` only labels diagnostics. A bad header fails the whole model;
/// malformed body lines are skipped.
pub fn parse_model(source: &str, data: &[u8]) -> Result<FrequencyModel> {
    let mut lines = data
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line));

    let header = lines
        .next()
        .ok_or_else(|| Error::header(format!("{}: empty model", source)))?;
    let ngram = parse_ngram_length(header)
        .ok_or_else(|| Error::header(format!("{}: invalid n-gram length header", source)))?;

    // Historically a record count; nothing downstream depends on it.
    if lines.next().is_none() {
        return Err(Error::header(format!("{}: missing metadata line", source)));
    }

    // u64 counts summed in u128
    let mut counts: HashMap<Box<[u8]>, u128> = HashMap::new();
    let mut total: u128 = 0;
    let mut skipped_lines = 0;

    for (idx, line) in lines.enumerate() {
        let line_nr = idx + 3;

        if line.trim_ascii().is_empty() {
            continue;
        }

        let mut fields = line.split(|b| *b == b'\t');
        let (token, count) = match (fields.next(), fields.next(), fields.next()) {
            (Some(token), Some(count), None) if !token.is_empty() => (token, count),
            _ => {
                tracing::debug!(source, line = line_nr, "skipping line without two fields");
                skipped_lines += 1;
                continue;
            }
        };

        let count = match parse_count(count) {
            Some(count) => count,
            None => {
                tracing::warn!(
                    source,
                    line = line_nr,
                    content = %String::from_utf8_lossy(line),
                    "skipping line with invalid count"
                );
                skipped_lines += 1;
                continue;
            }
        };

        *counts.entry(Box::from(token)).or_insert(0) += u128::from(count);
        total += u128::from(count);
    }

    let weights = counts
        .into_iter()
        .map(|(token, count)| {
            let weight = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            };
            (token, weight)
        })
        .collect();

    Ok(FrequencyModel {
        ngram,
        weights,
        skipped_lines,
    })
}

fn parse_ngram_length(line: &[u8]) -> Option<usize> {
    std::str::from_utf8(line)
        .ok()?
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
}

fn parse_count(field: &[u8]) -> Option<u64> {
    std::str::from_utf8(field).ok()?.trim().parse().ok()
}
