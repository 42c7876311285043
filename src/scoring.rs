//! Distribution comparison
//!
//! Compares a *reference* histogram (the trained model) with a *target* histogram
//! (the content being scored). The frequency score is a reference-weighted average of
//! per-byte agreement:
//!
//! ```text
//! score = Σ r_i * (1 - relative_difference(r_i, t_i))    for i in 0..=255
//! ```
//!
//! where `r_i` and `t_i` are the normalized frequencies of byte `i`. Since `Σ r_i = 1`
//! the result lies in `[0, 1]` for non-empty inputs. Empty histograms produce NaN
//! (0/0), which is propagated unchanged.

use crate::histogram::{ByteHistogram, BYTE_VALUES};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the comparison is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Reference-weighted per-byte frequency agreement
    #[default]
    Frequency,
    /// Frequency agreement multiplied by byte-set overlap
    Combined,
}

/// Relative difference of two normalized frequencies, in `[0, 1]`.
///
/// Both zero is full agreement. NaN inputs yield NaN.
pub fn relative_difference(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    // f64::max ignores NaN, but the numerator carries it through.
    (a - b).abs() / a.max(b)
}

/// Frequency score of `target` against `reference`
pub fn score_frequencies(reference: &ByteHistogram, target: &ByteHistogram) -> f64 {
    let mut score = 0.0;
    for i in 0..BYTE_VALUES {
        let byte = i as u8;
        let r = reference.normalized(byte);
        let t = target.normalized(byte);
        score += r * (1.0 - relative_difference(r, t));
    }
    score
}

/// Byte-set overlap score: 1 when both sides use exactly the same byte values,
/// 0 when they share none (or the target is empty).
///
/// Penalizes targets that use bytes the reference never saw, which the frequency
/// score alone does not notice.
pub fn score_occurrences(reference: &ByteHistogram, target: &ByteHistogram) -> f64 {
    if target.is_empty() {
        return 0.0;
    }
    1.0 - set_relative_difference(reference, target)
}

/// Relative difference of the sets of byte values present in `a` and `b`
fn set_relative_difference(a: &ByteHistogram, b: &ByteHistogram) -> f64 {
    let ca = a.distinct();
    let cb = b.distinct();
    let ci = a.present().filter(|&byte| b.count(byte) > 0).count();

    if ci == ca && ci == cb {
        return 0.0;
    }
    if ci == 0 {
        return 1.0;
    }

    let (ca, cb, ci) = (ca as f64, cb as f64, ci as f64);
    (ca - ci).max(cb - ci) / ca.max(cb)
}

/// Score `target` against `reference` with the given mode
pub fn score(reference: &ByteHistogram, target: &ByteHistogram, mode: ScoringMode) -> f64 {
    match mode {
        ScoringMode::Frequency => score_frequencies(reference, target),
        ScoringMode::Combined => {
            score_frequencies(reference, target) * score_occurrences(reference, target)
        }
    }
}
