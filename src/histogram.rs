//! Raw byte histogram
//!
//! A fixed 256-entry table of occurrence counters indexed by byte value, plus the
//! running total of every byte counted. The total is maintained incrementally and
//! only recomputed when the counters are replaced wholesale.

use serde::Serialize;

/// Number of distinct byte values (and therefore counters).
pub const BYTE_VALUES: usize = 256;

/// Occurrence counts for every byte value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteHistogram {
    counts: [u64; BYTE_VALUES],
    total: u64,
}

/// One entry of a `top(n)` listing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ByteShare {
    pub byte: u8,
    pub count: u64,
    /// `count / total`
    pub share: f64,
}

impl Default for ByteHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteHistogram {
    /// Create an empty histogram (all counters zero)
    pub fn new() -> Self {
        Self {
            counts: [0; BYTE_VALUES],
            total: 0,
        }
    }

    /// Build a histogram from a single pass over `contents`
    pub fn from_bytes(contents: &[u8]) -> Self {
        let mut counts = [0u64; BYTE_VALUES];
        for &byte in contents {
            counts[byte as usize] += 1;
        }
        Self {
            counts,
            total: contents.len() as u64,
        }
    }

    /// Replace-style constructor for trusted tables: the total is recomputed from
    /// the counters and must not overflow.
    pub(crate) fn from_counts(counts: [u64; BYTE_VALUES]) -> Self {
        let total = counts.iter().sum();
        Self { counts, total }
    }

    /// Like [`ByteHistogram::from_counts`], but `None` if the total overflows
    pub fn try_from_counts(counts: [u64; BYTE_VALUES]) -> Option<Self> {
        let total = counts
            .iter()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))?;
        Some(Self { counts, total })
    }

    /// Add the occurrences of every byte in `contents` to the counters.
    ///
    /// Same overflow behavior as [`ByteHistogram::merge`].
    pub fn feed(&mut self, contents: &[u8]) -> bool {
        self.merge(&Self::from_bytes(contents))
    }

    /// Add another histogram's counters to this one.
    ///
    /// All-or-nothing: if any counter or the total would pass `u64::MAX`, nothing
    /// is changed and `false` is returned.
    pub fn merge(&mut self, other: &ByteHistogram) -> bool {
        let Some(total) = self.total.checked_add(other.total) else {
            return false;
        };
        let mut counts = self.counts;
        for (mine, theirs) in counts.iter_mut().zip(other.counts.iter()) {
            match mine.checked_add(*theirs) {
                Some(sum) => *mine = sum,
                None => return false,
            }
        }
        self.counts = counts;
        self.total = total;
        true
    }

    pub fn counts(&self) -> &[u64; BYTE_VALUES] {
        &self.counts
    }

    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Total number of bytes counted (sum of all counters)
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Normalized frequency of `byte`: `count / total`.
    ///
    /// An empty histogram yields NaN (0/0) for every byte. Callers that score
    /// against an untrained histogram get NaN back rather than an error.
    pub fn normalized(&self, byte: u8) -> f64 {
        self.counts[byte as usize] as f64 / self.total as f64
    }

    /// Number of byte values that occurred at least once
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Iterator over the byte values that occurred at least once
    pub fn present(&self) -> impl Iterator<Item = u8> + '_ {
        (0..BYTE_VALUES)
            .filter(|&i| self.counts[i] > 0)
            .map(|i| i as u8)
    }

    /// Shannon entropy of the distribution in bits per byte (0 for an empty histogram)
    pub fn entropy_bits(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        let mut entropy = 0.0;
        for &count in self.counts.iter() {
            if count == 0 {
                continue;
            }
            let p = count as f64 / total;
            entropy -= p * p.log2();
        }
        entropy
    }

    /// The `n` most frequent bytes, highest count first; ties go to the lower byte value.
    pub fn top(&self, n: usize) -> Vec<ByteShare> {
        let mut present: Vec<(u8, u64)> = self.present().map(|b| (b, self.count(b))).collect();
        present.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        present
            .into_iter()
            .take(n)
            .map(|(byte, count)| ByteShare {
                byte,
                count,
                share: count as f64 / self.total as f64,
            })
            .collect()
    }
}

/// Printable label for a byte value (`'a'`, `' '`, `0x0a`)
pub fn byte_label(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        format!("'{}'", byte as char)
    } else {
        format!("0x{:02x}", byte)
    }
}
