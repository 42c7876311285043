//! Thread-safe, incrementally trainable byte-frequency model
//!
//! [`Analyzer`] wraps a [`ByteHistogram`] in a read-write lock so one instance can be
//! shared between threads (e.g. behind an `Arc`):
//!
//! - [`Analyzer::feed`] and [`Analyzer::restore`] take the lock exclusively.
//! - [`Analyzer::score`] and [`Analyzer::save`] share it and may run concurrently.
//!
//! # Example
//!
//! ```
//! use bytefreq::Analyzer;
//!
//! let analyzer = Analyzer::new();
//! analyzer.feed(b"aaabbbccc");
//!
//! assert_eq!(analyzer.score(b"cccbbbaaa"), 1.0);
//! assert_eq!(analyzer.score(b"xyz"), 0.0);
//! ```
//!
//! # Degenerate inputs
//!
//! Scoring with an untrained analyzer, or scoring empty content, divides zero by zero
//! and returns NaN. This is not an error; callers must train the model and supply
//! non-empty content before treating a score as meaningful.

use crate::histogram::{ByteHistogram, BYTE_VALUES};
use crate::persistence::{self, PersistenceOptions};
use crate::scoring::{self, ScoringMode};
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Byte-frequency model
#[derive(Debug, Default)]
pub struct Analyzer {
    state: RwLock<ByteHistogram>,
}

impl Analyzer {
    /// Create an untrained analyzer (all counters zero)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer whose state is `histogram`
    pub fn from_histogram(histogram: ByteHistogram) -> Self {
        Self {
            state: RwLock::new(histogram),
        }
    }

    // Every critical section leaves the histogram consistent, so a poisoned lock
    // still guards valid data.
    fn read(&self) -> RwLockReadGuard<'_, ByteHistogram> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ByteHistogram> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count every byte of `contents` into the model. Repeated calls accumulate.
    ///
    /// A chunk that would push a counter past `u64::MAX` is dropped whole and the
    /// model keeps its previous state.
    pub fn feed(&self, contents: &[u8]) {
        // Count outside the lock; only the merge needs exclusive access.
        let delta = ByteHistogram::from_bytes(contents);
        let merged = self.write().merge(&delta);
        if !merged {
            tracing::warn!(
                "Dropped {} bytes: the model's counters are saturated",
                contents.len()
            );
        }
    }

    /// Similarity of `contents` to the trained distribution, in `[0, 1]`.
    ///
    /// NaN when the analyzer is untrained or `contents` is empty.
    pub fn score(&self, contents: &[u8]) -> f64 {
        self.score_with_mode(contents, ScoringMode::Frequency)
    }

    /// [`Analyzer::score`] over the UTF-8 bytes of `text`, without any normalization
    pub fn score_str(&self, text: &str) -> f64 {
        self.score(text.as_bytes())
    }

    /// Score `contents` with an explicit [`ScoringMode`]
    pub fn score_with_mode(&self, contents: &[u8], mode: ScoringMode) -> f64 {
        let target = ByteHistogram::from_bytes(contents);
        let reference = self.read();
        scoring::score(&reference, &target, mode)
    }

    /// Persist the counters to `path`, creating or truncating the file
    pub fn save(&self, path: impl AsRef<Path>) -> persistence::Result<()> {
        self.save_with(path, &PersistenceOptions::default())
    }

    /// [`Analyzer::save`] with explicit options
    pub fn save_with(
        &self,
        path: impl AsRef<Path>,
        options: &PersistenceOptions,
    ) -> persistence::Result<()> {
        let state = self.read();
        persistence::save_histogram(&state, path.as_ref(), options)?;
        tracing::debug!(
            "Saved model to {} ({} bytes observed)",
            path.as_ref().display(),
            state.total()
        );
        Ok(())
    }

    /// Replace the model with the counters stored at `path`.
    ///
    /// The file is fully decoded before the current state is touched; on error the
    /// analyzer is left unchanged. Only the final swap holds the lock, so a `save` to
    /// the same path running at the same time can hand this a truncated file and
    /// make it fail with [`persistence::PersistenceError::Decode`].
    pub fn restore(&self, path: impl AsRef<Path>) -> persistence::Result<()> {
        let loaded = persistence::load_model(path.as_ref())?;
        let total = loaded.histogram.total();
        *self.write() = loaded.histogram;
        tracing::debug!(
            "Restored model from {} ({} bytes observed)",
            path.as_ref().display(),
            total
        );
        Ok(())
    }

    /// Total number of bytes observed
    pub fn size(&self) -> u64 {
        self.read().total()
    }

    /// Copy of the 256 counters
    pub fn counts(&self) -> [u64; BYTE_VALUES] {
        *self.read().counts()
    }

    /// Copy of the whole histogram
    pub fn snapshot(&self) -> ByteHistogram {
        self.read().clone()
    }

    pub fn is_trained(&self) -> bool {
        !self.read().is_empty()
    }
}

impl From<ByteHistogram> for Analyzer {
    fn from(histogram: ByteHistogram) -> Self {
        Self::from_histogram(histogram)
    }
}
