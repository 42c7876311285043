//! Model file format
//!
//! A model file stores the 256 byte counters of a trained histogram. The current
//! layout is a MessagePack map:
//!
//! ```text
//! { version: 1, metadata: { bytefreq_version, trained_at, total_bytes, description }, frequency: [u64; 256] }
//! ```
//!
//! The legacy layout is a bare MessagePack array of exactly 256 integers with no
//! header. Both are accepted on load; the total byte count is never trusted from the
//! file and is recomputed from the counters.

use crate::histogram::{ByteHistogram, BYTE_VALUES};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Newest envelope version this build reads and the one it writes
pub const FORMAT_VERSION: u32 = 1;

/// Largest total a model file may carry; counters are 64-bit signed on disk.
pub const MAX_TOTAL: u64 = i64::MAX as u64;

/// Errors that can occur while saving or loading a model file
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode model: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("Failed to decode model: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("Invalid model: expected {expected} counters, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("Invalid model: counters sum past i64::MAX")]
    CountOverflow,

    #[error("Unsupported model version: supported up to {supported}, found {found}")]
    UnsupportedVersion { supported: u32, found: u32 },
}

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Descriptive data stored next to the counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// bytefreq version that wrote the file
    pub bytefreq_version: String,
    /// Unix timestamp (seconds) of the save
    pub trained_at: u64,
    /// Sum of the counters at save time
    pub total_bytes: u64,
    pub description: Option<String>,
}

impl ModelMetadata {
    /// Metadata for a histogram saved now
    pub fn new(total_bytes: u64) -> Self {
        Self {
            bytefreq_version: env!("CARGO_PKG_VERSION").to_string(),
            trained_at: unix_timestamp(),
            total_bytes,
            description: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

fn unix_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize)]
struct ModelFile {
    version: u32,
    metadata: ModelMetadata,
    frequency: Vec<u64>,
}

/// Options for saving models
#[derive(Debug, Clone, Default)]
pub struct PersistenceOptions {
    /// Free-form description stored in the metadata
    pub description: Option<String>,
    /// Write the headerless 256-entry array instead of the versioned envelope
    pub legacy_layout: bool,
}

impl PersistenceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_legacy_layout(mut self, legacy: bool) -> Self {
        self.legacy_layout = legacy;
        self
    }
}

/// A decoded model file
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub histogram: ByteHistogram,
    /// `None` for the legacy layout
    pub metadata: Option<ModelMetadata>,
}

/// Encode `histogram` into `writer`
pub fn write_histogram<W: Write>(
    writer: &mut W,
    histogram: &ByteHistogram,
    options: &PersistenceOptions,
) -> Result<()> {
    if options.legacy_layout {
        rmp_serde::encode::write(writer, &histogram.counts().to_vec())?;
        return Ok(());
    }

    let mut metadata = ModelMetadata::new(histogram.total());
    if let Some(desc) = &options.description {
        metadata = metadata.with_description(desc.as_str());
    }

    let file = ModelFile {
        version: FORMAT_VERSION,
        metadata,
        frequency: histogram.counts().to_vec(),
    };
    rmp_serde::encode::write_named(writer, &file)?;
    Ok(())
}

/// Decode a model from raw file contents
pub fn decode_model(bytes: &[u8]) -> Result<LoadedModel> {
    // A map-encoded envelope never decodes as a plain sequence, so the order is unambiguous.
    if let Ok(counts) = rmp_serde::from_slice::<Vec<u64>>(bytes) {
        return Ok(LoadedModel {
            histogram: histogram_from_vec(counts)?,
            metadata: None,
        });
    }

    let file: ModelFile = rmp_serde::from_slice(bytes)?;
    if file.version > FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            supported: FORMAT_VERSION,
            found: file.version,
        });
    }

    Ok(LoadedModel {
        histogram: histogram_from_vec(file.frequency)?,
        metadata: Some(file.metadata),
    })
}

fn histogram_from_vec(counts: Vec<u64>) -> Result<ByteHistogram> {
    let found = counts.len();
    let counts: [u64; BYTE_VALUES] = counts.try_into().map_err(|_| {
        PersistenceError::InvalidLength {
            expected: BYTE_VALUES,
            found,
        }
    })?;
    ByteHistogram::try_from_counts(counts)
        .filter(|histogram| histogram.total() <= MAX_TOTAL)
        .ok_or(PersistenceError::CountOverflow)
}

/// Create (or truncate) `path` and write `histogram` to it
pub fn save_histogram(
    histogram: &ByteHistogram,
    path: impl AsRef<Path>,
    options: &PersistenceOptions,
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_histogram(&mut writer, histogram, options)?;
    writer.flush()?;
    Ok(())
}

/// Read and decode the model file at `path`
pub fn load_model(path: impl AsRef<Path>) -> Result<LoadedModel> {
    let mut file = File::open(path.as_ref())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    decode_model(&bytes)
}

/// Metadata of the model at `path` (`None` for legacy files)
pub fn read_metadata(path: impl AsRef<Path>) -> Result<Option<ModelMetadata>> {
    Ok(load_model(path)?.metadata)
}
