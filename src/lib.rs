//! bytefreq - byte-frequency model for content similarity scoring
//!
//! Trains a 256-bucket histogram of raw byte values from a reference corpus and
//! scores new content by how closely its byte distribution matches. Models can be
//! saved to and restored from disk, and a pre-trained English preset is included.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod histogram;
pub mod persistence;
pub mod preset;
pub mod report;
pub mod scoring;

pub use analyzer::Analyzer;
pub use histogram::ByteHistogram;
pub use persistence::{PersistenceError, PersistenceOptions};
pub use preset::Preset;
pub use scoring::ScoringMode;
