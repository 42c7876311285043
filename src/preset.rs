//! Pre-trained reference models
//!
//! A preset is a hard-coded histogram turned into an ordinary [`Analyzer`] on demand.
//! Nothing is cached globally: each call to [`Preset::analyzer`] builds a fresh model
//! that the caller owns.

use crate::analyzer::Analyzer;
use crate::histogram::{ByteHistogram, BYTE_VALUES};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Built-in reference models
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// English prose
    English,
}

impl Preset {
    /// Counter table for this preset
    pub fn histogram(self) -> ByteHistogram {
        let table = match self {
            Preset::English => ENGLISH,
        };
        let mut counts = [0u64; BYTE_VALUES];
        for &(byte, count) in table {
            counts[byte as usize] += count;
        }
        ByteHistogram::from_counts(counts)
    }

    /// Fresh analyzer trained with this preset
    pub fn analyzer(self) -> Analyzer {
        Analyzer::from_histogram(self.histogram())
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::English => "english",
        }
    }
}

/// Byte counts per 100 000 bytes of mixed English prose.
const ENGLISH: &[(u8, u64)] = &[
    (b' ', 17_200),
    (b'e', 9_650),
    (b't', 6_900),
    (b'a', 6_250),
    (b'o', 5_950),
    (b'i', 5_500),
    (b'n', 5_450),
    (b's', 5_000),
    (b'h', 4_850),
    (b'r', 4_700),
    (b'd', 3_300),
    (b'l', 3_200),
    (b'u', 2_200),
    (b'c', 2_150),
    (b'm', 1_950),
    (b'w', 1_850),
    (b'f', 1_750),
    (b'g', 1_600),
    (b'y', 1_550),
    (b'p', 1_450),
    (b'b', 1_200),
    (b'v', 780),
    (b'k', 600),
    (b'j', 110),
    (b'x', 110),
    (b'q', 70),
    (b'z', 60),
    (b'T', 280),
    (b'I', 260),
    (b'A', 180),
    (b'S', 140),
    (b'H', 120),
    (b'W', 110),
    (b'M', 100),
    (b'B', 90),
    (b'C', 90),
    (b'E', 60),
    (b'O', 60),
    (b'P', 60),
    (b'N', 50),
    (b'D', 50),
    (b'L', 50),
    (b'R', 50),
    (b'F', 40),
    (b'G', 40),
    (b'Y', 30),
    (b'J', 20),
    (b'K', 20),
    (b'U', 20),
    (b'V', 10),
    (b'Q', 5),
    (b'X', 5),
    (b'Z', 5),
    (b',', 980),
    (b'.', 900),
    (b'\n', 400),
    (b'\'', 240),
    (b'"', 180),
    (b'-', 160),
    (b';', 40),
    (b':', 30),
    (b'?', 50),
    (b'!', 40),
    (b'(', 20),
    (b')', 20),
    (b'0', 60),
    (b'1', 70),
    (b'2', 50),
    (b'3', 30),
    (b'4', 25),
    (b'5', 25),
    (b'6', 20),
    (b'7', 20),
    (b'8', 20),
    (b'9', 25),
];
