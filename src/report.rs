//! Text and JSON output for `score` and `inspect`

use crate::histogram::{byte_label, ByteHistogram};
use crate::persistence::ModelMetadata;
use serde::Serialize;
use std::fmt::Write as _;

/// Score for one scored input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    /// Input name (`-` for stdin, `<text>` for --text)
    pub source: String,
    /// Length of the scored content
    pub bytes: u64,
    /// `None` when the score is undefined (empty content or untrained model)
    pub score: Option<f64>,
    pub matches: bool,
}

impl ScoreRecord {
    pub fn new(source: impl Into<String>, bytes: u64, score: f64, threshold: f64) -> Self {
        let score = if score.is_nan() { None } else { Some(score) };
        Self {
            source: source.into(),
            bytes,
            score,
            matches: score.is_some_and(|s| s >= threshold),
        }
    }

    fn verdict(&self) -> &'static str {
        match (self.score, self.matches) {
            (None, _) => "undefined",
            (Some(_), true) => "match",
            (Some(_), false) => "no-match",
        }
    }
}

/// One line per record: `score<TAB>verdict<TAB>source`
pub fn format_scores_text(records: &[ScoreRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let score = match record.score {
            Some(s) => format!("{:.6}", s),
            None => "NaN".to_string(),
        };
        let _ = writeln!(out, "{}\t{}\t{}", score, record.verdict(), record.source);
    }
    out
}

pub fn format_scores_json(records: &[ScoreRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopByte {
    pub byte: u8,
    pub label: String,
    pub count: u64,
    pub share: f64,
}

/// Summary of a saved model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    pub path: String,
    pub total_bytes: u64,
    pub distinct_bytes: usize,
    pub entropy_bits: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,
    pub top: Vec<TopByte>,
}

impl ModelReport {
    pub fn new(
        path: impl Into<String>,
        histogram: &ByteHistogram,
        metadata: Option<ModelMetadata>,
        top: usize,
    ) -> Self {
        Self {
            path: path.into(),
            total_bytes: histogram.total(),
            distinct_bytes: histogram.distinct(),
            entropy_bits: histogram.entropy_bits(),
            metadata,
            top: histogram
                .top(top)
                .into_iter()
                .map(|share| TopByte {
                    byte: share.byte,
                    label: byte_label(share.byte),
                    count: share.count,
                    share: share.share,
                })
                .collect(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Model: {}", self.path);
        match &self.metadata {
            Some(meta) => {
                let _ = writeln!(out, "Written by: bytefreq {}", meta.bytefreq_version);
                let _ = writeln!(out, "Trained at: {}", meta.trained_at);
                if let Some(desc) = &meta.description {
                    let _ = writeln!(out, "Description: {}", desc);
                }
            }
            None => {
                let _ = writeln!(out, "Format: legacy (counters only)");
            }
        }
        let _ = writeln!(out, "Total bytes: {}", self.total_bytes);
        let _ = writeln!(out, "Distinct bytes: {}", self.distinct_bytes);
        let _ = writeln!(out, "Entropy: {:.4} bits/byte", self.entropy_bits);
        if !self.top.is_empty() {
            let _ = writeln!(out, "─────────────────────────────────────────");
            let _ = writeln!(out, "{:>8}  {:>12}  {:>8}", "byte", "count", "share");
            for entry in &self.top {
                let _ = writeln!(
                    out,
                    "{:>8}  {:>12}  {:>7.3}%",
                    entry.label,
                    entry.count,
                    entry.share * 100.0
                );
            }
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_record_match() {
        let record = ScoreRecord::new("a.txt", 10, 0.8, 0.5);
        assert_eq!(record.score, Some(0.8));
        assert!(record.matches);
        assert_eq!(record.verdict(), "match");
    }

    #[test]
    fn test_score_record_threshold_inclusive() {
        assert!(ScoreRecord::new("x", 1, 0.5, 0.5).matches);
        assert!(!ScoreRecord::new("x", 1, 0.49, 0.5).matches);
    }

    #[test]
    fn test_score_record_nan_is_undefined() {
        let record = ScoreRecord::new("empty", 0, f64::NAN, 0.0);
        assert!(record.score.is_none());
        assert!(!record.matches);
        assert_eq!(record.verdict(), "undefined");
    }

    #[test]
    fn test_format_scores_text() {
        let records = vec![
            ScoreRecord::new("good.txt", 9, 1.0, 0.5),
            ScoreRecord::new("bad.bin", 3, 0.0, 0.5),
            ScoreRecord::new("-", 0, f64::NAN, 0.5),
        ];
        let text = format_scores_text(&records);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1.000000\tmatch\tgood.txt");
        assert_eq!(lines[1], "0.000000\tno-match\tbad.bin");
        assert_eq!(lines[2], "NaN\tundefined\t-");
    }

    #[test]
    fn test_format_scores_json_null_for_nan() {
        let records = vec![ScoreRecord::new("-", 0, f64::NAN, 0.5)];
        let json = format_scores_json(&records).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value[0]["score"].is_null());
        assert_eq!(value[0]["matches"], false);
        assert_eq!(value[0]["source"], "-");
    }

    #[test]
    fn test_model_report() {
        let histogram = ByteHistogram::from_bytes(b"aaab\n");
        let report = ModelReport::new("m.bfq", &histogram, None, 5);
        assert_eq!(report.total_bytes, 5);
        assert_eq!(report.distinct_bytes, 3);
        assert_eq!(report.top[0].label, "'a'");
        assert_eq!(report.top[1].label, "0x0a");

        let text = report.to_text();
        assert!(text.contains("Format: legacy"));
        assert!(text.contains("Total bytes: 5"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["distinct_bytes"], 3);
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn test_model_report_with_metadata() {
        let histogram = ByteHistogram::from_bytes(b"xy");
        let metadata = ModelMetadata::new(2).with_description("tiny");
        let report = ModelReport::new("m.bfq", &histogram, Some(metadata), 1);
        assert_eq!(report.top.len(), 1);
        assert!(report.to_text().contains("Description: tiny"));
    }
}
