//! Corpus loading
//!
//! Turns command-line inputs (files, directories, `-` for stdin) into byte buffers
//! and feeds them to an [`Analyzer`]. Directory inputs are walked recursively in
//! file-name order so training is reproducible.

use crate::analyzer::Analyzer;
use crate::config::CorpusConfig;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Input name that reads from standard input
pub const STDIN_INPUT: &str = "-";

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk corpus directory: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, CorpusError>;

/// Totals for one training run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub files: usize,
    pub bytes: u64,
}

/// One readable input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Display name (`-` for stdin)
    pub fn name(&self) -> String {
        match self {
            Source::Stdin => STDIN_INPUT.to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            Source::Stdin => {
                let mut buf = Vec::new();
                std::io::stdin()
                    .lock()
                    .read_to_end(&mut buf)
                    .map_err(|source| CorpusError::Read {
                        path: PathBuf::from(STDIN_INPUT),
                        source,
                    })?;
                Ok(buf)
            }
            Source::File(path) => std::fs::read(path).map_err(|source| CorpusError::Read {
                path: path.clone(),
                source,
            }),
        }
    }
}

/// Expands inputs into sources and trains analyzers from them
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    max_depth: usize,
    include_hidden: bool,
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::from_config(&CorpusConfig::default())
    }
}

impl CorpusLoader {
    pub fn from_config(config: &CorpusConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            include_hidden: config.include_hidden,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    /// Expand `inputs` into readable sources, in order. Directories contribute their
    /// regular files sorted by name.
    pub fn collect<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<Vec<Source>> {
        let mut sources = Vec::new();
        for input in inputs {
            let path = input.as_ref();
            if path.as_os_str() == STDIN_INPUT {
                sources.push(Source::Stdin);
            } else if path.is_dir() {
                self.collect_dir(path, &mut sources)?;
            } else {
                // Missing files surface as read errors with their path.
                sources.push(Source::File(path.to_path_buf()));
            }
        }
        Ok(sources)
    }

    fn collect_dir(&self, root: &Path, sources: &mut Vec<Source>) -> Result<()> {
        let include_hidden = self.include_hidden;
        let walker = WalkDir::new(root)
            .max_depth(self.max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || include_hidden || !is_hidden(e.path()));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() {
                sources.push(Source::File(entry.into_path()));
            }
        }
        Ok(())
    }

    /// Feed every input into `analyzer`
    pub fn train<P: AsRef<Path>>(&self, analyzer: &Analyzer, inputs: &[P]) -> Result<CorpusStats> {
        let mut stats = CorpusStats::default();
        for source in self.collect(inputs)? {
            let contents = source.read()?;
            tracing::debug!("Feeding {} ({} bytes)", source.name(), contents.len());
            analyzer.feed(&contents);
            stats.files += 1;
            stats.bytes += contents.len() as u64;
        }
        Ok(stats)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
