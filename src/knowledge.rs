//! Curated existence knowledge for parameter tuples.
//!
//! The knowledge base is a JSON Lines file, one record per line:
//!
//! ```text
//! {"v":36,"k":14,"lambda":4,"mu":6,"status":"exists","comments":"..."}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. A copy covering every
//! apparently feasible tuple with `v < 65` (plus a few larger ones) is
//! compiled into the crate; the `SRG_KNOWLEDGE_BASE` environment variable
//! points the process-wide instance at another file.

use crate::params::Parameters;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::ffi::OsString;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

/// Environment variable naming a knowledge-base file that replaces the bundled copy.
pub const KNOWLEDGE_BASE_ENV: &str = "SRG_KNOWLEDGE_BASE";

const BUNDLED: &str = include_str!("../data/srg_knowledge.jsonl");

// ============================================================================
// Records
// ============================================================================

/// Curated status of a parameter tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// A graph with these parameters is known.
    Exists,
    /// Existence is an open problem.
    Open,
    /// Non-existence has been proved.
    Impossible,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Exists => "exists",
            Status::Open => "open",
            Status::Impossible => "impossible",
        })
    }
}

/// One knowledge-base record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// The tuple this record is about.
    #[serde(flatten)]
    pub params: Parameters,
    /// Curated status.
    pub status: Status,
    /// Free-text provenance.
    #[serde(default)]
    pub comments: String,
}

/// Failure to load or parse a knowledge base.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KnowledgeError {
    /// The source could not be read.
    #[error("cannot read knowledge base {source_name}: {message}")]
    Io {
        /// Where we tried to read from.
        source_name: String,
        /// Underlying I/O error text.
        message: String,
    },
    /// A line is not a valid record.
    #[error("knowledge base line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Parser error text.
        message: String,
    },
    /// The same tuple appears twice.
    #[error("knowledge base line {line}: duplicate record for {params}")]
    Duplicate {
        /// 1-based line number of the second occurrence.
        line: usize,
        /// The repeated tuple.
        params: Parameters,
    },
}

// ============================================================================
// Knowledge base
// ============================================================================

/// Map from parameter tuple to its curated record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: HashMap<Parameters, KnowledgeEntry>,
}

impl KnowledgeBase {
    /// An empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry`, returning the record it replaced.
    pub fn insert(&mut self, entry: KnowledgeEntry) -> Option<KnowledgeEntry> {
        self.entries.insert(entry.params, entry)
    }

    /// The record for exactly `p`.
    #[inline]
    pub fn get(&self, p: &Parameters) -> Option<&KnowledgeEntry> {
        self.entries.get(p)
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All records, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &KnowledgeEntry> {
        self.entries.values()
    }

    /// Keys with `v < bound`, ordered.
    pub fn keys_below(&self, bound: i64) -> BTreeSet<Parameters> {
        self.entries.keys().filter(|p| p.v < bound).copied().collect()
    }

    /// Number of records with each status, as `(exists, impossible, open)`.
    pub fn status_counts(&self) -> (usize, usize, usize) {
        self.entries().fold((0, 0, 0), |(e, i, o), entry| match entry.status {
            Status::Exists => (e + 1, i, o),
            Status::Impossible => (e, i + 1, o),
            Status::Open => (e, i, o + 1),
        })
    }
}

impl FromIterator<KnowledgeEntry> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = KnowledgeEntry>>(iter: I) -> Self {
        let mut kb = KnowledgeBase::new();
        for entry in iter {
            kb.insert(entry);
        }
        kb
    }
}

/// Reads a knowledge base from JSON Lines.
///
/// # Errors
///
/// Returns [`KnowledgeError::Parse`] for a malformed line and
/// [`KnowledgeError::Duplicate`] when a tuple occurs twice.
pub fn read_jsonl(reader: impl BufRead) -> Result<KnowledgeBase, KnowledgeError> {
    let mut kb = KnowledgeBase::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| KnowledgeError::Parse {
            line: line_no + 1,
            message: e.to_string(),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let entry: KnowledgeEntry =
            serde_json::from_str(trimmed).map_err(|e| KnowledgeError::Parse {
                line: line_no + 1,
                message: e.to_string(),
            })?;
        let params = entry.params;
        if kb.insert(entry).is_some() {
            return Err(KnowledgeError::Duplicate {
                line: line_no + 1,
                params,
            });
        }
    }
    Ok(kb)
}

/// Writes records as JSON Lines, ordered by tuple.
///
/// # Errors
///
/// Returns [`KnowledgeError::Io`] if the writer fails.
pub fn write_jsonl(writer: &mut impl Write, kb: &KnowledgeBase) -> Result<(), KnowledgeError> {
    let mut entries: Vec<_> = kb.entries().collect();
    entries.sort_by_key(|e| e.params);
    let io = |e: &dyn fmt::Display| KnowledgeError::Io {
        source_name: "writer".into(),
        message: e.to_string(),
    };
    for entry in entries {
        let line = serde_json::to_string(entry).map_err(|e| io(&e))?;
        writeln!(writer, "{line}").map_err(|e| io(&e))?;
    }
    Ok(())
}

// ============================================================================
// Sources
// ============================================================================

/// Where a knowledge base is loaded from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum KnowledgeSource {
    /// The copy compiled into the crate.
    #[default]
    Bundled,
    /// A JSON Lines file on disk.
    File(PathBuf),
}

impl KnowledgeSource {
    /// [`KnowledgeSource::File`] if `SRG_KNOWLEDGE_BASE` is set and non-empty,
    /// otherwise [`KnowledgeSource::Bundled`].
    pub fn from_env() -> Self {
        Self::from_var(std::env::var_os(KNOWLEDGE_BASE_ENV))
    }

    fn from_var(value: Option<OsString>) -> Self {
        match value {
            Some(path) if !path.is_empty() => KnowledgeSource::File(path.into()),
            _ => KnowledgeSource::Bundled,
        }
    }

    /// Loads and parses the knowledge base.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::Io`] when the file cannot be read, or the
    /// errors of [`read_jsonl`].
    pub fn load(&self) -> Result<KnowledgeBase, KnowledgeError> {
        let kb = match self {
            KnowledgeSource::Bundled => read_jsonl(BUNDLED.as_bytes())?,
            KnowledgeSource::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| KnowledgeError::Io {
                    source_name: path.display().to_string(),
                    message: e.to_string(),
                })?;
                read_jsonl(text.as_bytes())?
            }
        };
        info!(source = %self, records = kb.len(), "loaded knowledge base");
        Ok(kb)
    }
}

impl fmt::Display for KnowledgeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeSource::Bundled => f.write_str("bundled"),
            KnowledgeSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The process-wide knowledge base, loaded once from [`KnowledgeSource::from_env`].
///
/// A failed load is remembered; every later call reports the same error.
///
/// # Errors
///
/// Returns the error of the first load attempt.
pub fn global() -> Result<&'static KnowledgeBase, KnowledgeError> {
    static GLOBAL: OnceLock<Result<KnowledgeBase, KnowledgeError>> = OnceLock::new();
    GLOBAL
        .get_or_init(|| KnowledgeSource::from_env().load())
        .as_ref()
        .map_err(Clone::clone)
}

// ============================================================================
// Tests
// ============================================================================
