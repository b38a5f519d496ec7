//! Report directory persistence: write/read/verify a `RunReportV1` on disk.
//!
//! # Directory layout (`ReportDirectoryV1`)
//!
//! ```text
//! <dir>/
//!   report.json        canonical JSON report (binds the trace digest)
//!   trace.json         canonical JSON search trace
//!   trace_digest.txt   ASCII digest string ("sha256:...")
//! ```
//!
//! The directory path is never part of any digest.
//!
//! # Fail-closed semantics
//!
//! - Missing file → error
//! - Extra file → error
//! - Trace digest mismatch (file or report binding) → error
//! - Unknown `schema_version` → error

use std::collections::BTreeSet;
use std::path::Path;

use frontier_search::trace::DOMAIN_SEARCH_TRACE;

use crate::runner::{domain_digest, RunReportV1, RUN_REPORT_SCHEMA_VERSION};

const REPORT_FILENAME: &str = "report.json";
const TRACE_FILENAME: &str = "trace.json";
const DIGEST_FILENAME: &str = "trace_digest.txt";

const ALL_FILENAMES: &[&str] = &[REPORT_FILENAME, TRACE_FILENAME, DIGEST_FILENAME];

/// Error writing a report directory.
#[derive(Debug)]
pub enum ReportDirWriteError {
    Io { detail: String },
    CanonError { detail: String },
}

impl std::fmt::Display for ReportDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for ReportDirWriteError {}

/// Error reading or verifying a report directory.
#[derive(Debug)]
pub enum ReportDirReadError {
    Io { detail: String },
    MissingFile { filename: String },
    ExtraFile { name: String },
    ReportParseError { detail: String },
    SchemaVersionMismatch { found: String },
    /// `trace_digest.txt` does not match the digest recomputed from
    /// `trace.json`.
    DigestMismatch { stored: String, recomputed: String },
    /// `report.json` binds a different trace digest than the directory holds.
    ReportBindingMismatch { bound: String, recomputed: String },
}

impl std::fmt::Display for ReportDirReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingFile { filename } => write!(f, "missing file: {filename}"),
            Self::ExtraFile { name } => write!(f, "undeclared extra file: {name}"),
            Self::ReportParseError { detail } => write!(f, "report parse error: {detail}"),
            Self::SchemaVersionMismatch { found } => {
                write!(f, "report schema version mismatch: {found}")
            }
            Self::DigestMismatch { stored, recomputed } => {
                write!(
                    f,
                    "digest mismatch: stored={stored}, recomputed={recomputed}"
                )
            }
            Self::ReportBindingMismatch { bound, recomputed } => {
                write!(
                    f,
                    "report binds trace digest {bound}, directory holds {recomputed}"
                )
            }
        }
    }
}

impl std::error::Error for ReportDirReadError {}

/// Contents of a verified report directory.
#[derive(Debug, Clone)]
pub struct StoredReportV1 {
    pub report: serde_json::Value,
    pub trace_bytes: Vec<u8>,
    pub trace_digest: String,
}

/// Write a report to `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`ReportDirWriteError`] on I/O failure or canonical JSON error.
pub fn write_report_dir(report: &RunReportV1, dir: &Path) -> Result<(), ReportDirWriteError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportDirWriteError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;

    let report_bytes =
        report
            .to_canonical_json_bytes()
            .map_err(|e| ReportDirWriteError::CanonError {
                detail: e.to_string(),
            })?;

    write_atomic(&dir.join(TRACE_FILENAME), &report.trace_bytes)?;
    write_atomic(&dir.join(DIGEST_FILENAME), report.trace_digest.as_bytes())?;
    write_atomic(&dir.join(REPORT_FILENAME), &report_bytes)?;
    tracing::debug!(dir = %dir.display(), "report directory written");
    Ok(())
}

/// Read a report directory and check every digest binding.
///
/// # Errors
///
/// Returns [`ReportDirReadError`] on any validation failure.
pub fn read_report_dir(dir: &Path) -> Result<StoredReportV1, ReportDirReadError> {
    let report_bytes = read_required(dir, REPORT_FILENAME)?;
    let trace_bytes = read_required(dir, TRACE_FILENAME)?;
    let digest_bytes = read_required(dir, DIGEST_FILENAME)?;

    let declared: BTreeSet<&str> = ALL_FILENAMES.iter().copied().collect();
    for name in list_files(dir)? {
        if !declared.contains(name.as_str()) {
            return Err(ReportDirReadError::ExtraFile { name });
        }
    }

    let report: serde_json::Value = serde_json::from_slice(&report_bytes).map_err(|e| {
        ReportDirReadError::ReportParseError {
            detail: e.to_string(),
        }
    })?;
    let schema_version = report["schema_version"].as_str().unwrap_or("");
    if schema_version != RUN_REPORT_SCHEMA_VERSION {
        return Err(ReportDirReadError::SchemaVersionMismatch {
            found: schema_version.to_string(),
        });
    }

    let recomputed = domain_digest(DOMAIN_SEARCH_TRACE, &trace_bytes);
    let stored = String::from_utf8_lossy(&digest_bytes).trim().to_string();
    if stored != recomputed {
        return Err(ReportDirReadError::DigestMismatch { stored, recomputed });
    }
    let bound = report["trace_digest"].as_str().unwrap_or("");
    if bound != recomputed {
        return Err(ReportDirReadError::ReportBindingMismatch {
            bound: bound.to_string(),
            recomputed,
        });
    }

    Ok(StoredReportV1 {
        report,
        trace_bytes,
        trace_digest: recomputed,
    })
}

/// Write bytes via temp file + rename.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirWriteError> {
    let dir = path.parent().ok_or_else(|| ReportDirWriteError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, content).map_err(|e| ReportDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ReportDirWriteError::Io {
        detail: format!("rename {} to {}: {e}", temp_path.display(), path.display()),
    })
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirReadError> {
    std::fs::read(dir.join(filename)).map_err(|_| ReportDirReadError::MissingFile {
        filename: filename.to_string(),
    })
}

/// Regular files in `dir`, temp files from `write_atomic` excluded.
fn list_files(dir: &Path) -> Result<BTreeSet<String>, ReportDirReadError> {
    let io = |e: std::io::Error| ReportDirReadError::Io {
        detail: e.to_string(),
    };
    let mut files = BTreeSet::new();
    for entry in std::fs::read_dir(dir).map_err(io)? {
        let entry = entry.map_err(io)?;
        if entry.file_type().map_err(io)?.is_file() {
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with(".tmp_") {
                    files.insert(name.to_string());
                }
            }
        }
    }
    Ok(files)
}
