//! # Per-file Outcome
//!
//! The immutable record of what happened to one [`Job`]: `OK`, `SKIP` or
//! `FAILED`, the sizes involved, and the compressor that produced the result.
//!
//! An `OK` outcome always has `compressed_size < original_size` and a written
//! destination file. Constructors enforce the strict comparison.

use crate::config::Quality;
use crate::error::CompressError;
use crate::file_manager::FileManager;
use crate::job::Job;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutcomeKind {
    Ok,
    Skip,
    Failed,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "OK",
            Self::Skip => "SKIP",
            Self::Failed => "FAILED",
        })
    }
}

/// Why a job ended in `SKIP`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    AlreadyExists,
    NotSmaller,
    DryRun,
}

/// Which compressor produced the kept (or discarded) file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Engine(Quality),
    Optimizer,
    DryRun,
    None,
}

impl Method {
    /// Short machine label: `engine:<preset>`, `optimizer`, `dry-run`, `none`
    pub fn label(&self) -> String {
        match self {
            Self::Engine(quality) => format!("engine:{}", quality),
            Self::Optimizer => "optimizer".to_string(),
            Self::DryRun => "dry-run".to_string(),
            Self::None => "none".to_string(),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(quality) => write!(f, "ghostscript({})", quality),
            Self::Optimizer => f.write_str("lopdf(optimize)"),
            Self::DryRun => f.write_str("dry-run"),
            Self::None => f.write_str("none"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub skip_reason: Option<SkipReason>,
    pub input: PathBuf,
    pub output: PathBuf,
    pub name: String,
    pub original_size: u64,
    pub compressed_size: Option<u64>,
    pub method: Method,
    pub message: String,
}

impl Outcome {
    fn base(job: &Job, kind: OutcomeKind, original_size: u64, method: Method, message: String) -> Self {
        Self {
            kind,
            skip_reason: None,
            input: job.input().to_path_buf(),
            output: job.output().to_path_buf(),
            name: job.display_name(),
            original_size,
            compressed_size: None,
            method,
            message,
        }
    }

    /// Kept result. Falls back to a not-smaller `SKIP` if the sizes don't
    /// satisfy the strict comparison.
    pub fn ok(job: &Job, method: Method, original_size: u64, compressed_size: u64, message: impl Into<String>) -> Self {
        if compressed_size >= original_size {
            return Self::not_smaller(job, method, original_size, compressed_size, message);
        }
        let mut outcome = Self::base(job, OutcomeKind::Ok, original_size, method, message.into());
        outcome.compressed_size = Some(compressed_size);
        outcome
    }

    pub fn not_smaller(job: &Job, method: Method, original_size: u64, compressed_size: u64, detail: impl Into<String>) -> Self {
        let reason = CompressError::NotSmallerAfterCompression { original: original_size, compressed: compressed_size };
        let message = format!("{}. {}", reason, detail.into());
        let mut outcome = Self::base(job, OutcomeKind::Skip, original_size, method, message);
        outcome.skip_reason = Some(SkipReason::NotSmaller);
        outcome.compressed_size = Some(compressed_size);
        outcome
    }

    pub fn already_exists(job: &Job, original_size: u64) -> Self {
        let message = format!("Output already exists (use --overwrite): {}", job.output().display());
        let mut outcome = Self::base(job, OutcomeKind::Skip, original_size, Method::None, message);
        outcome.skip_reason = Some(SkipReason::AlreadyExists);
        outcome
    }

    pub fn dry_run(job: &Job, original_size: u64) -> Self {
        let message = format!("Dry run: not performed, would write {}", job.output().display());
        let mut outcome = Self::base(job, OutcomeKind::Skip, original_size, Method::DryRun, message);
        outcome.skip_reason = Some(SkipReason::DryRun);
        outcome
    }

    pub fn failed(job: &Job, original_size: u64, message: impl Into<String>) -> Self {
        Self::base(job, OutcomeKind::Failed, original_size, Method::None, message.into())
    }

    /// Bytes saved by a kept result, zero otherwise
    pub fn saved_bytes(&self) -> u64 {
        match (self.kind, self.compressed_size) {
            (OutcomeKind::Ok, Some(compressed)) => self.original_size.saturating_sub(compressed),
            _ => 0,
        }
    }

    pub fn saved_percent(&self) -> f64 {
        match (self.kind, self.compressed_size) {
            (OutcomeKind::Ok, Some(compressed)) => FileManager::calculate_reduction(self.original_size, compressed),
            _ => 0.0,
        }
    }

    /// `[KIND] src -> dst | method | before -> after | saved: bytes (pct%)`
    pub fn report_line(&self) -> String {
        let after = self
            .compressed_size
            .map(FileManager::format_size)
            .unwrap_or_else(|| "-".to_string());

        format!(
            "[{}] {} -> {} | {} | {} -> {} | saved: {} ({:.2}%)",
            self.kind,
            self.name,
            self.name,
            self.method,
            FileManager::format_size(self.original_size),
            after,
            FileManager::format_size(self.saved_bytes()),
            self.saved_percent()
        )
    }

    pub fn info_line(&self) -> String {
        format!("INFO: {}: {}", self.name, self.message)
    }
}
