//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso da script.
//!
//! ## Tipi di messaggi (uno per riga su stdout):
//! - `start`: Inizio del batch
//! - `file_complete`: Esito di un singolo file
//! - `complete`: Fine del batch con statistiche finali
//! - `error`: Errore fatale prima dell'avvio dei job

use crate::config::{Config, Quality};
use crate::outcome::{Outcome, OutcomeKind, SkipReason};
use crate::progress::BatchReport;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tipo di messaggio JSON
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsonMessage {
    #[serde(rename = "start")]
    Start {
        input: PathBuf,
        output_dir: PathBuf,
        total_files: usize,
        quality: Quality,
        dry_run: bool,
    },

    #[serde(rename = "file_complete")]
    FileComplete {
        path: String,
        output: PathBuf,
        status: OutcomeKind,
        skip_reason: Option<SkipReason>,
        method: String,
        original_size: u64,
        compressed_size: Option<u64>,
        saved_bytes: u64,
        saved_percent: f64,
        message: String,
    },

    #[serde(rename = "complete")]
    Complete {
        files_processed: usize,
        files_ok: usize,
        files_skipped: usize,
        files_failed: usize,
        total_bytes_scanned: u64,
        total_bytes_saved: u64,
        average_reduction: f64,
        duration_seconds: f64,
    },

    #[serde(rename = "error")]
    Error {
        message: String,
        details: Option<String>,
    },
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(input: &Path, total_files: usize, config: &Config) -> Self {
        Self::Start {
            input: input.to_path_buf(),
            output_dir: config.output_dir.clone(),
            total_files,
            quality: config.quality,
            dry_run: config.dry_run,
        }
    }

    pub fn file_complete(outcome: &Outcome) -> Self {
        Self::FileComplete {
            path: outcome.name.clone(),
            output: outcome.output.clone(),
            status: outcome.kind,
            skip_reason: outcome.skip_reason,
            method: outcome.method.label(),
            original_size: outcome.original_size,
            compressed_size: outcome.compressed_size,
            saved_bytes: outcome.saved_bytes(),
            saved_percent: outcome.saved_percent(),
            message: outcome.message.clone(),
        }
    }

    pub fn complete(report: &BatchReport, duration_seconds: f64) -> Self {
        Self::Complete {
            files_processed: report.files_processed,
            files_ok: report.files_ok,
            files_skipped: report.files_skipped,
            files_failed: report.files_failed,
            total_bytes_scanned: report.bytes_scanned,
            total_bytes_saved: report.total_bytes_saved(),
            average_reduction: report.overall_reduction_percent(),
            duration_seconds,
        }
    }

    pub fn error(message: String, details: Option<String>) -> Self {
        Self::Error { message, details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::Job;
    use crate::outcome::Method;
    use serde_json::Value;

    #[test]
    fn test_file_complete_shape() {
        let job = Job::new(
            PathBuf::from("/in/sub/a.pdf"),
            PathBuf::from("sub/a.pdf"),
            PathBuf::from("/out/sub/a.pdf"),
        );
        let outcome = Outcome::ok(&job, Method::Engine(Quality::Screen), 1000, 250, "Compressed with Ghostscript.");

        let value: Value = serde_json::to_value(JsonMessage::file_complete(&outcome)).unwrap();
        assert_eq!(value["type"], "file_complete");
        assert_eq!(value["status"], "OK");
        assert_eq!(value["method"], "engine:screen");
        assert_eq!(value["saved_bytes"], 750);
        assert_eq!(value["saved_percent"], 75.0);
        assert_eq!(value["skip_reason"], Value::Null);
    }

    #[test]
    fn test_skip_reason_serialized() {
        let job = Job::new(PathBuf::from("/in/a.pdf"), PathBuf::from("a.pdf"), PathBuf::from("/out/a.pdf"));
        let outcome = Outcome::already_exists(&job, 10);

        let value: Value = serde_json::to_value(JsonMessage::file_complete(&outcome)).unwrap();
        assert_eq!(value["status"], "SKIP");
        assert_eq!(value["skip_reason"], "already_exists");
        assert_eq!(value["compressed_size"], Value::Null);
    }

    #[test]
    fn test_complete_totals() {
        let kept = Job::new(PathBuf::from("/in/a.pdf"), PathBuf::from("a.pdf"), PathBuf::from("/out/a.pdf"));
        let skipped = Job::new(PathBuf::from("/in/b.pdf"), PathBuf::from("b.pdf"), PathBuf::from("/out/b.pdf"));
        let mut report = BatchReport::new();
        report.record(&Outcome::ok(&kept, Method::Optimizer, 1000, 400, ""));
        report.record(&Outcome::already_exists(&skipped, 500));

        let value: Value = serde_json::to_value(JsonMessage::complete(&report, 1.5)).unwrap();
        assert_eq!(value["type"], "complete");
        assert_eq!(value["files_processed"], 2);
        assert_eq!(value["files_ok"], 1);
        assert_eq!(value["files_skipped"], 1);
        assert_eq!(value["total_bytes_scanned"], 1500);
        assert_eq!(value["total_bytes_saved"], 600);
        assert_eq!(value["average_reduction"], 60.0);
    }

    #[test]
    fn test_start_and_error() {
        let config = Config { dry_run: true, ..Default::default() };
        let value: Value = serde_json::to_value(JsonMessage::start(Path::new("/in"), 3, &config)).unwrap();
        assert_eq!(value["type"], "start");
        assert_eq!(value["quality"], "ebook");
        assert_eq!(value["total_files"], 3);
        assert_eq!(value["dry_run"], true);

        let value: Value = serde_json::to_value(JsonMessage::error("Input not found".into(), None)).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["message"], "Input not found");
    }
}
