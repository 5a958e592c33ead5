//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche della compressione.
//!
//! ## Componenti principali:
//! - `ProgressManager`: Barra di progresso `indicatif` (su stderr); le righe
//!   di report vengono stampate su stdout sospendendo la barra
//! - `BatchReport`: Contatori OK/SKIP/FAILED e byte risparmiati
//!
//! ## Statistiche tracciate:
//! - **files_ok**: File compressi e scritti
//! - **files_skipped**: Già esistenti, non più piccoli, o dry run
//! - **files_failed**: Entrambi i compressori falliti o errore di I/O
//! - **bytes_before / bytes_after**: Dimensioni dei soli file scritti
//!
//! ## Visual feedback:
//! ```text
//! [00:00:12] [========>-------------------------------] 3/14 (21%) sub/report.pdf
//! ```

use crate::file_manager::FileManager;
use crate::outcome::{Outcome, OutcomeKind};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for a batch
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Progress manager that never draws
    pub fn hidden() -> Self {
        Self { bar: ProgressBar::hidden() }
    }

    /// Set a custom message without incrementing
    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Advance by one file
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Print lines to stdout without tearing the bar
    pub fn print_lines(&self, lines: &[String]) {
        self.bar.suspend(|| {
            for line in lines {
                println!("{}", line);
            }
        });
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Aggregate statistics for one run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchReport {
    pub files_processed: usize,
    pub files_ok: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    /// Original size of the files that were written
    pub bytes_before: u64,
    /// Compressed size of the files that were written
    pub bytes_after: u64,
    /// Original size of every file seen
    pub bytes_scanned: u64,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &Outcome) {
        self.files_processed += 1;
        self.bytes_scanned += outcome.original_size;

        match outcome.kind {
            OutcomeKind::Ok => {
                self.files_ok += 1;
                self.bytes_before += outcome.original_size;
                self.bytes_after += outcome.compressed_size.unwrap_or(outcome.original_size);
            }
            OutcomeKind::Skip => self.files_skipped += 1,
            OutcomeKind::Failed => self.files_failed += 1,
        }
    }

    pub fn total_bytes_saved(&self) -> u64 {
        self.bytes_before.saturating_sub(self.bytes_after)
    }

    pub fn overall_reduction_percent(&self) -> f64 {
        FileManager::calculate_reduction(self.bytes_before, self.bytes_after)
    }

    /// True when there was work and none of it succeeded or skipped cleanly
    pub fn all_failed(&self) -> bool {
        self.files_processed > 0 && self.files_failed == self.files_processed
    }

    /// Process exit status for this batch
    pub fn exit_code(&self) -> i32 {
        if self.all_failed() {
            1
        } else {
            0
        }
    }

    pub fn format_summary(&self) -> String {
        if self.files_ok == 0 {
            return format!(
                "Summary: no files were compressed (skipped={}, failed={}).",
                self.files_skipped, self.files_failed
            );
        }

        format!(
            "Summary: saved={}, skipped={}, failed={} | total: {} -> {} (saved {}, {:.2}%)",
            self.files_ok,
            self.files_skipped,
            self.files_failed,
            FileManager::format_size(self.bytes_before),
            FileManager::format_size(self.bytes_after),
            FileManager::format_size(self.total_bytes_saved()),
            self.overall_reduction_percent()
        )
    }
}
