//! # PDF Optimizer Main Orchestrator
//!
//! Orchestratore principale: processa i job in sequenza, uno alla volta,
//! stampa l'esito di ciascuno e accumula il `BatchReport`. Un job fallito
//! non interrompe il batch.

use crate::{
    config::Config,
    job::Job,
    json_output::JsonMessage,
    optimizer::task_optimizer::TaskOptimizer,
    outcome::Outcome,
    progress::{BatchReport, ProgressManager},
};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Orchestratore principale
pub struct PdfOptimizer {
    task_optimizer: TaskOptimizer,
    progress: Option<ProgressManager>,
}

impl PdfOptimizer {
    /// Crea nuova istanza con Ghostscript + lopdf
    pub fn new(config: Config) -> Self {
        Self::with_task_optimizer(TaskOptimizer::from_config(config))
    }

    pub fn with_task_optimizer(task_optimizer: TaskOptimizer) -> Self {
        Self { task_optimizer, progress: None }
    }

    /// Use a specific progress manager instead of creating one per run
    pub fn with_progress(mut self, progress: ProgressManager) -> Self {
        self.progress = Some(progress);
        self
    }

    fn config(&self) -> &Config {
        self.task_optimizer.config()
    }

    /// Esegue il batch e ritorna le statistiche aggregate
    pub async fn run(&self, input: &Path, jobs: &[Job]) -> BatchReport {
        let start_time = Instant::now();
        let config = self.config();

        if config.json_output {
            JsonMessage::start(input, jobs.len(), config).emit();
        } else {
            self.log_configuration(input, jobs);
        }

        let mut report = BatchReport::new();

        if jobs.is_empty() {
            warn!("No PDF files found in: {}", input.display());
            if config.json_output {
                JsonMessage::complete(&report, start_time.elapsed().as_secs_f64()).emit();
            }
            return report;
        }

        let progress = match self.progress {
            Some(ref progress) => progress.clone(),
            None if config.json_output => ProgressManager::hidden(),
            None => ProgressManager::new(jobs.len() as u64),
        };

        for job in jobs {
            progress.set_message(&job.display_name());
            let outcome = self.task_optimizer.process_job(job).await;
            self.emit_outcome(&progress, &outcome);
            report.record(&outcome);
            progress.inc();
        }

        progress.finish();
        self.print_final_stats(&report, start_time.elapsed().as_secs_f64());
        report
    }

    fn emit_outcome(&self, progress: &ProgressManager, outcome: &Outcome) {
        if self.config().json_output {
            JsonMessage::file_complete(outcome).emit();
        } else {
            progress.print_lines(&[outcome.report_line(), outcome.info_line()]);
        }
    }

    /// Logga configurazione (solo se non JSON mode)
    fn log_configuration(&self, input: &Path, jobs: &[Job]) {
        let config = self.config();
        info!("Input: {}", input.display());
        info!("Output directory: {}", config.output_dir.display());
        info!("Quality preset: {}", config.quality);
        if config.recursive {
            info!("Recursive scan: subfolders included");
        }
        if config.overwrite {
            info!("Overwrite mode: existing output files will be replaced");
        }
        if config.dry_run {
            info!("Dry run mode: no files will be written");
        }
        info!("Found {} PDF files to process", jobs.len());
    }

    /// Stampa statistiche finali
    fn print_final_stats(&self, report: &BatchReport, duration: f64) {
        if self.config().json_output {
            JsonMessage::complete(report, duration).emit();
        } else if self.config().dry_run {
            info!("Dry run complete. Files scanned: {}", report.files_processed);
        } else {
            info!("{}", report.format_summary());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Quality;
    use crate::job::InputSpec;
    use crate::optimizer::task_optimizer::tests::FakeCompressor;
    use crate::outcome::Method;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_batch_continues_after_failure() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        std::fs::write(input.path().join("a.pdf"), vec![b'a'; 100]).unwrap();
        std::fs::create_dir_all(input.path().join("sub")).unwrap();
        std::fs::write(input.path().join("sub/b.pdf"), vec![b'b'; 5000]).unwrap();
        std::fs::write(input.path().join("sub/c.pdf"), vec![b'c'; 10]).unwrap();

        let spec = InputSpec::Folder { path: input.path().to_path_buf(), recursive: true };
        let jobs = Job::enumerate(&spec, output.path()).unwrap();
        assert_eq!(jobs.len(), 3);

        // Writes 50 bytes: smaller for a.pdf and b.pdf, larger for c.pdf
        let config = Config { output_dir: output.path().to_path_buf(), ..Default::default() };
        let task = TaskOptimizer::new(
            config,
            Box::new(FakeCompressor::failing(Method::Engine(Quality::Ebook))),
            Box::new(FakeCompressor::writing(Method::Optimizer, 50)),
        );
        let optimizer = PdfOptimizer::with_task_optimizer(task).with_progress(ProgressManager::hidden());

        let report = optimizer.run(input.path(), &jobs).await;
        assert_eq!(report.files_processed, 3);
        assert_eq!(report.files_ok, 2);
        assert_eq!(report.files_skipped, 1);
        assert_eq!(report.files_failed, 0);
        assert_eq!(report.total_bytes_saved(), 50 + 4950);
        assert_eq!(report.exit_code(), 0);

        assert!(output.path().join("a.pdf").exists());
        assert!(output.path().join("sub/b.pdf").exists());
        assert!(!output.path().join("sub/c.pdf").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_alone_with_real_fallback() {
        use crate::engine::GhostscriptEngine;
        use crate::structural::{tests::write_sample_pdf, StructuralOptimizer};
        use std::time::Duration;

        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_sample_pdf(&input.path().join("a.pdf"));
        std::fs::write(input.path().join("b.pdf"), b"%PDF-1.4 truncated garbage").unwrap();
        std::fs::create_dir_all(input.path().join("sub")).unwrap();
        write_sample_pdf(&input.path().join("sub/c.pdf"));

        let spec = InputSpec::Folder { path: input.path().to_path_buf(), recursive: true };
        let jobs = Job::enumerate(&spec, output.path()).unwrap();

        let config = Config { output_dir: output.path().to_path_buf(), ..Default::default() };
        let task = TaskOptimizer::new(
            config,
            Box::new(GhostscriptEngine::new(None, Quality::Ebook, Duration::from_secs(5))),
            Box::new(StructuralOptimizer::new()),
        );

        let optimizer = PdfOptimizer::with_task_optimizer(task).with_progress(ProgressManager::hidden());
        let report = optimizer.run(input.path(), &jobs).await;

        assert_eq!(report.files_ok, 2);
        assert_eq!(report.files_failed, 1);
        assert_eq!(report.files_skipped, 0);
        assert_eq!(report.exit_code(), 0);
        assert!(output.path().join("a.pdf").exists());
        assert!(!output.path().join("b.pdf").exists());
        assert!(output.path().join("sub/c.pdf").exists());
    }

    #[tokio::test]
    async fn test_all_failed_exit_code() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        std::fs::write(input.path().join("a.pdf"), b"junk").unwrap();
        std::fs::write(input.path().join("b.pdf"), b"junk").unwrap();

        let spec = InputSpec::Folder { path: input.path().to_path_buf(), recursive: false };
        let jobs = Job::enumerate(&spec, output.path()).unwrap();

        let config = Config { output_dir: output.path().to_path_buf(), ..Default::default() };
        let task = TaskOptimizer::new(
            config,
            Box::new(FakeCompressor::failing(Method::Engine(Quality::Ebook))),
            Box::new(FakeCompressor::failing(Method::Optimizer)),
        );
        let optimizer = PdfOptimizer::with_task_optimizer(task).with_progress(ProgressManager::hidden());

        let report = optimizer.run(input.path(), &jobs).await;
        assert_eq!(report.files_failed, 2);
        assert_eq!(report.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let input = TempDir::new().unwrap();
        let config = Config { output_dir: input.path().join("out"), ..Default::default() };
        let optimizer = PdfOptimizer::new(config).with_progress(ProgressManager::hidden());

        let report = optimizer.run(input.path(), &[]).await;
        assert_eq!(report.files_processed, 0);
        assert_eq!(report.exit_code(), 0);
    }
}
