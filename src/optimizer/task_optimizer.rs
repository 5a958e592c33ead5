//! # Task Optimizer Module
//!
//! Worker per la compressione di un singolo file.
//!
//! ## Pipeline per ogni Job:
//! 1. Destinazione già esistente senza `--overwrite` → `SKIP`
//! 2. Dry run → `SKIP` simulato, nessun compressore, nessun file scritto
//! 3. Ghostscript in una directory temporanea del job
//! 4. Se fallisce, fallback lopdf; se fallisce anche quello → `FAILED`
//! 5. Solo se l'output è strettamente più piccolo viene spostato nella
//!    destinazione, altrimenti viene scartato → `SKIP`
//!
//! La directory temporanea è posseduta dal job e viene rimossa su ogni
//! percorso di uscita.

use crate::{
    compressor::PdfCompressor,
    config::Config,
    engine::GhostscriptEngine,
    error::CompressError,
    file_manager::FileManager,
    job::Job,
    optimizer::path_resolver::PathResolver,
    outcome::{Method, Outcome},
    structural::StructuralOptimizer,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Worker per elaborazione singoli file
pub struct TaskOptimizer {
    config: Config,
    engine: Box<dyn PdfCompressor>,
    fallback: Box<dyn PdfCompressor>,
}

impl TaskOptimizer {
    pub fn new(config: Config, engine: Box<dyn PdfCompressor>, fallback: Box<dyn PdfCompressor>) -> Self {
        Self { config, engine, fallback }
    }

    /// Ghostscript preferito, lopdf come fallback
    pub fn from_config(config: Config) -> Self {
        let engine = GhostscriptEngine::from_config(&config);
        Self::new(config, Box::new(engine), Box::new(StructuralOptimizer::new()))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Processa un singolo job. Gli errori diventano un `Outcome` `FAILED`.
    pub async fn process_job(&self, job: &Job) -> Outcome {
        let original_size = match FileManager::get_file_size(job.input()).await {
            Ok(size) => size,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Outcome::failed(job, 0, CompressError::InputNotFound(job.input().to_path_buf()).to_string());
            }
            Err(e) => return Outcome::failed(job, 0, CompressError::Io(e).to_string()),
        };

        if !self.config.overwrite && tokio::fs::try_exists(job.output()).await.unwrap_or(false) {
            debug!("[SKIP] Output already exists: {}", job.output().display());
            return Outcome::already_exists(job, original_size);
        }

        if self.config.dry_run {
            return Outcome::dry_run(job, original_size);
        }

        match self.compress_and_commit(job, original_size).await {
            Ok(outcome) => outcome,
            Err(CompressError::Io(e)) if e.kind() == io::ErrorKind::AlreadyExists => {
                // Destination appeared while compressing
                Outcome::already_exists(job, original_size)
            }
            Err(e) => Outcome::failed(job, original_size, e.to_string()),
        }
    }

    async fn compress_and_commit(&self, job: &Job, original_size: u64) -> Result<Outcome, CompressError> {
        let scratch = tempfile::Builder::new().prefix("pdfcompress_").tempdir()?;
        let stem = job
            .input()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let tmp_out = scratch.path().join(format!("{}.compressed.pdf", stem));

        let (method, message) = self.run_compressors(job, &tmp_out).await?;

        let compressed_size = FileManager::get_file_size(&tmp_out).await?;
        debug!(
            "{}: {} -> {} bytes with {}",
            job.display_name(),
            original_size,
            compressed_size,
            method
        );

        if compressed_size >= original_size {
            return Ok(Outcome::not_smaller(job, method, original_size, compressed_size, message));
        }

        Self::commit(&tmp_out, job.output(), self.config.overwrite).await?;
        Ok(Outcome::ok(job, method, original_size, compressed_size, message))
    }

    /// Preferred compressor first, fallback on any failure
    async fn run_compressors(&self, job: &Job, tmp_out: &Path) -> Result<(Method, String), CompressError> {
        let primary_err = match self.engine.compress(job.input(), tmp_out).await {
            Ok(message) => return Ok((self.engine.method(), message)),
            Err(e) => e,
        };

        match primary_err {
            CompressError::CompressorUnavailable(ref msg) => {
                debug!("{} unavailable for {}: {}", self.engine.name(), job.display_name(), msg)
            }
            ref e => warn!("{} failed for {}: {}", self.engine.name(), job.display_name(), e),
        }
        let _ = tokio::fs::remove_file(tmp_out).await;

        match self.fallback.compress(job.input(), tmp_out).await {
            Ok(message) => Ok((self.fallback.method(), message)),
            Err(fallback_err) => Err(CompressError::CompressorFailed(format!(
                "{}: {} | {}: {}",
                self.engine.name(),
                primary_err,
                self.fallback.name(),
                fallback_err
            ))),
        }
    }

    /// Move the compressed file into place through a temp file in the
    /// destination directory. Without `overwrite` an existing destination
    /// is never replaced.
    async fn commit(tmp_out: &Path, destination: &Path, overwrite: bool) -> Result<(), CompressError> {
        PathResolver::ensure_parent_dirs(destination)
            .await
            .map_err(|e| CompressError::from_write_error(destination, e))?;

        let source = tmp_out.to_path_buf();
        let destination: PathBuf = destination.to_path_buf();

        tokio::task::spawn_blocking(move || -> Result<(), CompressError> {
            let parent = destination
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));

            let write = || -> io::Result<()> {
                let mut staged = tempfile::Builder::new()
                    .prefix(".pdfcompress-")
                    .suffix(".pdf")
                    .tempfile_in(parent)?;
                let mut reader = std::fs::File::open(&source)?;
                io::copy(&mut reader, staged.as_file_mut())?;
                staged.as_file().sync_all()?;

                if overwrite {
                    staged.persist(&destination).map_err(|e| e.error)?;
                } else {
                    staged.persist_noclobber(&destination).map_err(|e| e.error)?;
                }
                Ok(())
            };

            write().map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => CompressError::Io(e),
                _ => CompressError::from_write_error(&destination, e),
            })
        })
        .await
        .map_err(|e| CompressError::Io(io::Error::new(io::ErrorKind::Other, e)))?
    }
}
