//! # Structural Optimizer
//!
//! Offline fallback used when Ghostscript is missing or fails. It rewrites the
//! document with `lopdf`: unreferenced objects and empty streams are dropped
//! and every stream is Flate-compressed. Images are not downsampled, so the
//! savings are usually modest.

use crate::compressor::PdfCompressor;
use crate::error::CompressError;
use crate::outcome::Method;
use async_trait::async_trait;
use lopdf::Document;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralOptimizer;

impl StructuralOptimizer {
    pub fn new() -> Self {
        Self
    }

    /// Blocking rewrite of `input` into `output`
    pub fn optimize_file(input: &Path, output: &Path) -> Result<(), CompressError> {
        let mut doc = Document::load(input)
            .map_err(|e| CompressError::CorruptOrUnreadablePdf(format!("{}: {}", input.display(), e)))?;

        let pruned = doc.prune_objects();
        let empty = doc.delete_zero_length_streams();
        doc.compress();
        debug!(
            "lopdf: pruned {} objects, removed {} empty streams in {}",
            pruned.len(),
            empty.len(),
            input.display()
        );

        doc.save(output)
            .map_err(|e| CompressError::CompressorFailed(format!("lopdf failed to save output: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl PdfCompressor for StructuralOptimizer {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn method(&self) -> Method {
        Method::Optimizer
    }

    async fn compress(&self, input: &Path, output: &Path) -> Result<String, CompressError> {
        let input: PathBuf = input.to_path_buf();
        let output: PathBuf = output.to_path_buf();

        tokio::task::spawn_blocking(move || Self::optimize_file(&input, &output))
            .await
            .map_err(|e| CompressError::CompressorFailed(format!("lopdf task failed: {}", e)))??;

        Ok("Optimized with lopdf (structure/streams).".to_string())
    }
}
