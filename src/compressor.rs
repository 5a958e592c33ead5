//! Common seam for the two PDF compressors.
//!
//! Both the Ghostscript engine and the lopdf optimizer write a rewritten PDF
//! to an output path owned by the caller. The caller decides what to keep.

use crate::error::CompressError;
use crate::outcome::Method;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait PdfCompressor: Send + Sync {
    /// Tool name used in failure messages
    fn name(&self) -> &'static str;

    /// Method recorded on outcomes produced by this compressor
    fn method(&self) -> Method;

    /// Rewrite `input` into `output`, returning a short success message
    async fn compress(&self, input: &Path, output: &Path) -> Result<String, CompressError>;
}
