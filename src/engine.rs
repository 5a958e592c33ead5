//! # Ghostscript Engine Module
//!
//! Questo modulo gestisce la compressione preferita tramite Ghostscript.
//!
//! ## Responsabilità:
//! - Riscrittura del PDF con `gs -sDEVICE=pdfwrite`
//! - Controllo qualità tramite preset `-dPDFSETTINGS` (screen/ebook/printer/prepress)
//! - Timeout per invocazione, il processo viene terminato allo scadere
//! - Classificazione errori: eseguibile mancante vs. exit code non-zero
//!
//! ## Parametri Ghostscript:
//! - `-dCompatibilityLevel=1.4`
//! - `-dNOPAUSE -dBATCH -dSAFER`
//! - `-dDetectDuplicateImages=true`
//! - `-dCompressFonts=true -dSubsetFonts=true`
//!
//! ## Esempio:
//! ```rust,ignore
//! let engine = GhostscriptEngine::from_config(&config);
//! engine.compress(&input, &tmp_output).await?;
//! ```

use crate::args;
use crate::compressor::PdfCompressor;
use crate::config::{Config, Quality};
use crate::error::CompressError;
use crate::outcome::Method;
use crate::tool_resolver::ToolPathResolver;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::debug;

/// Handles PDF rewriting through Ghostscript
pub struct GhostscriptEngine {
    executable: Option<PathBuf>,
    quality: Quality,
    timeout: Duration,
}

impl GhostscriptEngine {
    pub fn new(executable: Option<PathBuf>, quality: Quality, timeout: Duration) -> Self {
        Self { executable, quality, timeout }
    }

    /// Resolve the executable once for the whole run
    pub fn from_config(config: &Config) -> Self {
        let engine = Self::new(
            ToolPathResolver::new(config.gs_path.clone()).resolve_gs(),
            config.quality,
            config.engine_timeout(),
        );
        match engine.executable {
            Some(ref path) => debug!("Using Ghostscript at {}", path.display()),
            None => debug!("Ghostscript not found, lopdf fallback only"),
        }
        engine
    }

    /// Command-line switches, without the output and input paths
    pub fn build_args(quality: Quality) -> Vec<String> {
        args![
            "-sDEVICE=pdfwrite",
            "-dCompatibilityLevel=1.4",
            "-dNOPAUSE",
            "-dBATCH",
            "-dSAFER",
            "-dQUIET",
            format!("-dPDFSETTINGS={}", quality.pdfsettings()).as_str(),
            "-dDetectDuplicateImages=true",
            "-dCompressFonts=true",
            "-dSubsetFonts=true",
        ]
    }

    fn failure_message(stderr: &[u8], stdout: &[u8]) -> String {
        let stderr = String::from_utf8_lossy(stderr);
        let stdout = String::from_utf8_lossy(stdout);
        if !stderr.trim().is_empty() {
            stderr.trim().to_string()
        } else if !stdout.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            "Ghostscript failed.".to_string()
        }
    }
}

#[async_trait]
impl PdfCompressor for GhostscriptEngine {
    fn name(&self) -> &'static str {
        "ghostscript"
    }

    fn method(&self) -> Method {
        Method::Engine(self.quality)
    }

    async fn compress(&self, input: &Path, output: &Path) -> Result<String, CompressError> {
        let executable = self
            .executable
            .as_ref()
            .ok_or_else(|| CompressError::CompressorUnavailable("Ghostscript (gs) not found.".to_string()))?;

        let mut output_arg = OsString::from("-sOutputFile=");
        output_arg.push(output);

        let mut cmd = Command::new(executable);
        cmd.args(Self::build_args(self.quality))
            .arg(output_arg)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(
            "Compressing {} with Ghostscript (preset: {})",
            input.display(),
            self.quality
        );
        let start_time = Instant::now();

        let result = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                CompressError::CompressorFailed(format!("Ghostscript timed out after {:?}", self.timeout))
            })?;

        let output_data = result.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CompressError::CompressorUnavailable(format!(
                "Ghostscript not executable at {}: {}",
                executable.display(),
                e
            )),
            _ => CompressError::CompressorFailed(format!("Ghostscript execution error: {}", e)),
        })?;

        let elapsed = start_time.elapsed();

        if !output_data.status.success() {
            debug!("Ghostscript failed after {:?} ({})", elapsed, output_data.status);
            return Err(CompressError::CompressorFailed(Self::failure_message(
                &output_data.stderr,
                &output_data.stdout,
            )));
        }

        if !tokio::fs::try_exists(output).await.unwrap_or(false) {
            return Err(CompressError::CompressorFailed(
                "Ghostscript produced no output file.".to_string(),
            ));
        }

        debug!("Ghostscript completed in {:?}", elapsed);
        Ok("Compressed with Ghostscript.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_build_args() {
        let args = GhostscriptEngine::build_args(Quality::Screen);
        assert_eq!(args[0], "-sDEVICE=pdfwrite");
        assert!(args.contains(&"-dPDFSETTINGS=/screen".to_string()));
        assert!(args.contains(&"-dSAFER".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("-sOutputFile")));
    }

    #[test]
    fn test_failure_message_preference() {
        assert_eq!(GhostscriptEngine::failure_message(b" bad pdf \n", b"out"), "bad pdf");
        assert_eq!(GhostscriptEngine::failure_message(b"", b"only stdout"), "only stdout");
        assert_eq!(GhostscriptEngine::failure_message(b"  ", b""), "Ghostscript failed.");
    }

    #[tokio::test]
    async fn test_missing_executable_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let engine = GhostscriptEngine::new(None, Quality::Ebook, Duration::from_secs(5));

        let err = engine
            .compress(&temp_dir.path().join("in.pdf"), &temp_dir.path().join("out.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, CompressError::CompressorUnavailable(_)));
    }

    #[tokio::test]
    async fn test_nonexistent_executable_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let engine = GhostscriptEngine::new(
            Some(temp_dir.path().join("no-such-gs")),
            Quality::Ebook,
            Duration::from_secs(5),
        );

        let err = engine
            .compress(&temp_dir.path().join("in.pdf"), &temp_dir.path().join("out.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, CompressError::CompressorUnavailable(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let script = temp_dir.path().join("fake-gs");
        std::fs::write(&script, "#!/bin/sh\necho 'Unrecoverable error' >&2\nexit 1\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let engine = GhostscriptEngine::new(Some(script), Quality::Printer, Duration::from_secs(10));
        let err = engine
            .compress(&temp_dir.path().join("in.pdf"), &temp_dir.path().join("out.pdf"))
            .await
            .unwrap_err();

        match err {
            CompressError::CompressorFailed(msg) => assert_eq!(msg, "Unrecoverable error"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hung_engine_times_out() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let script = temp_dir.path().join("fake-gs");
        std::fs::write(&script, "#!/bin/sh\nexec sleep 30\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let engine = GhostscriptEngine::new(Some(script), Quality::Ebook, Duration::from_secs(1));
        let start = Instant::now();
        let err = engine
            .compress(&temp_dir.path().join("in.pdf"), &temp_dir.path().join("out.pdf"))
            .await
            .unwrap_err();

        assert!(start.elapsed() < Duration::from_secs(10));
        match err {
            CompressError::CompressorFailed(msg) => assert!(msg.contains("timed out"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_success_without_output_is_failure() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let script = temp_dir.path().join("fake-gs");
        std::fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let engine = GhostscriptEngine::new(Some(script), Quality::Ebook, Duration::from_secs(10));
        let err = engine
            .compress(&temp_dir.path().join("in.pdf"), &temp_dir.path().join("out.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, CompressError::CompressorFailed(_)));
    }
}
