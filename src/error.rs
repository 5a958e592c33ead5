//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Categorie di errori:
//! - `InputNotFound`: Il file o la cartella di input non esiste
//! - `OutputPermissionDenied`: Impossibile scrivere nella destinazione
//! - `CorruptOrUnreadablePdf`: Il PDF non può essere letto dall'ottimizzatore
//! - `CompressorUnavailable`: Eseguibile del motore (gs) non trovato
//! - `CompressorFailed`: Exit code non-zero, timeout o errore di libreria
//! - `NotSmallerAfterCompression`: Non è un vero errore, diventa uno `SKIP`
//! - `Io` / `Validation`: Errori generici di I/O e di configurazione
//!
//! ## Esempio:
//! ```rust,ignore
//! if tool_path.is_none() {
//!     return Err(CompressError::CompressorUnavailable("gs".to_string()));
//! }
//! ```

use std::path::PathBuf;

/// Custom error types for PDF compression
#[derive(thiserror::Error, Debug)]
pub enum CompressError {
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Permission denied writing output: {}", .0.display())]
    OutputPermissionDenied(PathBuf),

    #[error("Corrupt or unreadable PDF: {0}")]
    CorruptOrUnreadablePdf(String),

    #[error("Compressor unavailable: {0}")]
    CompressorUnavailable(String),

    #[error("Compressor failed: {0}")]
    CompressorFailed(String),

    #[error("Output not smaller ({compressed} >= {original} bytes)")]
    NotSmallerAfterCompression { original: u64, compressed: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl CompressError {
    /// Map an I/O error raised while writing `path` to the matching variant
    pub fn from_write_error(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::OutputPermissionDenied(path.to_path_buf()),
            _ => Self::Io(err),
        }
    }
}
