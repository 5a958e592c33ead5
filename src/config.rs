//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di compressione
//! - Definisce `Quality`, il preset di qualità passato a Ghostscript
//! - Fornisce validazione dei parametri di input
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `quality`: Preset Ghostscript (screen|ebook|printer|prepress, default: ebook)
//! - `output_dir`: Directory di output (obbligatoria)
//! - `recursive`: Scansione ricorsiva delle sottocartelle (default: false)
//! - `overwrite`: Sovrascrive file di output esistenti (default: false)
//! - `dry_run`: Simulazione senza scrivere file (default: false)
//! - `engine_timeout_secs`: Timeout per ogni invocazione di gs (default: 600)
//! - `gs_path`: Eseguibile Ghostscript esplicito (default: ricerca nel PATH)
//! - `json_output`: Eventi JSON su stdout invece delle righe di report
//!
//! ## Esempio:
//! ```rust,ignore
//! let config = Config {
//!     quality: Quality::Screen,
//!     output_dir: PathBuf::from("/output"),
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Ghostscript quality preset (`-dPDFSETTINGS`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// 72 dpi images, smallest output
    Screen,
    /// 150 dpi images
    #[default]
    Ebook,
    /// 300 dpi images
    Printer,
    /// Colour-preserving, 300 dpi
    Prepress,
}

impl Quality {
    /// Value for Ghostscript's `-dPDFSETTINGS=` switch
    pub fn pdfsettings(&self) -> &'static str {
        match self {
            Self::Screen => "/screen",
            Self::Ebook => "/ebook",
            Self::Printer => "/printer",
            Self::Prepress => "/prepress",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Screen => "screen",
            Self::Ebook => "ebook",
            Self::Printer => "printer",
            Self::Prepress => "prepress",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a compression run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ghostscript quality preset
    pub quality: Quality,
    /// Output directory, mirrors the input structure
    pub output_dir: PathBuf,
    /// Scan subfolders (folder mode only)
    pub recursive: bool,
    /// Replace existing output files
    pub overwrite: bool,
    /// Dry run - don't invoke compressors or write files
    pub dry_run: bool,
    /// Wall-clock limit for one Ghostscript invocation
    pub engine_timeout_secs: u64,
    /// Explicit Ghostscript executable
    pub gs_path: Option<PathBuf>,
    /// Output progress and results as JSON for programmatic use
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            output_dir: PathBuf::from("compressed"),
            recursive: false,
            overwrite: false,
            dry_run: false,
            engine_timeout_secs: 600,
            gs_path: None,
            json_output: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.engine_timeout_secs == 0 {
            return Err(anyhow::anyhow!("Engine timeout must be greater than 0 seconds"));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Output directory must not be empty"));
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(anyhow::anyhow!(
                "Output path is not a directory: {}",
                self.output_dir.display()
            ));
        }

        if let Some(ref gs) = self.gs_path {
            if !gs.is_file() {
                return Err(anyhow::anyhow!("Ghostscript executable not found: {}", gs.display()));
            }
        }

        Ok(())
    }

    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout_secs)
    }
}
