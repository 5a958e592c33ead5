//! # pdfcompress Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Architettura dei moduli:
//! - `config`: Configurazione, preset di qualità e validazione
//! - `error`: Tipi di errore custom
//! - `file_manager`: Discovery dei PDF e utilità sulle dimensioni
//! - `job`: Enumerazione dei job da input file/cartella
//! - `outcome`: Esito per file (OK/SKIP/FAILED) e righe di report
//! - `compressor`: Trait comune ai due compressori
//! - `engine`: Compressione con Ghostscript (preferita)
//! - `structural`: Ottimizzazione strutturale con lopdf (fallback)
//! - `tool_resolver`: Ricerca dell'eseguibile Ghostscript
//! - `optimizer`: Orchestratore del batch e worker per file
//! - `progress`: Progress bar e statistiche aggregate
//! - `json_output`: Eventi JSON per uso programmatico
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use pdfcompress::{Config, InputSpec, Job, PdfOptimizer};
//! use std::path::PathBuf;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config { output_dir: PathBuf::from("/output"), ..Default::default() };
//! let spec = InputSpec::Folder { path: PathBuf::from("/input"), recursive: true };
//! let jobs = Job::enumerate(&spec, &config.output_dir)?;
//! let report = PdfOptimizer::new(config).run(spec.path(), &jobs).await;
//! std::process::exit(report.exit_code());
//! # }
//! ```

pub mod compressor;
pub mod config;
pub mod engine;
pub mod error;
pub mod file_manager;
pub mod job;
pub mod json_output;
pub mod optimizer;
pub mod outcome;
pub mod progress;
pub mod structural;
pub mod tool_resolver;
pub mod utils;

pub use compressor::PdfCompressor;
pub use config::{Config, Quality};
pub use error::CompressError;
pub use job::{InputSpec, Job};
pub use optimizer::{PdfOptimizer, TaskOptimizer};
pub use outcome::{Method, Outcome, OutcomeKind, SkipReason};
pub use progress::BatchReport;
