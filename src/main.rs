//! # pdfcompress - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Controlli pre-flight (input esistente, PDF valido, output creabile)
//! - Creazione della configurazione e avvio dell'optimizer
//! - Exit code: 0 ok, 1 tutti i file falliti, 2 errore fatale
//!
//! ## Esempio di utilizzo:
//! ```bash
//! pdfcompress --folder ~/Documents/scans --out ~/Documents/small --recursive --quality screen
//! ```

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pdfcompress::json_output::JsonMessage;
use pdfcompress::{Config, InputSpec, Job, PdfOptimizer, Quality};

/// Exit status for errors raised before any job runs
const EXIT_FATAL: u8 = 2;

#[derive(Parser)]
#[command(name = "pdfcompress")]
#[command(about = "Offline PDF compressor (Ghostscript preferred, lopdf fallback)")]
#[command(group(ArgGroup::new("input").required(true).args(["file", "folder"])))]
struct Args {
    /// Path to a single PDF file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Path to a folder containing PDFs
    #[arg(long, value_name = "PATH")]
    folder: Option<PathBuf>,

    /// Output folder
    #[arg(long, value_name = "DIR")]
    out: PathBuf,

    /// Compression quality (Ghostscript preset)
    #[arg(long, value_enum, default_value_t = Quality::Ebook)]
    quality: Quality,

    /// Recursively scan subfolders (only with --folder)
    #[arg(long, requires = "folder", conflicts_with = "file")]
    recursive: bool,

    /// Overwrite existing output files
    #[arg(long)]
    overwrite: bool,

    /// Show what would happen without writing files
    #[arg(long)]
    dry_run: bool,

    /// Timeout in seconds for each Ghostscript run
    #[arg(long, default_value = "600")]
    timeout: u64,

    /// Ghostscript executable (default: PDFCOMPRESS_GS, then PATH)
    #[arg(long, value_name = "PATH")]
    gs: Option<PathBuf>,

    /// Emit JSON events on stdout instead of report lines
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn input_spec(&self) -> Result<InputSpec> {
        match (&self.file, &self.folder) {
            (Some(_), None) if self.recursive => Err(anyhow::anyhow!("--recursive can only be used with --folder")),
            (Some(file), None) => Ok(InputSpec::File(file.clone())),
            (None, Some(folder)) => Ok(InputSpec::Folder { path: folder.clone(), recursive: self.recursive }),
            _ => Err(anyhow::anyhow!("Exactly one of --file or --folder is required")),
        }
    }

    fn config(&self) -> Config {
        Config {
            quality: self.quality,
            output_dir: self.out.clone(),
            recursive: self.recursive,
            overwrite: self.overwrite,
            dry_run: self.dry_run,
            engine_timeout_secs: self.timeout,
            gs_path: self.gs.clone(),
            json_output: self.json,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Pre-flight checks; nothing is processed if any of these fail
async fn prepare(args: &Args) -> Result<(Config, InputSpec, Vec<Job>)> {
    let config = args.config();
    config.validate()?;

    let spec = args.input_spec()?;
    spec.validate()?;

    let jobs = Job::enumerate(&spec, &config.output_dir)
        .with_context(|| format!("Failed to scan {}", spec.path().display()))?;

    if !config.dry_run && !config.output_dir.exists() {
        tokio::fs::create_dir_all(&config.output_dir)
            .await
            .with_context(|| format!("Failed to create output directory {}", config.output_dir.display()))?;
        info!("Created output directory: {}", config.output_dir.display());
    }

    Ok((config, spec, jobs))
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let (config, spec, jobs) = match prepare(&args).await {
        Ok(prepared) => prepared,
        Err(e) => {
            if args.json {
                JsonMessage::error(e.to_string(), Some(format!("{:#}", e))).emit();
            }
            error!("{:#}", e);
            return ExitCode::from(EXIT_FATAL);
        }
    };

    let report = PdfOptimizer::new(config).run(spec.path(), &jobs).await;
    ExitCode::from(report.exit_code() as u8)
}
