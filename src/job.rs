//! # Job Enumeration
//!
//! Turns the `--file` / `--folder` input into an ordered list of [`Job`]s,
//! each carrying its relative name and destination under the output folder.

use crate::error::CompressError;
use crate::file_manager::FileManager;
use crate::optimizer::path_resolver::PathResolver;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What the user asked to compress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    File(PathBuf),
    Folder { path: PathBuf, recursive: bool },
}

impl InputSpec {
    pub fn path(&self) -> &Path {
        match self {
            Self::File(path) => path,
            Self::Folder { path, .. } => path,
        }
    }

    /// Pre-flight checks, run before any job is created
    pub fn validate(&self) -> Result<(), CompressError> {
        match self {
            Self::File(path) => {
                if !path.is_file() {
                    return Err(CompressError::InputNotFound(path.clone()));
                }
                if !FileManager::is_pdf(path) {
                    return Err(CompressError::Validation(format!("Not a PDF: {}", path.display())));
                }
            }
            Self::Folder { path, .. } => {
                if !path.exists() {
                    return Err(CompressError::InputNotFound(path.clone()));
                }
                if !path.is_dir() {
                    return Err(CompressError::Validation(format!(
                        "Folder is not a directory: {}",
                        path.display()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// One PDF slated for compression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    input: PathBuf,
    relative: PathBuf,
    output: PathBuf,
}

impl Job {
    pub fn new(input: PathBuf, relative: PathBuf, output: PathBuf) -> Self {
        Self { input, relative, output }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Path relative to the input folder (file name in single-file mode)
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Relative name used in report lines
    pub fn display_name(&self) -> String {
        self.relative().to_string_lossy().into_owned()
    }

    /// Build the ordered job list for an input
    pub fn enumerate(spec: &InputSpec, output_dir: &Path) -> Result<Vec<Job>> {
        let (files, base) = match spec {
            InputSpec::File(path) => (vec![path.clone()], None),
            InputSpec::Folder { path, recursive } => {
                (FileManager::find_pdf_files(path, *recursive)?, Some(path.as_path()))
            }
        };

        let jobs = files
            .into_iter()
            .map(|input| {
                let relative = PathResolver::relative_path(&input, base)?;
                let output = PathResolver::get_output_path(&input, base, output_dir)?;
                debug!("Job: {} -> {}", input.display(), output.display());
                Ok(Job::new(input, relative, output))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(jobs)
    }
}
