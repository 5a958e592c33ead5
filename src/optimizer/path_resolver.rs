//! # Path Resolution Module
//!
//! Centralizza tutta la logica di calcolo dei path di output.
//! In modalità cartella la struttura relativa viene replicata sotto `--out`.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Path relativo usato per l'output e per il report.
    ///
    /// Con `input_base_dir` il path è relativo alla cartella di input,
    /// altrimenti (modalità file singolo) è il solo nome del file.
    pub fn relative_path(input_path: &Path, input_base_dir: Option<&Path>) -> Result<PathBuf> {
        let file_name = input_path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", input_path.display()))?;

        let Some(base) = input_base_dir else {
            return Ok(PathBuf::from(file_name));
        };

        match input_path.strip_prefix(base) {
            Ok(rel) if !rel.as_os_str().is_empty() => {
                debug!("[OK] Strip prefix successful: {}", rel.display());
                Ok(rel.to_path_buf())
            }
            _ => {
                debug!("[ERROR] Strip prefix failed for {} - fallback to file name", input_path.display());
                Ok(PathBuf::from(file_name))
            }
        }
    }

    /// Calcola il path di output per un file dato
    pub fn get_output_path(
        input_path: &Path,
        input_base_dir: Option<&Path>,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let relative = Self::relative_path(input_path, input_base_dir)?;
        let result = output_dir.join(relative);
        debug!("Resolved output path: {} -> {}", input_path.display(), result.display());
        Ok(result)
    }

    /// Crea le directory parent se necessario
    pub async fn ensure_parent_dirs(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }
}
