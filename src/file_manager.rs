//! # File Management Module
//!
//! Questo modulo gestisce le operazioni sui file e la discovery dei PDF.
//!
//! ## Responsabilità:
//! - Discovery (ricorsiva o solo primo livello) di file PDF in una directory
//! - Riconoscimento estensione `.pdf` case-insensitive
//! - Utilità per dimensioni file e percentuali di riduzione
//! - Formattazione human-readable delle dimensioni
//!
//! ## Ordinamento:
//! I file trovati sono ordinati lessicograficamente per path, così l'output
//! di due esecuzioni sulla stessa cartella è identico.
//!
//! ## Esempio:
//! ```rust,ignore
//! let files = FileManager::find_pdf_files(Path::new("/input"), true)?;
//! for file in files {
//!     let size = FileManager::get_file_size(&file).await?;
//! }
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;
use walkdir::WalkDir;

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Size in bytes of a file
    pub async fn get_file_size(path: &Path) -> std::io::Result<u64> {
        Ok(fs::metadata(path).await?.len())
    }

    /// Find all PDF files in a directory, sorted by path
    pub fn find_pdf_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(anyhow::anyhow!("Not a directory: {}", dir.display()));
        }

        let mut walker = WalkDir::new(dir).follow_links(false);
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker.into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry while scanning {}: {}", dir.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_file() && Self::is_pdf(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Check if a file has a `.pdf` extension (any case)
    pub fn is_pdf(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
            .unwrap_or(false)
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Calculate percentage reduction (0 when the original is empty)
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"%PDF-1.4").unwrap();
    }

    #[test]
    fn test_is_pdf() {
        assert!(FileManager::is_pdf(Path::new("a.pdf")));
        assert!(FileManager::is_pdf(Path::new("dir/B.PDF")));
        assert!(FileManager::is_pdf(Path::new("c.Pdf")));
        assert!(!FileManager::is_pdf(Path::new("notes.txt")));
        assert!(!FileManager::is_pdf(Path::new("pdf")));
    }

    #[test]
    fn test_find_pdf_files_flat_and_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("b.pdf"));
        touch(&root.join("a.PDF"));
        touch(&root.join("readme.txt"));
        touch(&root.join("sub/c.pdf"));
        touch(&root.join("sub/deeper/d.pdf"));

        let flat = FileManager::find_pdf_files(root, false).unwrap();
        assert_eq!(flat, vec![root.join("a.PDF"), root.join("b.pdf")]);

        let all = FileManager::find_pdf_files(root, true).unwrap();
        assert_eq!(
            all,
            vec![
                root.join("a.PDF"),
                root.join("b.pdf"),
                root.join("sub/c.pdf"),
                root.join("sub/deeper/d.pdf"),
            ]
        );
    }

    #[test]
    fn test_find_pdf_files_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("x.pdf");
        touch(&file);
        assert!(FileManager::find_pdf_files(&file, false).is_err());
    }

    #[test]
    fn test_get_file_size() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("x.pdf");
        std::fs::write(&file, vec![0u8; 1234]).unwrap();

        assert_eq!(tokio_test::block_on(FileManager::get_file_size(&file)).unwrap(), 1234);
        assert!(tokio_test::block_on(FileManager::get_file_size(&temp_dir.path().join("none.pdf"))).is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(0), "0 B");
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(1536), "1.50 KB");
        assert_eq!(FileManager::format_size(12_897_485), "12.30 MB");
        assert_eq!(FileManager::format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_calculate_reduction() {
        assert_eq!(FileManager::calculate_reduction(0, 0), 0.0);
        assert_eq!(FileManager::calculate_reduction(200, 50), 75.0);

        // 12.30 MB -> 4.85 MB
        let pct = FileManager::calculate_reduction(12_897_485, 5_085_594);
        assert_eq!(format!("{:.2}", pct), "60.57");
        assert_eq!(FileManager::format_size(12_897_485 - 5_085_594), "7.45 MB");
    }
}
