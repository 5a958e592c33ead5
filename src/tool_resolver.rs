//! # Tool Path Resolver
//!
//! This module handles finding the Ghostscript executable:
//! - Explicit path from the command line (`--gs`)
//! - `PDFCOMPRESS_GS` environment variable
//! - System `PATH` (`gs`, or `gswin64c` / `gswin32c` on Windows)

use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the Ghostscript location
pub const GS_ENV_VAR: &str = "PDFCOMPRESS_GS";

/// Tool path resolver for the external engine
pub struct ToolPathResolver {
    explicit: Option<PathBuf>,
}

impl ToolPathResolver {
    /// Create a new path resolver, `explicit` wins over every other strategy
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    /// Executable names tried in `PATH`, in order of preference
    pub fn gs_candidates() -> &'static [&'static str] {
        if cfg!(windows) {
            &["gswin64c", "gswin32c", "gs"]
        } else {
            &["gs"]
        }
    }

    /// Resolve the Ghostscript executable
    pub fn resolve_gs(&self) -> Option<PathBuf> {
        // Strategy 1: explicit path
        if let Some(ref path) = self.explicit {
            debug!("Checking explicit Ghostscript path: {:?}", path);
            if path.is_file() {
                return Some(path.clone());
            }
            warn!("Explicit Ghostscript path does not exist: {}", path.display());
        }

        // Strategy 2: environment override
        if let Some(path) = env::var_os(GS_ENV_VAR).map(PathBuf::from) {
            debug!("Checking {}: {:?}", GS_ENV_VAR, path);
            if path.is_file() {
                return Some(path);
            }
            warn!("{} points to a missing file: {}", GS_ENV_VAR, path.display());
        }

        // Strategy 3: system PATH
        let path_var = env::var_os("PATH")?;
        Self::gs_candidates()
            .iter()
            .find_map(|name| Self::find_in_dirs(env::split_paths(&path_var), name))
    }

    /// Find tool in a list of directories
    fn find_in_dirs<I>(dirs: I, tool_name: &str) -> Option<PathBuf>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let extension = if cfg!(windows) { ".exe" } else { "" };
        let tool_with_ext = format!("{}{}", tool_name, extension);

        dirs.into_iter()
            .map(|dir| dir.join(&tool_with_ext))
            .find(|path| Self::is_executable(path))
    }

    #[cfg(unix)]
    fn is_executable(path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(path: &Path) -> bool {
        path.is_file()
    }
}
