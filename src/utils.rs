//! # Utility Functions Module
//!
//! This module provides utility functions that improve code readability
//! and reduce boilerplate across the application.

/// Converts a sequence of string-like items to Vec<String>.
///
/// This utility function accepts any iterable of items that can be converted
/// to String, eliminating repetitive `.to_string()` calls when building
/// command lines.
///
/// # Example
/// ```rust
/// use pdfcompress::utils::to_string_vec;
///
/// let preset = "/ebook";
/// let args = to_string_vec(["-dBATCH", "-dNOPAUSE", format!("-dPDFSETTINGS={}", preset).as_str()]);
/// assert_eq!(args[2], "-dPDFSETTINGS=/ebook");
/// ```
pub fn to_string_vec<T, I>(items: I) -> Vec<String>
where
    T: ToString,
    I: IntoIterator<Item = T>,
{
    items.into_iter().map(|item| item.to_string()).collect()
}

/// Macro for even more convenient argument building.
///
/// All items must share one type, typically `&str`.
///
/// # Example
/// ```rust
/// use pdfcompress::args;
///
/// let args = args!["-sDEVICE=pdfwrite", "-dSAFER", format!("-dPDFSETTINGS={}", "/screen").as_str()];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        $crate::utils::to_string_vec([$($item),*])
    };
}
