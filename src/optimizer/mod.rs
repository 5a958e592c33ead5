//! # Optimizer Module
//!
//! Modulo che separa le responsabilità in sottomoduli:
//! - `pdf_optimizer`: Orchestratore del batch
//! - `task_optimizer`: Worker per singoli file
//! - `path_resolver`: Logica di calcolo path centralizzata

pub mod pdf_optimizer;
pub mod task_optimizer;
pub mod path_resolver;

pub use pdf_optimizer::PdfOptimizer;
pub use task_optimizer::TaskOptimizer;
pub use path_resolver::PathResolver;
