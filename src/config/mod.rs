pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::output::OutputFormat;
use provenance::ProvenanceMap;
use std::path::PathBuf;

/// Fully resolved configuration, no Option fields.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // Operational
    pub format: OutputFormat,
    pub quiet: bool,

    // Project layout
    pub root: PathBuf,
    pub backend_dir: PathBuf,

    // Module resolution
    pub extensions: Vec<String>,

    // Targeting
    pub include: Vec<String>,
    pub exclude: Vec<String>,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

impl ResolvedConfig {
    /// Absolute backend root (`root` joined with `backend_dir`).
    pub fn backend_root(&self) -> PathBuf {
        self.root.join(&self.backend_dir)
    }
}
