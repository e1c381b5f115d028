use std::path::PathBuf;

#[derive(Debug)]
pub struct TransformSummary {
    pub source: PathBuf,
    /// Shots in the final table.
    pub shots: usize,
    pub removed: usize,
    /// Written file, `None` for a dry run or a declined export.
    pub export: Option<PathBuf>,
    pub dry_run: bool,
}
