//! Batch export of a notebook directory into a section.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use docsmith_notebook::{ExportOptions, ExportResult, export_file};
use docsmith_shared::{DocsmithError, Result};

use crate::progress::ProgressReporter;

/// Notebook file extension.
const NOTEBOOK_EXT: &str = "ipynb";

/// Export every `*.ipynb` in `source_dir` to `output_dir`, in file-name order.
///
/// `output_dir` is created if needed. The first failing notebook aborts the run.
#[instrument(skip_all, fields(source = %source_dir.display(), output = %output_dir.display()))]
pub fn export_notebooks(
    source_dir: &Path,
    output_dir: &Path,
    opts: &ExportOptions,
    progress: &dyn ProgressReporter,
) -> Result<Vec<ExportResult>> {
    let notebooks = find_notebooks(source_dir)?;
    std::fs::create_dir_all(output_dir).map_err(|e| DocsmithError::io(output_dir, e))?;

    progress.phase("Exporting notebooks");
    let mut results = Vec::with_capacity(notebooks.len());
    for path in &notebooks {
        let result = export_file(path, output_dir, opts)?;
        info!(output = %result.target.display(), "notebook exported");
        results.push(result);
        progress.file_done(&path.display().to_string(), results.len());
    }

    progress.finish();
    Ok(results)
}

fn find_notebooks(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| DocsmithError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| DocsmithError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == NOTEBOOK_EXT) {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}
