//! Title injection across the configured sections.
//!
//! Reads each content file, runs the heading fixer, and writes the file back
//! only when its content changed.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use docsmith_shared::{DocsmithError, FileOutcome, Result, Section};

use crate::frontmatter::{self, FrontMatterError};
use crate::progress::ProgressReporter;
use crate::sections::list_section;

/// Options for a title-injection pass.
#[derive(Debug, Clone)]
pub struct InjectOptions {
    /// Directory holding the section directories.
    pub docs_dir: PathBuf,
    /// Sections to process, in order.
    pub sections: Vec<Section>,
    /// Stem excluded from every section.
    pub index_stem: String,
    /// Compute outcomes without writing anything.
    pub check_only: bool,
}

/// Per-file record of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Result of a title-injection pass.
#[derive(Debug, Default)]
pub struct InjectReport {
    pub files: Vec<FileReport>,
}

impl InjectReport {
    /// Files whose content changed (or would change in check mode).
    pub fn changed(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.outcome.is_change())
    }

    pub fn count(&self, outcome: FileOutcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }
}

/// Run the title injector over every section.
///
/// Stops at the first file that fails; files already rewritten stay rewritten.
#[instrument(skip_all, fields(sections = opts.sections.len(), check_only = opts.check_only))]
pub fn inject_titles(
    opts: &InjectOptions,
    progress: &dyn ProgressReporter,
) -> Result<InjectReport> {
    let mut report = InjectReport::default();

    for section in &opts.sections {
        progress.phase(&format!("Titles: {section}"));

        for file in list_section(&opts.docs_dir, section, &opts.index_stem)? {
            let outcome = if opts.check_only {
                check_file(&file.path)?
            } else {
                inject_file(&file.path)?
            };

            report.files.push(FileReport {
                path: file.path.clone(),
                outcome,
            });
            progress.file_done(&file.path.display().to_string(), report.files.len());
        }
    }

    progress.finish();
    info!(
        files = report.files.len(),
        inserted = report.count(FileOutcome::Inserted),
        corrected = report.count(FileOutcome::Corrected),
        "title pass complete"
    );

    Ok(report)
}

/// Fix the heading of one file, writing it only if it changed.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn inject_file(path: &Path) -> Result<FileOutcome> {
    let original = std::fs::read_to_string(path).map_err(|e| DocsmithError::io(path, e))?;
    let fix = frontmatter::fix_heading(&original).map_err(|e| front_matter_error(path, e))?;

    match fix.content {
        Some(updated) => {
            std::fs::write(path, updated).map_err(|e| DocsmithError::io(path, e))?;
            info!(outcome = fix.outcome.as_str(), "heading updated");
        }
        None => debug!("heading already correct"),
    }

    Ok(fix.outcome)
}

/// Report what [`inject_file`] would do, without writing.
pub fn check_file(path: &Path) -> Result<FileOutcome> {
    let original = std::fs::read_to_string(path).map_err(|e| DocsmithError::io(path, e))?;
    frontmatter::fix_heading(&original)
        .map(|fix| fix.outcome)
        .map_err(|e| front_matter_error(path, e))
}

fn front_matter_error(path: &Path, err: FrontMatterError) -> DocsmithError {
    let path = path.to_path_buf();
    match err {
        FrontMatterError::MissingTitle => DocsmithError::MissingTitle { path },
        FrontMatterError::Unterminated => DocsmithError::MalformedFrontMatter { path },
    }
}
