//! Section listing: the content files of one section directory.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use docsmith_shared::{ContentFile, DocsmithError, Result, Section};

/// List the content files of `section`, excluding the index page, sorted by file name.
///
/// Sub-directories are skipped. A missing or unreadable directory is an error.
#[instrument(skip(docs_dir, section), fields(section = %section))]
pub fn list_section(
    docs_dir: &Path,
    section: &Section,
    index_stem: &str,
) -> Result<Vec<ContentFile>> {
    let dir = section.dir(docs_dir);
    let entries = std::fs::read_dir(&dir).map_err(|e| DocsmithError::io(&dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DocsmithError::io(&dir, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| DocsmithError::io(entry.path(), e))?;
        if file_type.is_dir() {
            debug!(path = %entry.path().display(), "skipping sub-directory");
            continue;
        }
        paths.push(entry.path());
    }

    let files = select_content_files(paths, index_stem);
    debug!(count = files.len(), "section listed");
    Ok(files)
}

/// Drop the index page and order the rest by file name.
pub fn select_content_files(paths: Vec<PathBuf>, index_stem: &str) -> Vec<ContentFile> {
    let mut files: Vec<ContentFile> = paths
        .into_iter()
        .map(ContentFile::from_path)
        .filter(|f| f.stem != index_stem)
        .collect();

    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    files
}
