//! Navigation builder.
//!
//! Generates the section → page tree and splices it into the navigation
//! document at the marker line, replacing everything from the marker on.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use docsmith_shared::{ContentFile, DocsmithError, NavConfig, NavEntry, Result, Section};

use crate::progress::ProgressReporter;
use crate::sections::list_section;

/// Inputs for building and writing the navigation block.
#[derive(Debug, Clone)]
pub struct NavOptions {
    /// Directory holding the section directories.
    pub docs_dir: PathBuf,
    /// Sections, in navigation order.
    pub sections: Vec<Section>,
    /// Stem excluded from every section.
    pub index_stem: String,
    /// Navigation document to rewrite.
    pub nav_file: PathBuf,
    /// Pre-run copy of the navigation document.
    pub backup_file: PathBuf,
    /// Marker line opening the generated block.
    pub marker: String,
    /// Key line following the marker.
    pub root_key: String,
}

impl NavOptions {
    /// Resolve paths in `nav` against the site root.
    pub fn from_config(
        root: &Path,
        docs_dir: PathBuf,
        sections: Vec<Section>,
        index_stem: String,
        nav: &NavConfig,
    ) -> Self {
        Self {
            docs_dir,
            sections,
            index_stem,
            nav_file: root.join(&nav.file),
            backup_file: root.join(&nav.backup_file),
            marker: nav.marker.clone(),
            root_key: nav.root_key.clone(),
        }
    }
}

/// The generated navigation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBlock {
    pub lines: Vec<String>,
    pub entries: Vec<NavEntry>,
}

impl NavBlock {
    /// Lines joined with `\n`, no trailing newline.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Outcome of rewriting the navigation document.
#[derive(Debug, Clone)]
pub struct NavUpdate {
    pub nav_file: PathBuf,
    pub backup_file: PathBuf,
    /// Number of page entries written.
    pub entry_count: usize,
    /// Whether the rewritten document differs from the original.
    pub changed: bool,
}

/// Returned by [`splice_nav`] when the document has no marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerNotFound;

/// Navigation lines for one section: header, index page, then one leaf per file.
pub fn section_nav(section: &Section, files: &[ContentFile]) -> (Vec<String>, Vec<NavEntry>) {
    let slug = section.slug();
    let mut lines = vec![
        format!("  - {}:", section.title()),
        format!("    - {slug}/index.md"),
    ];

    let entries: Vec<NavEntry> = files.iter().map(|f| NavEntry::new(section, &f.stem)).collect();
    lines.extend(
        entries
            .iter()
            .map(|e| format!("    - '{}': {}", e.title, e.path())),
    );

    (lines, entries)
}

/// Assemble the full block from per-section listings, in the given order.
pub fn assemble_nav(
    marker: &str,
    root_key: &str,
    sections: &[(Section, Vec<ContentFile>)],
) -> NavBlock {
    let mut lines = vec![marker.to_string(), root_key.to_string()];
    let mut entries = Vec::new();

    for (section, files) in sections {
        let (section_lines, section_entries) = section_nav(section, files);
        lines.extend(section_lines);
        entries.extend(section_entries);
    }

    NavBlock { lines, entries }
}

/// List every section and build the navigation block.
#[instrument(skip_all, fields(sections = opts.sections.len()))]
pub fn build_nav(opts: &NavOptions, progress: &dyn ProgressReporter) -> Result<NavBlock> {
    let mut listed = Vec::with_capacity(opts.sections.len());
    for section in &opts.sections {
        progress.phase(&format!("Navigation: {section}"));
        let files = list_section(&opts.docs_dir, section, &opts.index_stem)?;
        debug!(section = %section, files = files.len(), "section listed for navigation");
        listed.push((section.clone(), files));
    }

    Ok(assemble_nav(&opts.marker, &opts.root_key, &listed))
}

/// Replace everything from the first occurrence of `marker` with `block`.
pub fn splice_nav(
    original: &str,
    marker: &str,
    block: &str,
) -> std::result::Result<String, MarkerNotFound> {
    let start = original.find(marker).ok_or(MarkerNotFound)?;
    Ok(format!("{}{block}", &original[..start]))
}

/// Back up the navigation document, then rewrite it with `block`.
///
/// The marker is located before anything is written; if it is missing,
/// neither file is touched.
#[instrument(skip_all, fields(nav_file = %opts.nav_file.display()))]
pub fn write_nav(opts: &NavOptions, block: &NavBlock) -> Result<NavUpdate> {
    let path = &opts.nav_file;
    let original = std::fs::read_to_string(path).map_err(|e| DocsmithError::io(path, e))?;

    let updated = splice_nav(&original, &opts.marker, &block.render()).map_err(|_| {
        DocsmithError::MarkerNotFound {
            path: path.clone(),
            marker: opts.marker.clone(),
        }
    })?;

    let backup = &opts.backup_file;
    std::fs::write(backup, &original).map_err(|e| DocsmithError::io(backup, e))?;
    debug!(backup = %backup.display(), bytes = original.len(), "backup written");

    std::fs::write(path, &updated).map_err(|e| DocsmithError::io(path, e))?;

    let changed = updated != original;
    info!(entries = block.entries.len(), changed, "navigation document rewritten");

    Ok(NavUpdate {
        nav_file: path.clone(),
        backup_file: backup.clone(),
        entry_count: block.entries.len(),
        changed,
    })
}

/// Build the navigation block and write it into the navigation document.
pub fn regenerate_nav(opts: &NavOptions, progress: &dyn ProgressReporter) -> Result<NavUpdate> {
    let block = build_nav(opts, progress)?;
    let update = write_nav(opts, &block)?;
    progress.finish();
    Ok(update)
}
