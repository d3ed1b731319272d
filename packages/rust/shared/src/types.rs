//! Core domain types for docsmith.

use std::path::{Path, PathBuf};

/// Sections processed when no configuration overrides them, in navigation order.
pub const DEFAULT_SECTIONS: [&str; 4] = ["blog", "guides", "resources", "setups"];

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// A named site area, backed by the directory `<docs_dir>/<slug>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Section(String);

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Lowercased, path-safe directory name.
    pub fn slug(&self) -> String {
        self.0.to_lowercase()
    }

    /// Title-cased label used in navigation headers.
    pub fn title(&self) -> String {
        title_case(&self.0)
    }

    /// Directory holding this section's content files.
    pub fn dir(&self, docs_dir: &Path) -> PathBuf {
        docs_dir.join(self.slug())
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Section {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// ---------------------------------------------------------------------------
// ContentFile
// ---------------------------------------------------------------------------

/// A document belonging to a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name without its extension.
    pub stem: String,
}

impl ContentFile {
    /// Build from a path, taking the stem from the file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, stem }
    }

    /// The file name, used as the sort key.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// NavEntry
// ---------------------------------------------------------------------------

/// A navigation leaf: one content file of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    /// Section slug.
    pub section: String,
    /// File stem.
    pub stem: String,
    /// Display title derived from the stem.
    pub title: String,
}

impl NavEntry {
    pub fn new(section: &Section, stem: &str) -> Self {
        Self {
            section: section.slug(),
            stem: stem.to_string(),
            title: display_title(stem),
        }
    }

    /// Site-relative path of the page (`<slug>/<stem>`).
    pub fn path(&self) -> String {
        format!("{}/{}", self.section, self.stem)
    }
}

// ---------------------------------------------------------------------------
// FileOutcome
// ---------------------------------------------------------------------------

/// What the title injector did (or would do) to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The heading already matched the title.
    Unchanged,
    /// An existing level-1 heading was replaced.
    Corrected,
    /// A heading was inserted after the front matter.
    Inserted,
}

impl FileOutcome {
    /// Whether the file content differs after processing.
    pub fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Corrected => "corrected",
            Self::Inserted => "inserted",
        }
    }
}

// ---------------------------------------------------------------------------
// Title helpers
// ---------------------------------------------------------------------------

/// Turn a file stem into a display title: `my-first_post` -> `My First Post`.
pub fn display_title(stem: &str) -> String {
    title_case(&stem.replace(['-', '_'], " "))
}

/// Title-case a string word by word.
///
/// A cased character is uppercased when it follows an uncased one and
/// lowercased otherwise, so digits and punctuation start a new word
/// (`2nd` -> `2Nd`, `don't` -> `Don'T`). Whitespace runs are kept as-is.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;

    for c in s.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && prev_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }

    out
}
