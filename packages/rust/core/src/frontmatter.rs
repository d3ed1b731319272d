//! Front-matter title lookup and heading repair.
//!
//! Pure text transforms; the file-level wrapper lives in [`crate::titles`].

use docsmith_shared::FileOutcome;

/// Key looked for on front-matter lines.
const TITLE_KEY: &str = "title: ";

/// Front-matter delimiter.
const DELIMITER: &str = "---";

/// Why a document's front matter could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterError {
    /// The closing delimiter was reached without a `title: ` line.
    MissingTitle,
    /// No closing delimiter exists.
    Unterminated,
}

/// The title declared in the front matter and where the block ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLocation {
    /// Expected heading text.
    pub title: String,
    /// Line index of the closing delimiter.
    pub terminator: usize,
}

/// Result of running the heading fixer over a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingFix {
    pub outcome: FileOutcome,
    /// Rewritten document, `None` when unchanged.
    pub content: Option<String>,
}

/// Extract the value of a `title: ` line.
///
/// Everything after the first whitespace-separated token is kept (words
/// re-joined with single spaces), then one leading and one trailing `"` are
/// removed if present.
pub fn extract_title_value(line: &str) -> String {
    let value = line.split_whitespace().skip(1).collect::<Vec<_>>().join(" ");
    let value = value.strip_prefix('"').unwrap_or(&value);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.to_string()
}

/// Scan the front matter for the title and the closing delimiter.
///
/// Line 0 is taken to be the opening delimiter; the first later line
/// containing `---` closes the block. The last `title: ` line seen before
/// that wins.
pub fn locate_title(lines: &[&str]) -> Result<TitleLocation, FrontMatterError> {
    let mut title = None;

    for (i, line) in lines.iter().enumerate() {
        if line.contains(TITLE_KEY) {
            title = Some(extract_title_value(line));
        }
        if i >= 1 && line.contains(DELIMITER) {
            return title
                .map(|title| TitleLocation {
                    title,
                    terminator: i,
                })
                .ok_or(FrontMatterError::MissingTitle);
        }
    }

    Err(FrontMatterError::Unterminated)
}

/// Make the line two after the front matter read `# <title>`.
///
/// - already correct: unchanged
/// - some other `# ` heading there: that line is replaced
/// - anything else (including end of document): a blank line, the heading,
///   and another blank line are inserted right after the delimiter
pub fn fix_heading(content: &str) -> Result<HeadingFix, FrontMatterError> {
    let mut lines: Vec<&str> = content.split('\n').collect();
    let TitleLocation { title, terminator } = locate_title(&lines)?;

    let heading = format!("# {title}");
    let slot = terminator + 2;

    let outcome = match lines.get(slot).copied() {
        Some(line) if line == heading => {
            return Ok(HeadingFix {
                outcome: FileOutcome::Unchanged,
                content: None,
            });
        }
        Some(line) if line.starts_with("# ") => {
            lines[slot] = &heading;
            FileOutcome::Corrected
        }
        _ => {
            let at = terminator + 1;
            lines.splice(at..at, ["", heading.as_str(), ""]);
            FileOutcome::Inserted
        }
    };

    Ok(HeadingFix {
        outcome,
        content: Some(lines.join("\n")),
    })
}
