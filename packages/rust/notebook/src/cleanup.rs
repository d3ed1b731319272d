//! Text tidying for exported pages and captured cell output.

use std::sync::LazyLock;

use regex::Regex;

/// SGR colour sequences and charset switches emitted by kernels.
static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]|\x1b%.").expect("valid regex"));

/// End an exported page with exactly one newline.
///
/// Trailing blank lines are dropped; everything before the last non-blank
/// line is left byte-for-byte, so hard line breaks and fenced code survive.
pub(crate) fn tidy_page(md: &str) -> String {
    let Some(last) = md.rfind(|c: char| !c.is_whitespace()) else {
        return "\n".to_string();
    };
    let line_end = md[last..].find('\n').map_or(md.len(), |i| last + i);
    let body = md[..line_end].strip_suffix('\r').unwrap_or(&md[..line_end]);
    format!("{body}\n")
}

/// Remove terminal colour codes from captured output.
pub(crate) fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Indent every non-empty line by four spaces; blank lines stay empty.
pub(crate) fn indent(text: &str) -> String {
    text.lines()
        .map(|line| match line.trim() {
            "" => String::new(),
            _ => format!("    {line}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tidy_drops_trailing_blank_lines() {
        assert_eq!(tidy_page("body\n\n\n"), "body\n");
        assert_eq!(tidy_page("body"), "body\n");
        assert_eq!(tidy_page("body\r\n  \n\t\n"), "body\n");
        assert_eq!(tidy_page(""), "\n");
    }

    #[test]
    fn tidy_keeps_hard_breaks_and_code() {
        let md = "line one  \nline two\n\n```python\nx = 1   \n\n\n\ny = 2\n```\n\n";
        assert_eq!(
            tidy_page(md),
            "line one  \nline two\n\n```python\nx = 1   \n\n\n\ny = 2\n```\n"
        );
    }

    #[test]
    fn strip_ansi_removes_colour_codes() {
        assert_eq!(strip_ansi("\x1b[0;31mValueError\x1b[0m: bad"), "ValueError: bad");
    }

    #[test]
    fn indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb"), "    a\n\n    b");
    }
}
