//! Notebook-to-Markdown export.
//!
//! Parses nbformat 4 notebooks, drops or trims cells by tag, renders the
//! remaining cells and their outputs as Markdown, and inlines PNG figures as
//! base64 data URIs so the exported page is self-contained.

mod cleanup;
pub mod model;

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use docsmith_shared::{DocsmithError, NotebookConfig, Result};

pub use model::{Cell, Notebook, Output};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Options for the notebook export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Cells tagged with any of these are dropped.
    pub remove_cell_tags: Vec<String>,
    /// Cells tagged with any of these lose their outputs.
    pub remove_all_outputs_tags: Vec<String>,
    /// Cells tagged with any of these lose their source.
    pub remove_input_tags: Vec<String>,
    /// Render `image/png` outputs as inline data URIs.
    pub inline_png: bool,
    /// Alt text of inlined images.
    pub image_alt: String,
}

impl From<&NotebookConfig> for ExportOptions {
    fn from(config: &NotebookConfig) -> Self {
        Self {
            remove_cell_tags: config.remove_cell_tags.clone(),
            remove_all_outputs_tags: config.remove_all_outputs_tags.clone(),
            remove_input_tags: config.remove_input_tags.clone(),
            inline_png: config.inline_png,
            image_alt: config.image_alt.clone(),
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from(&NotebookConfig::default())
    }
}

/// Result of exporting one notebook file.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Notebook that was read.
    pub source: PathBuf,
    /// Markdown file that was written.
    pub target: PathBuf,
    /// Cells rendered after tag filtering.
    pub cells_rendered: usize,
    /// Cells dropped by tag.
    pub cells_removed: usize,
}

// ---------------------------------------------------------------------------
// Exporter
// ---------------------------------------------------------------------------

/// Parse notebook JSON.
pub fn parse_notebook(json: &str) -> std::result::Result<Notebook, String> {
    let nb: Notebook = serde_json::from_str(json).map_err(|e| e.to_string())?;
    if nb.nbformat < 4 {
        return Err(format!("unsupported nbformat {} (need 4)", nb.nbformat));
    }
    Ok(nb)
}

/// Render a notebook as Markdown.
///
/// Returns the Markdown body and the number of cells dropped by tag.
pub fn export_markdown(nb: &Notebook, opts: &ExportOptions) -> (String, usize) {
    let language = nb.language();
    let mut blocks: Vec<String> = Vec::new();
    let mut removed = 0;

    for cell in &nb.cells {
        let meta = cell.metadata();
        if meta.has_any_tag(&opts.remove_cell_tags) {
            removed += 1;
            continue;
        }

        match cell {
            Cell::Markdown { source, .. } => blocks.push(source.text()),
            Cell::Raw { source, metadata } => {
                if raw_is_kept(metadata.raw_mimetype.as_deref()) {
                    blocks.push(source.text());
                }
            }
            Cell::Code {
                source, outputs, ..
            } => {
                let source = source.text();
                if !meta.has_any_tag(&opts.remove_input_tags) && !source.trim().is_empty() {
                    blocks.push(format!("```{language}\n{}\n```", source.trim_end_matches('\n')));
                }
                if !meta.has_any_tag(&opts.remove_all_outputs_tags) {
                    blocks.extend(outputs.iter().filter_map(|o| render_output(o, opts)));
                }
            }
        }
    }

    (cleanup::tidy_page(&blocks.join("\n\n")), removed)
}

/// Export one notebook to `<output_dir>/<stem>.md`, overwriting.
#[instrument(skip(path, opts), fields(path = %path.display()))]
pub fn export_file(path: &Path, output_dir: &Path, opts: &ExportOptions) -> Result<ExportResult> {
    let json = std::fs::read_to_string(path).map_err(|e| DocsmithError::io(path, e))?;
    let nb = parse_notebook(&json).map_err(|msg| DocsmithError::notebook(path, msg))?;

    let (markdown, cells_removed) = export_markdown(&nb, opts);

    let stem = path
        .file_stem()
        .ok_or_else(|| DocsmithError::notebook(path, "file has no name"))?;
    let target = output_dir.join(format!("{}.md", stem.to_string_lossy()));

    std::fs::write(&target, &markdown).map_err(|e| DocsmithError::io(&target, e))?;
    debug!(output = %target.display(), bytes = markdown.len(), cells_removed, "notebook exported");

    Ok(ExportResult {
        source: path.to_path_buf(),
        target,
        cells_rendered: nb.cells.len() - cells_removed,
        cells_removed,
    })
}

// ---------------------------------------------------------------------------
// Output rendering
// ---------------------------------------------------------------------------

/// Render one cell output, or `None` if nothing displayable remains.
fn render_output(output: &Output, opts: &ExportOptions) -> Option<String> {
    match output {
        Output::Stream { text, .. } => {
            let text = cleanup::strip_ansi(&text.text());
            Some(cleanup::indent(text.trim_end_matches('\n')))
        }
        Output::Error {
            ename,
            evalue,
            traceback,
        } => {
            let text = if traceback.is_empty() {
                format!("{ename}: {evalue}")
            } else {
                traceback.join("\n")
            };
            Some(cleanup::indent(&cleanup::strip_ansi(&text)))
        }
        Output::DisplayData { data } | Output::ExecuteResult { data } => {
            let rendered = render_mime_bundle(data, opts);
            if rendered.is_none() {
                warn!(
                    mime_types = ?data.keys().collect::<Vec<_>>(),
                    "output has no renderable representation, skipped"
                );
            }
            rendered
        }
    }
}

/// Pick the best representation of a display output.
fn render_mime_bundle(
    data: &std::collections::BTreeMap<String, serde_json::Value>,
    opts: &ExportOptions,
) -> Option<String> {
    let text = |mime: &str| data.get(mime).and_then(model::mime_text);

    if let Some(html) = text("text/html") {
        return Some(html.trim_end().to_string());
    }
    // Inlined figures take the HTML slot, ahead of markdown and latex.
    if opts.inline_png {
        if let Some(png) = text("image/png") {
            let encoded: String = png.split_whitespace().collect();
            return Some(format!("![{}](data:image/png;base64,{encoded})", opts.image_alt));
        }
    }
    if let Some(md) = text("text/markdown") {
        return Some(md.trim_end().to_string());
    }
    if let Some(latex) = text("text/latex") {
        return Some(latex.trim_end().to_string());
    }
    text("text/plain")
        .map(|plain| cleanup::indent(cleanup::strip_ansi(&plain).trim_end_matches('\n')))
}

/// Raw cells are kept when untyped or aimed at Markdown or HTML, both of
/// which pass through a Markdown page unchanged.
fn raw_is_kept(mimetype: Option<&str>) -> bool {
    matches!(
        mimetype.map(str::to_ascii_lowercase).as_deref(),
        None | Some("") | Some("text/markdown") | Some("markdown") | Some("text/html")
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_path(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name)
    }

    fn notebook(cells: serde_json::Value) -> Notebook {
        let json = serde_json::json!({
            "nbformat": 4,
            "nbformat_minor": 5,
            "metadata": {"language_info": {"name": "python"}},
            "cells": cells,
        });
        parse_notebook(&json.to_string()).unwrap()
    }

    fn export(cells: serde_json::Value) -> String {
        export_markdown(&notebook(cells), &ExportOptions::default()).0
    }

    #[test]
    fn markdown_and_code_cells() {
        let md = export(serde_json::json!([
            {"cell_type": "markdown", "metadata": {}, "source": ["# Intro\n", "Some text."]},
            {"cell_type": "code", "metadata": {}, "source": ["x = 1\n", "print(x)"],
             "outputs": [{"output_type": "stream", "name": "stdout", "text": ["1\n"]}]}
        ]));
        assert_eq!(md, "# Intro\nSome text.\n\n```python\nx = 1\nprint(x)\n```\n\n    1\n");
    }

    #[test]
    fn markdown_hard_breaks_and_code_whitespace_survive() {
        let md = export(serde_json::json!([
            {"cell_type": "markdown", "metadata": {}, "source": "line one  \nline two"},
            {"cell_type": "code", "metadata": {}, "source": "a = 1\n\n\n\nb = 2", "outputs": []}
        ]));
        assert_eq!(md, "line one  \nline two\n\n```python\na = 1\n\n\n\nb = 2\n```\n");
    }

    #[test]
    fn remove_cell_tag_drops_cell() {
        let nb = notebook(serde_json::json!([
            {"cell_type": "code", "metadata": {"tags": ["remove_cell"]}, "source": "secret()", "outputs": []},
            {"cell_type": "markdown", "metadata": {}, "source": "kept"}
        ]));
        let (md, removed) = export_markdown(&nb, &ExportOptions::default());
        assert_eq!(removed, 1);
        assert!(!md.contains("secret"));
        assert_eq!(md, "kept\n");
    }

    #[test]
    fn remove_input_keeps_outputs() {
        let md = export(serde_json::json!([
            {"cell_type": "code", "metadata": {"tags": ["remove_input"]}, "source": "plot()",
             "outputs": [{"output_type": "execute_result", "execution_count": 1, "metadata": {},
                          "data": {"text/plain": "42"}}]}
        ]));
        assert!(!md.contains("plot()"));
        assert_eq!(md, "    42\n");
    }

    #[test]
    fn remove_output_keeps_input() {
        let md = export(serde_json::json!([
            {"cell_type": "code", "metadata": {"tags": ["remove_output"]}, "source": "noisy()",
             "outputs": [{"output_type": "stream", "name": "stdout", "text": "lots of noise"}]}
        ]));
        assert!(md.contains("noisy()"));
        assert!(!md.contains("lots of noise"));
    }

    #[test]
    fn png_output_inlined() {
        let md = export(serde_json::json!([
            {"cell_type": "code", "metadata": {}, "source": "show()",
             "outputs": [{"output_type": "display_data", "metadata": {},
                          "data": {"image/png": "iVBORw0KGgo=\n", "text/plain": "<Figure>"}}]}
        ]));
        assert!(md.contains("![Cell Output](data:image/png;base64,iVBORw0KGgo=)"));
        assert!(!md.contains("<Figure>"));
    }

    #[test]
    fn png_falls_back_to_text_when_not_inlined() {
        let nb = notebook(serde_json::json!([
            {"cell_type": "code", "metadata": {}, "source": "show()",
             "outputs": [{"output_type": "display_data", "metadata": {},
                          "data": {"image/png": "iVBORw0KGgo=", "text/plain": "<Figure>"}}]}
        ]));
        let opts = ExportOptions {
            inline_png: false,
            ..ExportOptions::default()
        };
        let (md, _) = export_markdown(&nb, &opts);
        assert!(!md.contains("base64"));
        assert!(md.contains("    <Figure>"));
    }

    #[test]
    fn html_preferred_over_png() {
        let md = export(serde_json::json!([
            {"cell_type": "code", "metadata": {}, "source": "df",
             "outputs": [{"output_type": "execute_result", "execution_count": 2, "metadata": {},
                          "data": {"text/html": ["<table>\n", "</table>\n"], "image/png": "AAAA"}}]}
        ]));
        assert!(md.contains("<table>\n</table>"));
        assert!(!md.contains("base64"));
    }

    #[test]
    fn error_traceback_stripped_of_ansi() {
        let md = export(serde_json::json!([
            {"cell_type": "code", "metadata": {}, "source": "1/0",
             "outputs": [{"output_type": "error", "ename": "ZeroDivisionError", "evalue": "division by zero",
                          "traceback": ["\u{1b}[0;31mZeroDivisionError\u{1b}[0m: division by zero"]}]}
        ]));
        assert!(md.contains("    ZeroDivisionError: division by zero"));
        assert!(!md.contains('\u{1b}'));
    }

    #[test]
    fn raw_cells_filtered_by_mimetype() {
        let md = export(serde_json::json!([
            {"cell_type": "raw", "metadata": {}, "source": "plain raw"},
            {"cell_type": "raw", "metadata": {"raw_mimetype": "text/html"}, "source": "<div>banner</div>"},
            {"cell_type": "raw", "metadata": {"raw_mimetype": "text/markdown"}, "source": "md raw"},
            {"cell_type": "raw", "metadata": {"raw_mimetype": "text/x-python"}, "source": "py raw"},
            {"cell_type": "raw", "metadata": {"raw_mimetype": "text/latex"}, "source": "\\LaTeX"}
        ]));
        assert_eq!(md, "plain raw\n\n<div>banner</div>\n\nmd raw\n");
    }

    #[test]
    fn png_outranks_markdown_and_latex() {
        let md = export(serde_json::json!([
            {"cell_type": "code", "metadata": {}, "source": "fig",
             "outputs": [
                {"output_type": "display_data", "metadata": {},
                 "data": {"text/markdown": "**caption**", "image/png": "AAAA"}},
                {"output_type": "display_data", "metadata": {},
                 "data": {"text/latex": "$x^2$", "image/png": "BBBB"}}
             ]}
        ]));
        assert!(md.contains("![Cell Output](data:image/png;base64,AAAA)"));
        assert!(md.contains("![Cell Output](data:image/png;base64,BBBB)"));
        assert!(!md.contains("**caption**"));
        assert!(!md.contains("$x^2$"));
    }

    #[test]
    fn markdown_output_used_when_png_not_inlined() {
        let nb = notebook(serde_json::json!([
            {"cell_type": "code", "metadata": {}, "source": "fig",
             "outputs": [{"output_type": "display_data", "metadata": {},
                          "data": {"text/markdown": "**caption**", "image/png": "AAAA"}}]}
        ]));
        let opts = ExportOptions {
            inline_png: false,
            ..ExportOptions::default()
        };
        let (md, _) = export_markdown(&nb, &opts);
        assert!(md.contains("**caption**"));
        assert!(!md.contains("base64"));
    }

    #[test]
    fn empty_code_cell_emits_no_fence() {
        let md = export(serde_json::json!([
            {"cell_type": "code", "metadata": {}, "source": "", "outputs": []},
            {"cell_type": "markdown", "metadata": {}, "source": "after"}
        ]));
        assert_eq!(md, "after\n");
    }

    #[test]
    fn old_nbformat_rejected() {
        let err = parse_notebook(r#"{"nbformat": 3, "cells": []}"#).unwrap_err();
        assert!(err.contains("nbformat 3"));
    }

    #[test]
    fn export_fixture_file() {
        let tmp = tempfile::tempdir().unwrap();
        let result = export_file(
            &fixture_path("notebooks/sample.ipynb"),
            tmp.path(),
            &ExportOptions::default(),
        )
        .unwrap();

        assert_eq!(result.target, tmp.path().join("sample.md"));
        assert_eq!(result.cells_removed, 1);
        assert_eq!(result.cells_rendered, 6);

        let md = std::fs::read_to_string(&result.target).unwrap();
        assert!(md.starts_with("---\ntitle: \"Plotting Basics\"\n---\n"));
        assert!(md.contains("```python\nimport math\n```"));
        assert!(md.contains("![Cell Output](data:image/png;base64,"));
        assert!(!md.contains("SECRET_TOKEN"));
        assert!(!md.contains("hidden_setup()"));
    }

    #[test]
    fn malformed_json_names_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.ipynb");
        std::fs::write(&path, "{not json").unwrap();

        let err = export_file(&path, tmp.path(), &ExportOptions::default()).unwrap_err();
        match err {
            DocsmithError::Notebook { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
