//! Serde model of the nbformat 4 document structure.
//!
//! Only the fields the exporter reads are modelled; everything else is ignored.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A text field stored either as one string or as a list of lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MultilineText {
    One(String),
    Many(Vec<String>),
}

impl MultilineText {
    /// The full text; list entries already carry their own newlines.
    pub fn text(&self) -> String {
        match self {
            Self::One(s) => s.clone(),
            Self::Many(lines) => lines.concat(),
        }
    }
}

impl Default for MultilineText {
    fn default() -> Self {
        Self::One(String::new())
    }
}

/// Top-level notebook document.
#[derive(Debug, Clone, Deserialize)]
pub struct Notebook {
    pub nbformat: u32,
    #[serde(default)]
    pub metadata: NotebookMetadata,
    pub cells: Vec<Cell>,
}

impl Notebook {
    /// Language name used to tag code fences.
    pub fn language(&self) -> &str {
        self.metadata
            .language_info
            .as_ref()
            .map(|l| l.name.as_str())
            .or_else(|| self.metadata.kernelspec.as_ref().and_then(|k| k.language.as_deref()))
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotebookMetadata {
    #[serde(default)]
    pub language_info: Option<LanguageInfo>,
    #[serde(default)]
    pub kernelspec: Option<KernelSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KernelSpec {
    #[serde(default)]
    pub language: Option<String>,
}

/// One notebook cell.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    Markdown {
        #[serde(default)]
        source: MultilineText,
        #[serde(default)]
        metadata: CellMetadata,
    },
    Code {
        #[serde(default)]
        source: MultilineText,
        #[serde(default)]
        metadata: CellMetadata,
        #[serde(default)]
        outputs: Vec<Output>,
    },
    Raw {
        #[serde(default)]
        source: MultilineText,
        #[serde(default)]
        metadata: CellMetadata,
    },
}

impl Cell {
    pub fn metadata(&self) -> &CellMetadata {
        match self {
            Self::Markdown { metadata, .. }
            | Self::Code { metadata, .. }
            | Self::Raw { metadata, .. } => metadata,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CellMetadata {
    #[serde(default)]
    pub tags: Vec<String>,
    /// Target format of a raw cell.
    #[serde(default)]
    pub raw_mimetype: Option<String>,
}

impl CellMetadata {
    /// Whether any of the cell's tags appears in `tags`.
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }
}

/// One output of a code cell.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
pub enum Output {
    Stream {
        #[serde(default)]
        text: MultilineText,
    },
    DisplayData {
        #[serde(default)]
        data: BTreeMap<String, serde_json::Value>,
    },
    ExecuteResult {
        #[serde(default)]
        data: BTreeMap<String, serde_json::Value>,
    },
    Error {
        #[serde(default)]
        ename: String,
        #[serde(default)]
        evalue: String,
        #[serde(default)]
        traceback: Vec<String>,
    },
}

/// Text of a mime bundle entry (string or list of strings).
pub fn mime_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|v| v.as_str())
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.concat()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiline_text_forms() {
        let one: MultilineText = serde_json::from_str(r#""a\nb""#).unwrap();
        let many: MultilineText = serde_json::from_str(r#"["a\n", "b"]"#).unwrap();
        assert_eq!(one.text(), "a\nb");
        assert_eq!(many.text(), "a\nb");
    }

    #[test]
    fn cells_and_outputs_deserialize() {
        let json = r##"{
            "nbformat": 4,
            "nbformat_minor": 5,
            "metadata": {"kernelspec": {"language": "python", "name": "python3"}},
            "cells": [
                {"cell_type": "markdown", "id": "x", "metadata": {}, "source": ["# Hi"]},
                {"cell_type": "code", "execution_count": 1, "metadata": {"tags": ["remove_input"]},
                 "source": "1 + 1",
                 "outputs": [
                    {"output_type": "execute_result", "execution_count": 1,
                     "data": {"text/plain": ["2"]}, "metadata": {}}
                 ]}
            ]
        }"##;
        let nb: Notebook = serde_json::from_str(json).unwrap();
        assert_eq!(nb.cells.len(), 2);
        assert_eq!(nb.language(), "python");
        match &nb.cells[0] {
            Cell::Markdown { source, .. } => assert_eq!(source.text(), "# Hi"),
            other => panic!("expected markdown cell, got {other:?}"),
        }
        assert!(nb.cells[1].metadata().has_any_tag(&["remove_input".to_string()]));
    }

    #[test]
    fn mime_text_rejects_objects() {
        assert_eq!(mime_text(&serde_json::json!(["a", "b"])), Some("ab".into()));
        assert_eq!(mime_text(&serde_json::json!({"k": 1})), None);
    }
}
