use std::path::Path;

use anyhow::Context as _;

use crate::{
    document::{
        model::Document,
        tree::{from_tree, to_tree},
    },
    foundation::error::{Aup2Error, Aup2Result},
    layout::transform::{TransformOpts, TransformReport, transform_layer},
    parse::parse,
    reconstruct::reconstruct,
    validate::validate,
};

const EXTENSION: &str = "aup2";

/// Rejects paths that do not exist or do not carry the `.aup2` extension (any case).
pub fn check_input_path(path: &Path) -> Aup2Result<()> {
    let has_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(EXTENSION));
    if !has_ext {
        return Err(Aup2Error::invalid_argument(format!(
            "input '{}' is not a .{EXTENSION} file",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(Aup2Error::invalid_argument(format!(
            "input file '{}' does not exist",
            path.display()
        )));
    }
    Ok(())
}

fn read_text(path: &Path) -> Aup2Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read '{}'", path.display()))?;
    Ok(text)
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Aup2Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Writes `text` to `path`, creating parent directories as needed.
pub fn write_text(path: &Path, text: &str) -> Aup2Result<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

/// Parses an `.aup2` file from disk.
pub fn read_document(path: &Path) -> Aup2Result<Document> {
    check_input_path(path)?;
    parse(&read_text(path)?)
}

/// Reconstructs `doc` and writes it to `path`.
pub fn write_document(doc: &Document, path: &Path) -> Aup2Result<()> {
    let text = reconstruct(doc)?;
    write_text(path, &text)
}

/// Parse + reconstruct without changes. Returns the parsed document for its diagnostics.
pub fn convert_file(input: &Path, output: &Path) -> Aup2Result<Document> {
    let doc = read_document(input)?;
    write_document(&doc, output)?;
    Ok(doc)
}

/// Reads `input`, applies [`transform_layer`] and writes the result to `output`.
///
/// Nothing is written when the transform or the reconstruction fails, or when no object was
/// selected (`report.selected == 0`, with the reason in `report.warnings`).
pub fn transform_file(
    input: &Path,
    output: &Path,
    opts: &TransformOpts,
) -> Aup2Result<TransformReport> {
    let mut doc = read_document(input)?;
    let report = transform_layer(&mut doc, opts)?;
    if report.selected == 0 {
        tracing::debug!(output = %output.display(), "empty selection, output not written");
        return Ok(report);
    }
    write_document(&doc, output)?;
    Ok(report)
}

/// Result of checking a file for reconstructability.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Checks a file without failing on content problems.
///
/// Path problems are still errors; a document that fails to parse is reported as an invalid
/// outcome carrying the parse error.
pub fn validate_file(path: &Path) -> Aup2Result<ValidationOutcome> {
    check_input_path(path)?;
    let text = read_text(path)?;
    let outcome = match parse(&text) {
        Ok(doc) => {
            let errors = validate(&doc);
            ValidationOutcome {
                valid: errors.is_empty(),
                errors,
                warnings: doc.diagnostics.warnings,
            }
        }
        Err(e) => ValidationOutcome {
            valid: false,
            errors: vec![e.to_string()],
            warnings: Vec::new(),
        },
    };
    Ok(outcome)
}

/// Writes the structured tree of an `.aup2` file as pretty JSON.
pub fn export_json(input: &Path, output: &Path) -> Aup2Result<Document> {
    let doc = read_document(input)?;
    let json = serde_json::to_string_pretty(&to_tree(&doc))
        .map_err(|e| Aup2Error::serde(format!("encode tree JSON: {e}")))?;
    write_text(output, &json)?;
    Ok(doc)
}

/// Reads a JSON tree (as written by [`export_json`]) and reconstructs it into `output`.
pub fn import_json(input: &Path, output: &Path) -> Aup2Result<Document> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("read '{}'", input.display()))?;
    let tree: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| Aup2Error::serde(format!("parse tree JSON '{}': {e}", input.display())))?;
    let doc = from_tree(&tree)?;
    write_document(&doc, output)?;
    Ok(doc)
}

#[cfg(test)]
#[path = "../tests/unit/io.rs"]
mod tests;
