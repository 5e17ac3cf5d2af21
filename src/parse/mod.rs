//! Text → [`Document`].
//!
//! Single pass over the input lines. Malformed lines become warnings in
//! [`Document::diagnostics`](crate::Document); only ids that cannot be represented abort the parse.

mod builder;
mod line;

use crate::{document::model::Document, foundation::error::Aup2Result};

use builder::DocumentBuilder;

/// Parses project text into a document.
///
/// A leading byte-order mark is ignored and `\r\n` line endings are accepted.
#[tracing::instrument(skip(text), fields(bytes = text.len()))]
pub fn parse(text: &str) -> Aup2Result<Document> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut builder = DocumentBuilder::new();
    let mut line_count = 0;
    for (idx, raw) in text.lines().enumerate() {
        line_count = idx + 1;
        builder.feed(line_count, raw)?;
    }
    let doc = builder.finish(line_count);
    tracing::debug!(
        lines = doc.diagnostics.line_count,
        sections = doc.diagnostics.section_count,
        objects = doc.diagnostics.object_count,
        warnings = doc.diagnostics.warnings.len(),
        "parsed document"
    );
    Ok(doc)
}

#[cfg(test)]
#[path = "../../tests/unit/parse/parse.rs"]
mod tests;
