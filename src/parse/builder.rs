use crate::{
    codec::value::decode,
    document::model::{Document, ObjectRecord, Section, SectionRef},
    foundation::core::{EffectId, ObjectId},
    foundation::error::{Aup2Error, Aup2Result},
    parse::line::{Header, Line, classify},
};

/// Where the next `key=value` line lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cursor {
    Idle,
    Main(SectionRef),
    Effect(ObjectId, EffectId),
}

/// Owns the document while it is being read. The cursor holds ids, never references into it.
pub(crate) struct DocumentBuilder {
    doc: Document,
    cursor: Cursor,
    line: usize,
}

impl DocumentBuilder {
    pub(crate) fn new() -> Self {
        Self {
            doc: Document::new(),
            cursor: Cursor::Idle,
            line: 0,
        }
    }

    fn warn(&mut self, msg: impl std::fmt::Display) {
        let line = self.line;
        self.doc.push_warning(format!("line {line}: {msg}"));
    }

    pub(crate) fn feed(&mut self, line_no: usize, raw: &str) -> Aup2Result<()> {
        self.line = line_no;
        let trimmed = raw.trim();
        match classify(trimmed).map_err(|msg| Aup2Error::parse(line_no, msg))? {
            Line::Blank => Ok(()),
            Line::Header(Header::Unrecognized) => {
                self.warn(format_args!("unrecognized section header: {trimmed}"));
                Ok(())
            }
            Line::Header(header) => {
                self.open(header);
                Ok(())
            }
            Line::Assignment { key, raw } => self.assign(key, raw, trimmed),
            Line::Stray(text) => {
                self.warn(format_args!("line without assignment: {text}"));
                Ok(())
            }
        }
    }

    fn open(&mut self, header: Header) {
        self.cursor = match header {
            Header::Main(r) => {
                match r {
                    SectionRef::Project => {
                        self.doc.project.get_or_insert_with(Section::new);
                    }
                    SectionRef::Scene(id) => {
                        self.doc.scenes.entry(id).or_default();
                    }
                    SectionRef::Object(id) => {
                        self.doc.objects.entry(id).or_default();
                    }
                }
                Cursor::Main(r)
            }
            Header::Effect(obj, fx) => {
                if !self.doc.objects.contains_key(&obj) {
                    self.warn(format_args!(
                        "effect section [{obj}.{fx}] has no parent object {obj}; created it"
                    ));
                }
                self.doc
                    .objects
                    .entry(obj)
                    .or_insert_with(ObjectRecord::new)
                    .effects
                    .insert(fx, Section::new());
                Cursor::Effect(obj, fx)
            }
            Header::Unrecognized => self.cursor,
        };
    }

    fn assign(&mut self, key: &str, raw: &str, line: &str) -> Aup2Result<()> {
        if self.cursor == Cursor::Idle {
            self.warn(format_args!("key-value with no active section ignored: {line}"));
            return Ok(());
        }

        let (value, warning) = decode(raw);
        if let Some(w) = warning {
            self.warn(w);
        }

        let target = match self.cursor {
            Cursor::Effect(obj, fx) => self
                .doc
                .objects
                .get_mut(&obj)
                .and_then(|o| o.effects.get_mut(&fx)),
            Cursor::Main(r) => self.doc.section_mut(r),
            Cursor::Idle => None,
        };
        let Some(section) = target else {
            return Err(Aup2Error::parse(
                self.line,
                "active section is missing from the document",
            ));
        };
        section.insert(key, value);
        Ok(())
    }

    pub(crate) fn finish(mut self, line_count: usize) -> Document {
        if self.doc.project.is_none() {
            self.doc.push_warning("no [project] section found");
        }
        if self.doc.objects.is_empty() {
            self.doc.push_warning("no object sections found");
        }
        let d = &mut self.doc.diagnostics;
        d.line_count = line_count;
        d.object_count = self.doc.objects.len();
        d.section_count =
            usize::from(self.doc.project.is_some()) + self.doc.scenes.len() + self.doc.objects.len();
        self.doc
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/builder.rs"]
mod tests;
