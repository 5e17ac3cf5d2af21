use crate::{
    document::model::SectionRef,
    foundation::core::{EffectId, ObjectId, SceneId, parse_id},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Header {
    Main(SectionRef),
    Effect(ObjectId, EffectId),
    Unrecognized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Blank,
    Header(Header),
    Assignment { key: &'a str, raw: &'a str },
    Stray(&'a str),
}

fn is_digit_run(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn header(inner: &str) -> Result<Header, String> {
    if inner == "project" {
        return Ok(Header::Main(SectionRef::Project));
    }
    if let Some(raw) = inner.strip_prefix("scene.") {
        let id = parse_id(raw).map_err(|reason| format!("malformed scene id '{raw}': {reason}"))?;
        return Ok(Header::Main(SectionRef::Scene(SceneId(id))));
    }
    if let Some((obj, fx)) = inner.split_once('.')
        && is_digit_run(obj)
        && is_digit_run(fx)
    {
        let obj = parse_id(obj).map_err(|reason| format!("malformed object id '{obj}': {reason}"))?;
        let fx = parse_id(fx).map_err(|reason| format!("malformed effect id '{fx}': {reason}"))?;
        return Ok(Header::Effect(ObjectId(obj), EffectId(fx)));
    }
    if is_digit_run(inner) {
        let id =
            parse_id(inner).map_err(|reason| format!("malformed object id '{inner}': {reason}"))?;
        return Ok(Header::Main(SectionRef::Object(ObjectId(id))));
    }
    Ok(Header::Unrecognized)
}

/// Classifies one trimmed line. `Err` carries the reason for a fatal header.
pub(crate) fn classify(line: &str) -> Result<Line<'_>, String> {
    if line.is_empty() {
        return Ok(Line::Blank);
    }
    if let Some(inner) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return header(inner).map(Line::Header);
    }
    if let Some((key, raw)) = line.split_once('=') {
        return Ok(Line::Assignment {
            key: key.trim(),
            raw,
        });
    }
    Ok(Line::Stray(line))
}

#[cfg(test)]
#[path = "../../tests/unit/parse/line.rs"]
mod tests;
