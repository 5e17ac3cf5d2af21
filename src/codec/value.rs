//! Textual value grammar of the project format.
//!
//! Every right-hand side of a `key=value` line goes through [`decode`]; every value written back
//! goes through [`encode`]. Decoding is total: anything that is not a recognizable number, number
//! list or color code is kept verbatim as text.

use std::fmt;

/// A decoded property value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Unsigned digit run without a significant leading zero.
    Integer(i64),
    /// `-?digits.digits`.
    Float(f64),
    /// Comma-separated numbers, e.g. a `frame=0,9` window.
    Sequence(NumericSeq),
    /// Six or eight lower-case hex digits (RGB / RGBA).
    HexColor(String),
    /// Anything else, kept verbatim.
    Text(String),
    /// Nothing after the `=`.
    Empty,
}

/// Homogeneous number list; a single float element promotes the whole list.
#[derive(Clone, Debug, PartialEq)]
pub enum NumericSeq {
    Integers(Vec<i64>),
    Floats(Vec<f64>),
}

impl NumericSeq {
    pub fn len(&self) -> usize {
        match self {
            Self::Integers(v) => v.len(),
            Self::Floats(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Recoverable oddities noticed while decoding. The value is still produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeWarning {
    InvalidNumericList(String),
    IntegerOverflow(String),
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumericList(raw) => write!(f, "possibly invalid numeric list: {raw}"),
            Self::IntegerOverflow(raw) => write!(f, "integer out of range, kept as text: {raw}"),
        }
    }
}

enum Number {
    Int(i64),
    Float(f64),
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_float_literal(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    match body.split_once('.') {
        Some((int, frac)) => is_digits(int) && is_digits(frac),
        None => false,
    }
}

/// Six or eight digits or lower-case hex letters. Mixed- or upper-case runs (`Facade`, `FF00AA`)
/// are left to the text rule so they are written back exactly as read.
fn is_color_code(s: &str) -> bool {
    (s.len() == 6 || s.len() == 8)
        && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn parse_number(part: &str) -> Option<Number> {
    if is_digits(part) {
        return part.parse::<i64>().ok().map(Number::Int);
    }
    if is_float_literal(part) {
        return part.parse::<f64>().ok().map(Number::Float);
    }
    None
}

fn parse_sequence(raw: &str) -> Option<NumericSeq> {
    let mut numbers = Vec::new();
    for part in raw.split(',') {
        numbers.push(parse_number(part.trim())?);
    }
    if numbers.iter().all(|n| matches!(n, Number::Int(_))) {
        let ints = numbers
            .into_iter()
            .filter_map(|n| match n {
                Number::Int(v) => Some(v),
                Number::Float(_) => None,
            })
            .collect();
        return Some(NumericSeq::Integers(ints));
    }
    let floats = numbers
        .into_iter()
        .map(|n| match n {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        })
        .collect();
    Some(NumericSeq::Floats(floats))
}

/// Decodes one raw value. Surrounding whitespace is ignored.
pub fn decode(raw: &str) -> (Value, Option<DecodeWarning>) {
    let raw = raw.trim();

    if is_color_code(raw) {
        return (Value::HexColor(raw.to_string()), None);
    }

    if is_digits(raw) {
        // "007" must survive as written.
        if raw.len() > 1 && raw.starts_with('0') {
            return (Value::Text(raw.to_string()), None);
        }
        return match raw.parse::<i64>() {
            Ok(v) => (Value::Integer(v), None),
            Err(_) => (
                Value::Text(raw.to_string()),
                Some(DecodeWarning::IntegerOverflow(raw.to_string())),
            ),
        };
    }

    if is_float_literal(raw)
        && let Ok(v) = raw.parse::<f64>()
    {
        return (Value::Float(v), None);
    }

    let mut warning = None;
    if raw.contains(',') {
        match parse_sequence(raw) {
            Some(seq) => return (Value::Sequence(seq), None),
            None => warning = Some(DecodeWarning::InvalidNumericList(raw.to_string())),
        }
    }

    if raw.is_empty() {
        return (Value::Empty, warning);
    }
    (Value::Text(raw.to_string()), warning)
}

fn encode_float(v: f64) -> String {
    if v.fract() == 0.0 {
        if v.abs() < 9.0e18 {
            return (v as i64).to_string();
        }
        return format!("{v:.0}");
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0');
    s.trim_end_matches('.').to_string()
}

/// Renders a value in the textual grammar.
pub fn encode(value: &Value) -> String {
    match value {
        Value::Integer(v) => v.to_string(),
        Value::Float(v) => encode_float(*v),
        Value::Sequence(NumericSeq::Integers(items)) => items
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(","),
        Value::Sequence(NumericSeq::Floats(items)) => items
            .iter()
            .map(|v| encode_float(*v))
            .collect::<Vec<_>>()
            .join(","),
        Value::HexColor(s) | Value::Text(s) => s.clone(),
        Value::Empty => String::new(),
    }
}

impl Value {
    /// [`decode`] without the warning channel.
    pub fn decode(raw: &str) -> Self {
        decode(raw).0
    }

    pub fn encode(&self) -> String {
        encode(self)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integers(&self) -> Option<&[i64]> {
        match self {
            Self::Sequence(NumericSeq::Integers(v)) => Some(v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Self::Sequence(NumericSeq::Integers(v))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/value.rs"]
mod tests;
