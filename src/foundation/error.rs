use std::fmt;

/// Result type used across the crate.
pub type Aup2Result<T> = Result<T, Aup2Error>;

/// Error taxonomy of the parse, layout and IO APIs.
#[derive(thiserror::Error, Debug)]
pub enum Aup2Error {
    /// A header whose id cannot be represented; fatal for the whole parse.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Bad caller input (scene/layer ids, input paths), raised before any mutation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Every reason a document cannot be written back out.
    #[error("structural error: {0}")]
    Structure(StructureErrors),

    /// Frame windows or ids that the layout engine cannot place.
    #[error("layout error: {0}")]
    Layout(String),

    /// A keyed tree that does not describe a document.
    #[error("tree error: {0}")]
    Tree(String),

    /// Errors when serializing or deserializing JSON.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error, mostly IO with path context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Aup2Error {
    /// Build a [`Aup2Error::Parse`] value for a 1-based line number.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Build a [`Aup2Error::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`Aup2Error::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`Aup2Error::Tree`] value.
    pub fn tree(msg: impl Into<String>) -> Self {
        Self::Tree(msg.into())
    }

    /// Build a [`Aup2Error::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Every violated reconstruction precondition, in check order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructureErrors {
    pub errors: Vec<String>,
}

impl StructureErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl fmt::Display for StructureErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(e)?;
        }
        Ok(())
    }
}

impl std::error::Error for StructureErrors {}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
