use thiserror::Error;

/// Errors raised while building, transforming or applying schemes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemeError {
    /// Empty image, empty palette, zero or too small lengths and counts,
    /// weights that do not match their scheme.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A breakpoint table or control-point list whose positions are not
    /// monotonic, do not span \[0, 1\], or whose values are not normalized.
    #[error("malformed specification: {0}")]
    MalformedSpec(String),
}

pub type Result<T> = std::result::Result<T, SchemeError>;

pub(crate) fn invalid(msg: impl Into<String>) -> SchemeError {
    SchemeError::InvalidInput(msg.into())
}

pub(crate) fn malformed(msg: impl Into<String>) -> SchemeError {
    SchemeError::MalformedSpec(msg.into())
}
