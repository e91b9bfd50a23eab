use std::fmt;

use thiserror::Error;

/// Errors produced by the negotiation layer.
///
/// A failed negotiation is not an error. Negotiators return `None` when the
/// local and peer lists share nothing, and signature or Finished verification
/// returns `Ok(false)` on mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed or truncated wire data. The handshake must abort.
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Caller supplied a value outside the accepted domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Signature scheme identifier with no known hash/padding mapping.
    #[error("Unsupported signature scheme 0x{0:04x}")]
    UnsupportedSignatureScheme(u16),

    /// Failure inside a cryptographic primitive (bad key material, provider error).
    #[error("Crypto error: {0}")]
    Crypto(String),
}

/// Failure decoding a wire structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatError {
    kind: FormatErrorKind,
    context: &'static str,
}

/// What went wrong while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// A fixed-size field ran past the end of the buffer.
    Truncated,
    /// A declared length exceeds the remaining bytes.
    LengthOverrun { declared: usize, remaining: usize },
    /// Bytes left over after the structure was fully decoded.
    TrailingData(usize),
    /// A list of 16-bit values has an odd byte length.
    OddLength(usize),
    /// The same extension type appears twice in one block.
    DuplicateExtension(u16),
    /// A length-prefixed value that must not be empty is.
    EmptyValue,
}

impl FormatError {
    pub fn new(kind: FormatErrorKind, context: &'static str) -> Self {
        FormatError { kind, context }
    }

    pub fn kind(&self) -> FormatErrorKind {
        self.kind
    }

    /// Name of the structure being decoded.
    pub fn context(&self) -> &'static str {
        self.context
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FormatErrorKind::Truncated => write!(f, "{}: truncated", self.context),
            FormatErrorKind::LengthOverrun {
                declared,
                remaining,
            } => write!(
                f,
                "{}: declared length {} exceeds remaining {}",
                self.context, declared, remaining
            ),
            FormatErrorKind::TrailingData(n) => {
                write!(f, "{}: {} trailing bytes", self.context, n)
            }
            FormatErrorKind::OddLength(n) => {
                write!(f, "{}: odd list length {}", self.context, n)
            }
            FormatErrorKind::DuplicateExtension(t) => {
                write!(f, "{}: duplicate extension 0x{:04x}", self.context, t)
            }
            FormatErrorKind::EmptyValue => write!(f, "{}: empty value", self.context),
        }
    }
}

impl std::error::Error for FormatError {}

impl Error {
    pub(crate) fn format(kind: FormatErrorKind, context: &'static str) -> Self {
        Error::Format(FormatError::new(kind, context))
    }

    pub(crate) fn truncated(context: &'static str) -> Self {
        Self::format(FormatErrorKind::Truncated, context)
    }

    /// The format error kind, if this is a format error.
    pub fn format_kind(&self) -> Option<FormatErrorKind> {
        match self {
            Error::Format(e) => Some(e.kind()),
            _ => None,
        }
    }
}
