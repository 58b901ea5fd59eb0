/// An error that occurred while translating a build script.
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("An error occurred while working with Input/Output: {0}")]
    IoError(String),
    #[error(transparent)]
    Utf8Error(#[from] std::str::Utf8Error),
    #[error("An error occurred while lexing the build script: {0}")]
    LexicalError(#[from] crate::lexical::Error),
    #[error(transparent)]
    ParseError(#[from] crate::syntax::error::Error),
    #[error(transparent)]
    SemanticError(#[from] crate::semantic::error::Error),
    #[error("An error occurred: {0}")]
    Other(&'static str),
}

impl Error {
    /// Whether the error stems from the front-end failing to produce a syntax tree.
    #[must_use]
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::LexicalError(_) | Self::ParseError(_) | Self::Other(_)
        )
    }

    /// Whether the error is a semantic error raised while building the translation model.
    #[must_use]
    pub fn is_semantic_error(&self) -> bool {
        matches!(self, Self::SemanticError(_))
    }
}

/// A specialized [`Result`] type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
