use std::fmt::Display;

use crate::base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

use super::token_stream::Delimiter;

/// Represents an error that occurred during the lexical analysis of the build script.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    UnterminatedDelimitedComment(#[from] UnterminatedDelimitedComment),
    #[error(transparent)]
    UnterminatedStringLiteral(#[from] UnterminatedStringLiteral),
    #[error(transparent)]
    UndelimitedDelimiter(#[from] UndelimitedDelimiter),
}

/// Source code contains an unclosed `/*` comment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub struct UnterminatedDelimitedComment {
    /// Span of the unclosed `/*` that starts the comment.
    pub span: Span,
}

impl Display for UnterminatedDelimitedComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unclosed `/*` comment"),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// Source code contains a string literal without its closing quote.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub struct UnterminatedStringLiteral {
    /// Span of the opening quote.
    pub span: Span,
}

impl Display for UnterminatedStringLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unterminated string literal"),
            SourceCodeDisplay::new(
                &self.span,
                Some(format!("add a closing `{}`", self.span.str()))
            )
        )
    }
}

/// Delimiter is not closed by its corresponding closing pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub struct UndelimitedDelimiter {
    /// Span of the opening delimiter.
    pub opening_span: Span,

    /// Kind of the delimiter.
    pub delimiter: Delimiter,
}

impl Display for UndelimitedDelimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an undelimited delimiter"),
            SourceCodeDisplay::new(
                &self.opening_span,
                Some(format!(
                    "this `{}` is not closed by a matching `{}`",
                    self.delimiter.opening_char(),
                    self.delimiter.closing_char()
                ))
            )
        )
    }
}
