//! Error types raised while building the translation model.

#![allow(missing_docs)]

use std::fmt::Display;

use crate::base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    MissingRepositoryUrl(#[from] MissingRepositoryUrl),
}

/// A `maven { }` repository entry that does not declare a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingRepositoryUrl {
    /// The span of the whole repository entry.
    pub span: Span,
}

impl Display for MissingRepositoryUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            Message::new(
                Severity::Error,
                "custom repository does not declare a URL"
            )
        )?;

        write!(
            f,
            "\n{}",
            SourceCodeDisplay::new(&self.span, Some("add `url '<repository url>'` to the block"))
        )
    }
}

impl std::error::Error for MissingRepositoryUrl {}
