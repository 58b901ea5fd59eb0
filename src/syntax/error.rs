//! Contains the error types that can occur while parsing the syntax of a build script.

use std::fmt::Display;

use crate::{
    base::{
        log::{Message, Severity, SourceCodeDisplay},
        source_file::Span,
    },
    lexical::token::{KeywordKind, Token},
};

/// An enumeration containing all kinds of syntactic errors that can occur while parsing a
/// build script.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    UnexpectedSyntax(#[from] UnexpectedSyntax),
    #[error(transparent)]
    UnknownRepository(#[from] UnknownRepository),
}

/// Enumeration containing all kinds of syntax that can be failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum SyntaxKind {
    Either(&'static [SyntaxKind]),
    Punctuation(char),
    Keyword(KeywordKind),
    /// An identifier that has to be spelled exactly like this.
    ContextualKeyword(&'static str),
    Identifier,
    StringLiteral,
    Declaration,
    PluginEntry,
    RepositoryEntry,
    DependencyEntry,
    TaskStatement,
    Expression,
}

impl SyntaxKind {
    fn expected_binding_str(&self) -> String {
        match self {
            Self::Either(variants) => match variants {
                [] => "end of file".to_string(),
                [single] => single.expected_binding_str(),
                [init @ .., last] => format!(
                    "{}, or {}",
                    init.iter()
                        .map(Self::expected_binding_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                    last.expected_binding_str()
                ),
            },
            Self::Identifier => "an identifier token".to_string(),
            Self::Punctuation(char) => format!("a punctuation token `{char}`"),
            Self::Keyword(keyword) => format!("a keyword token `{}`", keyword.as_str()),
            Self::ContextualKeyword(word) => format!("the identifier `{word}`"),
            Self::StringLiteral => "a string literal".to_string(),
            Self::Declaration => {
                "a `plugins`, `repositories`, `dependencies` or `tasks.register` block".to_string()
            }
            Self::PluginEntry => "a plugin entry `id '<plugin>'`".to_string(),
            Self::RepositoryEntry => "a repository entry".to_string(),
            Self::DependencyEntry => "a dependency entry `<configuration> '<coordinate>'`".to_string(),
            Self::TaskStatement => "a task statement `<key> = <value>`".to_string(),
            Self::Expression => "a string literal or a dotted identifier path".to_string(),
        }
    }
}

/// A syntax/token is expected but found an other invalid token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnexpectedSyntax {
    /// The kind of syntax that was expected.
    pub expected: SyntaxKind,

    /// The invalid token that was found.
    pub found: Option<Token>,
}

impl Display for UnexpectedSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let expected_binding = self.expected.expected_binding_str();
        let found_binding = match &self.found {
            Some(Token::Comment(..)) => "a comment token".to_string(),
            Some(Token::Identifier(identifier)) => {
                format!("the identifier `{}`", identifier.span.str())
            }
            Some(Token::Keyword(keyword)) => {
                format!("a keyword token `{}`", keyword.keyword.as_str())
            }
            Some(Token::WhiteSpaces(..)) => "a white spaces token".to_string(),
            Some(Token::Punctuation(punctuation)) => {
                format!("a punctuation token `{}`", punctuation.punctuation)
            }
            Some(Token::Numeric(..)) => "a numeric token".to_string(),
            Some(Token::StringLiteral(..)) => "a string literal token".to_string(),

            None => "EOF".to_string(),
        };

        let message = format!("expected {expected_binding}, but found {found_binding}");

        write!(f, "{}", Message::new(Severity::Error, message))?;

        self.found.as_ref().map_or(Ok(()), |token| {
            write!(
                f,
                "\n{}",
                SourceCodeDisplay::new(token.span(), Option::<u8>::None)
            )
        })
    }
}

impl std::error::Error for UnexpectedSyntax {}

/// A call inside a `repositories` block that does not name a supported repository.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnknownRepository {
    /// The span of the repository name.
    pub span: Span,
    /// Supported repository names that are spelled similarly.
    pub alternatives: Vec<&'static str>,
}

impl UnknownRepository {
    pub(crate) fn from_name(span: Span) -> Self {
        use itertools::Itertools as _;
        use strum::IntoEnumIterator as _;

        let name = span.str();
        let alternatives = KeywordKind::iter()
            .filter(|kind| kind.is_repository())
            .map(KeywordKind::as_str)
            .filter_map(|candidate| {
                let normalized_distance = strsim::normalized_damerau_levenshtein(name, candidate);
                (normalized_distance > 0.6 || strsim::damerau_levenshtein(name, candidate) < 3)
                    .then_some((normalized_distance, candidate))
            })
            .sorted_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, candidate)| candidate)
            .collect();

        Self { span, alternatives }
    }
}

impl Display for UnknownRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = format!("unsupported repository `{}`", self.span.str());
        write!(f, "{}", Message::new(Severity::Error, message))?;

        let help_message = if self.alternatives.is_empty() {
            "supported repositories are `mavenCentral()`, `jcenter()` and `maven { url '...' }`"
                .to_string()
        } else {
            format!(
                "did you mean {}?",
                self.alternatives
                    .iter()
                    .map(|alternative| format!("`{alternative}`"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };

        write!(
            f,
            "\n{}",
            SourceCodeDisplay::new(&self.span, Some(help_message))
        )
    }
}

impl std::error::Error for UnknownRepository {}
