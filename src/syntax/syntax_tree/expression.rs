//! Syntax tree nodes for the values assigned inside task configuration blocks.

use enum_as_inner::EnumAsInner;

use crate::{
    base::{
        self,
        source_file::{SourceElement, Span},
        Handler,
    },
    lexical::token::{Identifier, Punctuation, StringLiteral, Token},
    syntax::{
        error::{Error, SyntaxKind, UnexpectedSyntax},
        parser::{Parser, Reading},
    },
};

use super::ConnectedList;

/// Syntax Synopsis:
///
/// ```ebnf
/// Expression:
///     StringLiteral
///     | IdentifierPath
///     ;
///
/// IdentifierPath:
///     (Identifier | Keyword) ('.' (Identifier | Keyword))*
///     ;
/// ```
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
pub enum Expression {
    StringLiteral(StringLiteral),
    IdentifierPath(IdentifierPath),
}

impl SourceElement for Expression {
    fn span(&self) -> Span {
        match self {
            Self::StringLiteral(literal) => literal.span(),
            Self::IdentifierPath(path) => path.span(),
        }
    }
}

/// A dotted path such as `sourceSets.main.runtimeClasspath`.
pub type IdentifierPath = ConnectedList<Identifier, Punctuation>;

impl IdentifierPath {
    /// Returns the path as written, without surrounding whitespace between the segments.
    #[must_use]
    pub fn to_dotted_string(&self) -> String {
        self.elements()
            .map(|identifier| identifier.span.str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl<'a> Parser<'a> {
    /// Parses an [`Expression`].
    pub fn parse_expression(&mut self, handler: &impl Handler<base::Error>) -> Option<Expression> {
        match self.stop_at_significant() {
            Reading::Atomic(Token::StringLiteral(literal)) => {
                // eat the string literal
                self.forward();

                Some(Expression::StringLiteral(literal))
            }

            Reading::Atomic(Token::Identifier(_) | Token::Keyword(_)) => {
                self.parse_identifier_path(handler).map(Expression::IdentifierPath)
            }

            unexpected => {
                // make progress
                self.forward();

                handler.receive(Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::Expression,
                    found: unexpected.into_token(),
                }));

                None
            }
        }
    }

    /// Parses an [`IdentifierPath`].
    pub fn parse_identifier_path(
        &mut self,
        handler: &impl Handler<base::Error>,
    ) -> Option<IdentifierPath> {
        let mut path = IdentifierPath::new(self.parse_name(handler)?);

        while let Reading::Atomic(Token::Punctuation(dot)) = self.stop_at_significant() {
            if dot.punctuation != '.' {
                break;
            }

            // eat the dot
            self.forward();

            let segment = self.parse_name(handler)?;
            path.push(dot, segment);
        }

        Some(path)
    }
}
