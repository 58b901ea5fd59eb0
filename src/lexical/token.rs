//! Contains the [`Token`] struct and its related types.

use std::{collections::HashMap, fmt::Display, str::FromStr, sync::OnceLock};

use crate::base::{
    self,
    source_file::{SourceElement, SourceIterator, Span},
    Handler,
};
use derive_more::From;
use enum_as_inner::EnumAsInner;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use super::error::{UnterminatedDelimitedComment, UnterminatedStringLiteral};

/// Is an enumeration representing the reserved words of the build script DSL.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    Plugins,
    Repositories,
    Dependencies,
    Tasks,
    MavenCentral,
    JCenter,
    Maven,
}

impl Display for KeywordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Is an error that is returned when a string cannot be parsed into a [`Keyword`] in [`FromStr`]
/// trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, thiserror::Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static STRING_KEYWORD_MAP: OnceLock<HashMap<&'static str, KeywordKind>> = OnceLock::new();
        let map = STRING_KEYWORD_MAP.get_or_init(|| {
            let mut map = HashMap::new();

            for keyword in Self::iter() {
                map.insert(keyword.as_str(), keyword);
            }

            map
        });

        map.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the string representation of the keyword as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plugins => "plugins",
            Self::Repositories => "repositories",
            Self::Dependencies => "dependencies",
            Self::Tasks => "tasks",
            Self::MavenCentral => "mavenCentral",
            Self::JCenter => "jcenter",
            Self::Maven => "maven",
        }
    }

    /// Whether the keyword opens a top-level declaration block.
    #[must_use]
    pub fn starts_declaration(self) -> bool {
        matches!(
            self,
            Self::Plugins | Self::Repositories | Self::Dependencies | Self::Tasks
        )
    }

    /// Whether the keyword names a repository inside a `repositories` block.
    #[must_use]
    pub fn is_repository(self) -> bool {
        matches!(self, Self::MavenCentral | Self::JCenter | Self::Maven)
    }
}

/// Is an enumeration containing all kinds of tokens in a build script.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, From, EnumAsInner)]
#[allow(missing_docs)]
pub enum Token {
    WhiteSpaces(WhiteSpaces),
    Identifier(Identifier),
    Keyword(Keyword),
    Punctuation(Punctuation),
    Numeric(Numeric),
    Comment(Comment),
    StringLiteral(StringLiteral),
}

impl Token {
    /// Returns the span of the token.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::WhiteSpaces(token) => &token.span,
            Self::Identifier(token) => &token.span,
            Self::Keyword(token) => &token.span,
            Self::Punctuation(token) => &token.span,
            Self::Numeric(token) => &token.span,
            Self::Comment(token) => &token.span,
            Self::StringLiteral(token) => &token.span,
        }
    }

    /// Whether the token carries meaning for the parser.
    #[must_use]
    pub fn is_significant(&self) -> bool {
        !matches!(self, Self::WhiteSpaces(_) | Self::Comment(_))
    }
}

impl SourceElement for Token {
    fn span(&self) -> Span {
        self.span().clone()
    }
}

/// Represents a contiguous sequence of whitespace characters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WhiteSpaces {
    /// Is the span that makes up the token.
    pub span: Span,
}

impl SourceElement for WhiteSpaces {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Represents a contiguous sequence of characters that are valid in an identifier.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    /// Is the span that makes up the token.
    pub span: Span,
}

impl SourceElement for Identifier {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Represents a contiguous sequence of characters that are reserved for a keyword.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keyword {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the [`KeywordKind`] that the token represents.
    pub keyword: KeywordKind,
}

impl SourceElement for Keyword {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Represents a single punctuation character.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Punctuation {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the punctuation character that the token represents.
    pub punctuation: char,
}

impl SourceElement for Punctuation {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Represents a hardcoded numeric literal value in the source code.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Numeric {
    /// Is the span that makes up the token.
    pub span: Span,
}

impl SourceElement for Numeric {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Represents a quoted string literal, delimited by either `'` or `"`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringLiteral {
    /// Is the span that makes up the token.
    pub span: Span,
}

impl StringLiteral {
    /// Returns the string without its quote delimiters.
    #[must_use]
    pub fn str_content(&self) -> &str {
        let string = self.span.str();
        &string[1..string.len() - 1]
    }

    /// Returns the quote character delimiting the literal.
    #[must_use]
    pub fn quote(&self) -> char {
        self.span.str().chars().next().unwrap_or('\'')
    }
}

impl SourceElement for StringLiteral {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Is an enumeration representing the two kinds of comments in a build script.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommentKind {
    /// A comment that starts with `//` and ends at the end of the line.
    Line,

    /// A comment that starts with `/*` and ends with `*/`.
    Delimited,
}

/// Represents a portion of the source code that is ignored by the transpiler.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Comment {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the kind of comment that the token represents.
    pub kind: CommentKind,
}

impl SourceElement for Comment {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Is an error that can occur when invoking the [`Token::tokenize`] method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[allow(missing_docs)]
pub enum TokenizeError {
    #[error("encountered a fatal lexical error that causes the process to stop.")]
    FatalLexicalError,

    #[error("the iterator argument is at the end of the source code.")]
    EndOfSourceCodeIteratorArgument,
}

impl Token {
    /// Increments the iterator while the predicate returns true.
    pub fn walk_iter(iter: &mut SourceIterator, predicate: impl Fn(char) -> bool) {
        while let Some((_, character)) = iter.peek() {
            if !predicate(character) {
                break;
            }

            iter.next();
        }
    }

    /// Creates a span from the given start location to the current location of the iterator.
    fn create_span(start: usize, iter: &mut SourceIterator) -> Span {
        let source_file = iter.source_file().clone();
        let end = iter
            .peek()
            .map_or_else(|| source_file.content().len(), |(index, _)| index);

        Span::new(source_file, start, end).expect("token boundaries are char boundaries")
    }

    /// Checks if the given character is a valid first character of an identifier.
    fn is_first_identifier_character(character: char) -> bool {
        character == '_'
            || (!character.is_control()
                && !character.is_whitespace()
                && !character.is_ascii_punctuation()
                && !character.is_ascii_digit())
    }

    /// Checks if the given character is a valid character of an identifier.
    fn is_identifier_character(character: char) -> bool {
        character == '_'
            || (!character.is_control()
                && !character.is_whitespace()
                && !character.is_ascii_punctuation())
    }

    /// Handles a contiguous sequence of whitespace characters.
    fn handle_whitespace(iter: &mut SourceIterator, start: usize) -> Self {
        Self::walk_iter(iter, char::is_whitespace);

        WhiteSpaces {
            span: Self::create_span(start, iter),
        }
        .into()
    }

    /// Handles a contiguous sequence of characters that are valid in an identifier.
    fn handle_identifier_and_keyword(iter: &mut SourceIterator, start: usize) -> Self {
        Self::walk_iter(iter, Self::is_identifier_character);

        let span = Self::create_span(start, iter);

        KeywordKind::from_str(span.str()).map_or_else(
            |_| Identifier { span: span.clone() }.into(),
            |keyword| {
                Keyword {
                    span: span.clone(),
                    keyword,
                }
                .into()
            },
        )
    }

    /// Handles a sequence starting with a slash
    fn handle_comment(
        iter: &mut SourceIterator,
        start: usize,
        character: char,
        handler: &impl Handler<base::Error>,
    ) -> Result<Self, TokenizeError> {
        // Single line comment
        if let Some((_, '/')) = iter.peek() {
            iter.next();

            Self::walk_iter(iter, |character| !(character == '\n' || character == '\r'));

            Ok(Comment {
                span: Self::create_span(start, iter),
                kind: CommentKind::Line,
            }
            .into())
        }
        // Delimited comment
        else if let Some((_, '*')) = iter.peek() {
            iter.next();

            let mut is_terminated = false;

            while let Some((_, character)) = iter.next() {
                if character == '*' {
                    if let Some((_, '/')) = iter.peek() {
                        iter.next();

                        is_terminated = true;

                        break;
                    }
                }
            }

            if is_terminated {
                Ok(Comment {
                    span: Self::create_span(start, iter),
                    kind: CommentKind::Delimited,
                }
                .into())
            } else {
                if let Some(span) = Span::new(iter.source_file().clone(), start, start + 2) {
                    handler.receive(super::Error::from(UnterminatedDelimitedComment { span }));
                }
                Err(TokenizeError::FatalLexicalError)
            }
        }
        // Just a single slash punctuation
        else {
            Ok(Punctuation {
                span: Self::create_span(start, iter),
                punctuation: character,
            }
            .into())
        }
    }

    /// Handles a sequence of digits
    fn handle_numeric_literal(iter: &mut SourceIterator, start: usize) -> Self {
        Self::walk_iter(iter, |character| character.is_ascii_digit());

        Numeric {
            span: Self::create_span(start, iter),
        }
        .into()
    }

    /// Handles a sequence of characters that are enclosed in matching quotes
    fn handle_string_literal(
        iter: &mut SourceIterator,
        start: usize,
        quote: char,
        handler: &impl Handler<base::Error>,
    ) -> Result<Self, TokenizeError> {
        let mut is_escaped = false;
        let mut is_terminated = false;

        for (_, character) in iter.by_ref() {
            if character == '\\' {
                is_escaped = !is_escaped;
            } else if character == quote && !is_escaped {
                is_terminated = true;
                break;
            } else {
                is_escaped = false;
            }
        }

        if is_terminated {
            Ok(StringLiteral {
                span: Self::create_span(start, iter),
            }
            .into())
        } else {
            if let Some(span) = Span::new(iter.source_file().clone(), start, start + 1) {
                handler.receive(super::Error::from(UnterminatedStringLiteral { span }));
            }
            Err(TokenizeError::FatalLexicalError)
        }
    }

    /// Lexes the source code from the given iterator.
    ///
    /// The tokenization starts at the current location of the iterator. The function moves the
    /// iterator at least once and forwards it until it makes a token. After the token is made, the
    /// iterator is left at the next character that is not part of the token.
    ///
    /// # Errors
    /// - [`TokenizeError::EndOfSourceCodeIteratorArgument`] - The iterator argument is at the end of the
    ///   source code.
    /// - [`TokenizeError::FatalLexicalError`] - A fatal lexical error occurred.
    pub fn tokenize(
        iter: &mut SourceIterator,
        handler: &impl Handler<base::Error>,
    ) -> Result<Self, TokenizeError> {
        let (start, character) = iter
            .next()
            .ok_or(TokenizeError::EndOfSourceCodeIteratorArgument)?;

        if character.is_whitespace() {
            Ok(Self::handle_whitespace(iter, start))
        } else if Self::is_first_identifier_character(character) {
            Ok(Self::handle_identifier_and_keyword(iter, start))
        } else if character == '/' {
            Self::handle_comment(iter, start, character, handler)
        } else if character == '"' || character == '\'' {
            Self::handle_string_literal(iter, start, character, handler)
        } else if character.is_ascii_digit() {
            Ok(Self::handle_numeric_literal(iter, start))
        } else {
            // anything else is left for the parser to reject
            Ok(Punctuation {
                span: Self::create_span(start, iter),
                punctuation: character,
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::base::{source_file::SourceFile, SilentHandler};

    use super::*;

    fn tokenize_all(source: &str) -> (Vec<Token>, SilentHandler) {
        let source_file = SourceFile::from_source("build.gradle", source);
        let handler = SilentHandler::new();
        let mut iter = source_file.iter();
        let mut tokens = Vec::new();

        while let Ok(token) = Token::tokenize(&mut iter, &handler) {
            tokens.push(token);
        }

        (tokens, handler)
    }

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(
            KeywordKind::from_str("mavenCentral"),
            Ok(KeywordKind::MavenCentral)
        );
        assert_eq!(KeywordKind::from_str("jcenter"), Ok(KeywordKind::JCenter));
        assert!(KeywordKind::from_str("implementation").is_err());
        assert!(KeywordKind::iter().all(|kw| KeywordKind::from_str(kw.as_str()) == Ok(kw)));
    }

    #[test]
    fn test_string_literals() {
        let (tokens, handler) = tokenize_all(r#"'org.x:core:1.0' "it's""#);
        let literals = tokens
            .into_iter()
            .filter_map(|token| token.into_string_literal().ok())
            .collect::<Vec<_>>();

        assert!(!handler.has_received());
        assert_eq!(literals.len(), 2);
        assert_eq!(literals[0].str_content(), "org.x:core:1.0");
        assert_eq!(literals[0].quote(), '\'');
        assert_eq!(literals[1].str_content(), "it's");
        assert_eq!(literals[1].quote(), '"');
    }

    #[test]
    fn test_comments_are_insignificant() {
        let (tokens, handler) = tokenize_all("// line\nplugins /* block */ {}");

        assert!(!handler.has_received());
        let significant = tokens
            .iter()
            .filter(|token| token.is_significant())
            .collect::<Vec<_>>();
        assert_eq!(significant.len(), 3);
        assert!(matches!(
            significant[0],
            Token::Keyword(Keyword {
                keyword: KeywordKind::Plugins,
                ..
            })
        ));
    }

    #[test]
    fn test_unterminated_string() {
        let (_, handler) = tokenize_all("implementation 'org.x:core:1.0");

        let received = handler.received();
        assert_eq!(received.len(), 1);
        assert!(matches!(
            received[0],
            base::Error::LexicalError(crate::lexical::Error::UnterminatedStringLiteral(_))
        ));
    }

    #[test]
    fn test_unterminated_comment() {
        let (_, handler) = tokenize_all("plugins { /* id 'java' }");

        assert!(matches!(
            handler.received().as_slice(),
            [base::Error::LexicalError(
                crate::lexical::Error::UnterminatedDelimitedComment(_)
            )]
        ));
    }
}
