//! Provides the [`Parser`] that walks a [`TokenStream`] and produces syntax tree nodes.

use derive_more::{Deref, DerefMut};
use enum_as_inner::EnumAsInner;

use crate::{
    base::{self, Handler},
    lexical::{
        token::{Identifier, Keyword, KeywordKind, Punctuation, StringLiteral, Token},
        token_stream::{Delimited, Delimiter, TokenStream, TokenTree},
    },
};

use super::error::{SyntaxKind, UnexpectedSyntax};

/// Provides a way to parse a token stream into syntax tree nodes.
///
/// The parser keeps a stack of [`Frame`]s; stepping into a delimited token tree pushes a new
/// frame that reads the tokens between the delimiters.
#[derive(Debug, Deref, DerefMut)]
pub struct Parser<'a> {
    #[deref]
    #[deref_mut]
    current_frame: Frame<'a>,
    stack: Vec<Frame<'a>>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser from the given token stream.
    #[must_use]
    pub fn new(token_stream: &'a TokenStream) -> Self {
        Self {
            current_frame: Frame {
                token_provider: TokenProvider::TokenStream(token_stream),
                current_index: 0,
            },
            stack: Vec::new(),
        }
    }

    /// Steps into the [`Delimited`] token stream and parses the content within the delimiters.
    ///
    /// The parser is positioned after the closing delimiter afterwards. The returned tree is
    /// [`None`] if the given function failed or did not consume every significant token.
    pub fn step_into<T>(
        &mut self,
        delimiter: Delimiter,
        f: impl FnOnce(&mut Self) -> Option<T>,
        handler: &impl Handler<base::Error>,
    ) -> Option<DelimitedTree<T>> {
        let found = self.current_frame.stop_at_significant();
        let provider = self.current_frame.token_provider;

        let delimited = match provider
            .token_stream()
            .get(self.current_frame.current_index)
        {
            Some(TokenTree::Delimited(delimited)) if delimited.delimiter == delimiter => delimited,
            _ => {
                handler.receive(super::error::Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::Punctuation(delimiter.opening_char()),
                    found: found.into_token(),
                }));
                return None;
            }
        };

        // skip the whole delimited tree in the current frame
        self.current_frame.forward();

        let new_frame = Frame {
            token_provider: TokenProvider::Delimited(delimited),
            current_index: 0,
        };
        let outer_frame = std::mem::replace(&mut self.current_frame, new_frame);
        self.stack.push(outer_frame);

        let mut tree = f(self);

        if tree.is_some() && !self.current_frame.is_exhausted() {
            handler.receive(super::error::Error::from(UnexpectedSyntax {
                expected: SyntaxKind::Punctuation(delimiter.closing_char()),
                found: self.current_frame.stop_at_significant().into_token(),
            }));
            tree = None;
        }

        if let Some(outer_frame) = self.stack.pop() {
            self.current_frame = outer_frame;
        }

        Some(DelimitedTree {
            open: delimited.open.clone(),
            tree,
            close: delimited.close.clone(),
        })
    }

    /// Parses an [`Identifier`].
    pub fn parse_identifier(&mut self, handler: &impl Handler<base::Error>) -> Option<Identifier> {
        match self.next_significant_token() {
            Reading::Atomic(Token::Identifier(identifier)) => Some(identifier),
            found => {
                handler.receive(super::error::Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::Identifier,
                    found: found.into_token(),
                }));
                None
            }
        }
    }

    /// Parses a name, which is an [`Identifier`] or a keyword used as a property name.
    ///
    /// Keywords only introduce declarations at the top level; inside a task block `tasks` or
    /// `dependencies` are plain property names.
    pub fn parse_name(&mut self, handler: &impl Handler<base::Error>) -> Option<Identifier> {
        match self.next_significant_token() {
            Reading::Atomic(Token::Identifier(identifier)) => Some(identifier),
            Reading::Atomic(Token::Keyword(keyword)) => Some(Identifier { span: keyword.span }),
            found => {
                handler.receive(super::error::Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::Identifier,
                    found: found.into_token(),
                }));
                None
            }
        }
    }

    /// Parses an [`Identifier`] that has to be spelled exactly like `word`.
    pub fn parse_contextual_keyword(
        &mut self,
        word: &'static str,
        handler: &impl Handler<base::Error>,
    ) -> Option<Identifier> {
        match self.next_significant_token() {
            Reading::Atomic(Token::Identifier(identifier)) if identifier.span.str() == word => {
                Some(identifier)
            }
            found => {
                handler.receive(super::error::Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::ContextualKeyword(word),
                    found: found.into_token(),
                }));
                None
            }
        }
    }

    /// Parses a [`Keyword`] of the given kind.
    pub fn parse_keyword(
        &mut self,
        expected: KeywordKind,
        handler: &impl Handler<base::Error>,
    ) -> Option<Keyword> {
        match self.next_significant_token() {
            Reading::Atomic(Token::Keyword(keyword)) if keyword.keyword == expected => {
                Some(keyword)
            }
            found => {
                handler.receive(super::error::Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::Keyword(expected),
                    found: found.into_token(),
                }));
                None
            }
        }
    }

    /// Parses a [`Punctuation`] with the given character.
    ///
    /// Whitespaces and comments in front of it are skipped if `skip_insignificant` is set.
    pub fn parse_punctuation(
        &mut self,
        expected: char,
        skip_insignificant: bool,
        handler: &impl Handler<base::Error>,
    ) -> Option<Punctuation> {
        let reading = if skip_insignificant {
            self.next_significant_token()
        } else {
            self.next_token()
        };

        match reading {
            Reading::Atomic(Token::Punctuation(punctuation))
                if punctuation.punctuation == expected =>
            {
                Some(punctuation)
            }
            found => {
                handler.receive(super::error::Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::Punctuation(expected),
                    found: found.into_token(),
                }));
                None
            }
        }
    }

    /// Parses a [`StringLiteral`].
    pub fn parse_string_literal(
        &mut self,
        handler: &impl Handler<base::Error>,
    ) -> Option<StringLiteral> {
        match self.next_significant_token() {
            Reading::Atomic(Token::StringLiteral(literal)) => Some(literal),
            found => {
                handler.receive(super::error::Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::StringLiteral,
                    found: found.into_token(),
                }));
                None
            }
        }
    }
}

/// The content of a [`Delimited`] token tree together with its delimiters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DelimitedTree<T> {
    /// The opening delimiter.
    pub open: Punctuation,

    /// The parsed content, or [`None`] if parsing the content failed.
    pub tree: Option<T>,

    /// The closing delimiter.
    pub close: Punctuation,
}

/// Provides the token trees a [`Frame`] reads from.
#[derive(Debug, Clone, Copy)]
pub enum TokenProvider<'a> {
    /// The top-level token stream.
    TokenStream(&'a TokenStream),
    /// The token stream within a pair of delimiters.
    Delimited(&'a Delimited),
}

impl<'a> TokenProvider<'a> {
    /// Gets the token stream of the provider.
    #[must_use]
    pub fn token_stream(self) -> &'a TokenStream {
        match self {
            TokenProvider::TokenStream(token_stream) => token_stream,
            TokenProvider::Delimited(delimited) => &delimited.token_stream,
        }
    }
}

/// Represents a single frame of the parser's stack, responsible for reading a token stream.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    token_provider: TokenProvider<'a>,
    current_index: usize,
}

impl<'a> Frame<'a> {
    /// Converts the token tree at the given position into a [`Reading`].
    fn get_reading(&self, token: Option<&TokenTree>) -> Reading {
        token.map_or_else(
            || match self.token_provider {
                TokenProvider::TokenStream(_) => Reading::Eof,
                TokenProvider::Delimited(delimited) => {
                    Reading::DelimitedEnd(delimited.close.clone())
                }
            },
            |token| match token {
                TokenTree::Token(token) => Reading::Atomic(token.clone()),
                TokenTree::Delimited(delimited) => Reading::IntoDelimited(delimited.open.clone()),
            },
        )
    }

    /// Returns the token tree the frame is currently pointing at.
    fn current(&self) -> Option<&'a TokenTree> {
        self.token_provider.token_stream().get(self.current_index)
    }

    /// Returns a [`Reading`] of the current token without moving forward.
    #[must_use]
    pub fn peek(&self) -> Reading {
        self.get_reading(self.current())
    }

    /// Returns whether the frame has read every token.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.current_index >= self.token_provider.token_stream().len()
    }

    /// Returns whether only insignificant tokens are left in the frame.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.token_provider
            .token_stream()
            .iter()
            .skip(self.current_index)
            .all(|tree| matches!(tree, TokenTree::Token(token) if !token.is_significant()))
    }

    /// Moves to the next token tree.
    pub fn forward(&mut self) {
        if !self.is_end() {
            self.current_index += 1;
        }
    }

    /// Returns a [`Reading`] of the current token and moves forward.
    pub fn next_token(&mut self) -> Reading {
        let reading = self.peek();
        self.forward();
        reading
    }

    /// Skips whitespaces and comments and returns the [`Reading`] of the next significant token
    /// without consuming it.
    pub fn stop_at_significant(&mut self) -> Reading {
        while let Some(TokenTree::Token(token)) = self.current() {
            if token.is_significant() {
                break;
            }
            self.forward();
        }

        self.peek()
    }

    /// Skips whitespaces and comments, then returns the next significant [`Reading`] and
    /// consumes it.
    pub fn next_significant_token(&mut self) -> Reading {
        let reading = self.stop_at_significant();
        self.forward();
        reading
    }

    /// Moves forward until the predicate holds for the current [`Reading`] or the frame ends.
    pub fn stop_at(&mut self, predicate: impl Fn(&Reading) -> bool) -> Reading {
        while !self.is_end() {
            let reading = self.peek();
            if predicate(&reading) {
                return reading;
            }
            self.forward();
        }

        self.peek()
    }
}

/// Represents the read value of the [`Frame`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
pub enum Reading {
    /// A singular token.
    Atomic(Token),

    /// Found an opening delimiter token, which means that the parser can step into a new
    /// delimited frame.
    IntoDelimited(Punctuation),

    /// Found a closing delimiter token, which means that the parser should step out of the current
    /// delimited frame.
    DelimitedEnd(Punctuation),

    /// End of file.
    Eof,
}

impl Reading {
    /// Gets the read token inside the [`Reading`] as `Option<Token>`
    ///
    /// # Returns
    ///
    /// Returns `None` if the reading is a [`Reading::Eof`].
    #[must_use]
    pub fn into_token(self) -> Option<Token> {
        match self {
            Self::Atomic(token) => Some(token),
            Self::IntoDelimited(punc) | Self::DelimitedEnd(punc) => Some(Token::Punctuation(punc)),
            Self::Eof => None,
        }
    }
}
