//! Contains the syntax tree nodes that represent the structure of a build script.

use getset::Getters;

use crate::{
    base::{
        self,
        source_file::{SourceElement, Span},
        Handler,
    },
    lexical::{token::Punctuation, token_stream::Delimiter},
    syntax::parser::Parser,
};

pub mod declaration;
pub mod expression;
pub mod program;
pub mod statement;

/// Represents a syntax tree node with a pattern of syntax tree nodes separated by a separator.
///
/// This struct is useful for representing syntax tree nodes that are separated by a separator.
/// For example, a dotted identifier path `sourceSets.main.runtimeClasspath` can be represented
/// by a [`ConnectedList`] with [`Identifier`](crate::lexical::token::Identifier) as the element
/// type and a `.` [`Punctuation`] as the separator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ConnectedList<Element, Separator> {
    /// The first element of the list.
    #[get = "pub"]
    first: Element,

    /// The rest of the elements of the list.
    ///
    /// Each element of the list is a tuple containing the separator and the element. The separator
    /// is the token/syntax tree node that separates the current element from the prior one.
    #[get = "pub"]
    rest: Vec<(Separator, Element)>,
}

impl<Element, Separator> ConnectedList<Element, Separator> {
    /// Creates a list holding a single element.
    pub fn new(first: Element) -> Self {
        Self {
            first,
            rest: Vec::new(),
        }
    }

    /// Appends an element preceded by its separator.
    pub fn push(&mut self, separator: Separator, element: Element) {
        self.rest.push((separator, element));
    }

    /// Returns an iterator over the elements of the list.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|(_, element)| element))
    }

    /// Returns the number of elements in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Returns `false` as a connected list always holds at least one element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<Element: SourceElement, Separator> SourceElement for ConnectedList<Element, Separator> {
    fn span(&self) -> Span {
        let first = self.first.span();
        self.rest
            .last()
            .and_then(|(_, last)| first.join(&last.span()))
            .unwrap_or(first)
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Block<T>:
///     '{' T* '}'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Block<T> {
    /// The opening brace of the block.
    #[get = "pub"]
    open_brace: Punctuation,
    /// The entries within the block.
    #[get = "pub"]
    entries: Vec<T>,
    /// The closing brace of the block.
    #[get = "pub"]
    close_brace: Punctuation,
}

impl<T> SourceElement for Block<T> {
    fn span(&self) -> Span {
        self.open_brace
            .span()
            .join(&self.close_brace.span())
            .unwrap_or_else(|| self.open_brace.span())
    }
}

impl<'a> Parser<'a> {
    /// Parses a brace-delimited [`Block`] whose entries are parsed by `parse_entry`.
    ///
    /// Parsing stops at the first entry that fails; the error has already been reported by then.
    pub fn parse_block<T>(
        &mut self,
        mut parse_entry: impl FnMut(&mut Self) -> Option<T>,
        handler: &impl Handler<base::Error>,
    ) -> Option<Block<T>> {
        let delimited_tree = self.step_into(
            Delimiter::Brace,
            |parser| {
                let mut entries = Vec::new();

                while !parser.is_exhausted() {
                    entries.push(parse_entry(parser)?);
                }

                Some(entries)
            },
            handler,
        )?;

        Some(Block {
            open_brace: delimited_tree.open,
            entries: delimited_tree.tree?,
            close_brace: delimited_tree.close,
        })
    }
}
