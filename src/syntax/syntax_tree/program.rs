//! The root node of the syntax tree.

use getset::Getters;

use crate::{
    base::{self, Handler},
    lexical::token::Token,
    syntax::parser::{Parser, Reading},
};

use super::declaration::Declaration;

/// A build script is a sequence of top-level declarations.
///
/// Syntax Synopsis:
///
/// ``` ebnf
/// BuildScript:
///     Declaration*
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct BuildScript {
    /// The declarations within the build script.
    #[get = "pub"]
    declarations: Vec<Declaration>,
}

impl<'a> Parser<'a> {
    /// Parses a [`BuildScript`].
    ///
    /// A declaration that fails to parse does not stop the parser; it skips to the next token
    /// that can start a declaration so that further errors are reported as well. The script is
    /// only returned if every declaration parsed.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_build_script(
        &mut self,
        handler: &impl Handler<base::Error>,
    ) -> Option<BuildScript> {
        let mut declarations = Vec::new();
        let mut failed = false;

        while !self.is_exhausted() {
            if let Some(declaration) = self.parse_declaration(handler) {
                declarations.push(declaration);
            } else {
                failed = true;

                // try to recover at the next declaration
                self.stop_at(|reading| {
                    matches!(
                        reading,
                        Reading::Atomic(Token::Keyword(keyword)) if keyword.keyword.starts_declaration()
                    )
                });
            }
        }

        tracing::debug!("Parsed {} declarations", declarations.len());

        (!failed).then_some(BuildScript { declarations })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        base::{source_file::SourceFile, SilentHandler},
        lexical::token_stream::TokenStream,
        syntax::syntax_tree::declaration::Declaration,
    };

    use super::*;

    #[test]
    fn test_empty_script() {
        let source_file = SourceFile::from_source("build.gradle", "// nothing here\n\n");
        let handler = SilentHandler::new();
        let tokens = TokenStream::tokenize(&source_file, &handler);
        let script = Parser::new(&tokens).parse_build_script(&handler);

        assert!(!handler.has_received());
        assert!(script.is_some_and(|script| script.declarations().is_empty()));
    }

    #[test]
    fn test_declarations_in_order() {
        let source_file = SourceFile::from_source(
            "build.gradle",
            "dependencies { implementation 'a:b:1' }\nplugins { id 'java' }\nrepositories { mavenCentral() }",
        );
        let handler = SilentHandler::new();
        let tokens = TokenStream::tokenize(&source_file, &handler);
        let script = Parser::new(&tokens)
            .parse_build_script(&handler)
            .expect("script should parse");

        assert!(matches!(
            script.declarations().as_slice(),
            [
                Declaration::Dependencies(_),
                Declaration::Plugins(_),
                Declaration::Repositories(_)
            ]
        ));
    }

    #[test]
    fn test_recovers_to_report_every_error() {
        let source_file = SourceFile::from_source(
            "build.gradle",
            "apply plugin: 'java'\nplugins { id 'java' }\nrepositories { nexus() }\n",
        );
        let handler = SilentHandler::new();
        let tokens = TokenStream::tokenize(&source_file, &handler);
        let script = Parser::new(&tokens).parse_build_script(&handler);

        assert!(script.is_none());
        assert_eq!(handler.received().len(), 2);
        assert!(handler.received().iter().all(base::Error::is_syntax_error));
    }
}
