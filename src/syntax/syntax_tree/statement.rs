//! Syntax tree nodes for the statements inside a task configuration block.

use getset::Getters;

use crate::{
    base::{
        self,
        source_file::{SourceElement, Span},
        Handler,
    },
    lexical::token::{Identifier, Punctuation, Token},
    syntax::{
        error::{Error, SyntaxKind, UnexpectedSyntax},
        parser::{Parser, Reading},
    },
};

use super::expression::Expression;

/// Syntax Synopsis:
///
/// ``` ebnf
/// TaskStatement:
///     (Identifier | Keyword) '='? Expression
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct TaskStatement {
    /// The property being configured.
    #[get = "pub"]
    key: Identifier,
    /// The optional `=` sign.
    #[get = "pub"]
    assignment: Option<Punctuation>,
    /// The assigned value.
    #[get = "pub"]
    value: Expression,
}

impl TaskStatement {
    /// Returns whether the statement configures the property `name`.
    #[must_use]
    pub fn is_key(&self, name: &str) -> bool {
        self.key.span.str() == name
    }

}

impl SourceElement for TaskStatement {
    fn span(&self) -> Span {
        self.key
            .span()
            .join(&self.value.span())
            .expect("The span of the task statement is invalid.")
    }
}

impl<'a> Parser<'a> {
    /// Parses a [`TaskStatement`].
    pub fn parse_task_statement(
        &mut self,
        handler: &impl Handler<base::Error>,
    ) -> Option<TaskStatement> {
        match self.stop_at_significant() {
            Reading::Atomic(Token::Identifier(_) | Token::Keyword(_)) => {
                let key = self.parse_name(handler)?;

                let assignment = match self.stop_at_significant() {
                    Reading::Atomic(Token::Punctuation(equals)) if equals.punctuation == '=' => {
                        self.forward();
                        Some(equals)
                    }
                    _ => None,
                };

                let value = self.parse_expression(handler)?;

                Some(TaskStatement {
                    key,
                    assignment,
                    value,
                })
            }

            unexpected => {
                // make progress
                self.forward();

                handler.receive(Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::TaskStatement,
                    found: unexpected.into_token(),
                }));

                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        base::{source_file::SourceFile, VoidHandler},
        lexical::token_stream::TokenStream,
    };

    use super::*;

    fn parse_statement(source: &str) -> Option<TaskStatement> {
        let source_file = SourceFile::from_source("build.gradle", source);
        let tokens = TokenStream::tokenize(&source_file, &VoidHandler);
        let mut parser = Parser::new(&tokens);
        parser.parse_task_statement(&VoidHandler)
    }

    #[test]
    fn test_string_statement() {
        let statement = parse_statement("mainClass = 'com.example.Main'").unwrap();

        assert!(statement.is_key("mainClass"));
        assert!(statement.assignment().is_some());
        assert_eq!(
            statement
                .value()
                .as_string_literal()
                .map(|literal| literal.str_content()),
            Some("com.example.Main")
        );
    }

    #[test]
    fn test_path_statement_without_assignment() {
        let statement = parse_statement("classpath sourceSets . main.runtimeClasspath").unwrap();

        assert!(statement.is_key("classpath"));
        assert!(statement.assignment().is_none());
        let path = statement.value().as_identifier_path().unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.to_dotted_string(), "sourceSets.main.runtimeClasspath");
    }

    #[test]
    fn test_keywords_as_property_names() {
        let statement = parse_statement("dependsOn tasks.compileJava").unwrap();
        assert_eq!(
            statement
                .value()
                .as_identifier_path()
                .map(|path| path.to_dotted_string()),
            Some("tasks.compileJava".to_string())
        );

        let statement = parse_statement("dependencies = project.dependencies").unwrap();
        assert!(statement.is_key("dependencies"));
        assert_eq!(
            statement
                .value()
                .as_identifier_path()
                .map(|path| path.to_dotted_string()),
            Some("project.dependencies".to_string())
        );
    }

    #[test]
    fn test_invalid_statement() {
        assert!(parse_statement("= 'value'").is_none());
        assert!(parse_statement("mainClass = ").is_none());
    }
}
