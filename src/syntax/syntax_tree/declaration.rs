//! Syntax tree nodes for the top-level blocks of a build script.

#![allow(missing_docs)]

use getset::Getters;

use crate::{
    base::{
        self,
        source_file::{SourceElement, Span},
        Handler,
    },
    lexical::{
        token::{Identifier, Keyword, KeywordKind, Punctuation, StringLiteral, Token},
        token_stream::Delimiter,
    },
    syntax::{
        error::{Error, SyntaxKind, UnexpectedSyntax, UnknownRepository},
        parser::{Parser, Reading},
    },
};

use super::{statement::TaskStatement, Block};

/// Syntax Synopsis:
///
/// ``` ebnf
/// Declaration:
///     PluginsBlock
///     | RepositoriesBlock
///     | DependenciesBlock
///     | TaskRegistration
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Declaration {
    Plugins(PluginsBlock),
    Repositories(RepositoriesBlock),
    Dependencies(DependenciesBlock),
    TaskRegistration(TaskRegistration),
}

impl SourceElement for Declaration {
    fn span(&self) -> Span {
        match self {
            Self::Plugins(plugins) => plugins.span(),
            Self::Repositories(repositories) => repositories.span(),
            Self::Dependencies(dependencies) => dependencies.span(),
            Self::TaskRegistration(task) => task.span(),
        }
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// PluginsBlock:
///     'plugins' '{' PluginEntry* '}'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct PluginsBlock {
    #[get = "pub"]
    plugins_keyword: Keyword,
    #[get = "pub"]
    block: Block<PluginEntry>,
}

impl PluginsBlock {
    /// Returns the plugin entries in source order.
    #[must_use]
    pub fn entries(&self) -> &[PluginEntry] {
        self.block.entries()
    }
}

impl SourceElement for PluginsBlock {
    fn span(&self) -> Span {
        self.plugins_keyword.span.join(&self.block.span()).expect("Invalid span")
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// PluginEntry:
///     'id' StringLiteral ('version' StringLiteral)?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct PluginEntry {
    #[get = "pub"]
    id_identifier: Identifier,
    #[get = "pub"]
    plugin_id: StringLiteral,
    #[get = "pub"]
    version: Option<(Identifier, StringLiteral)>,
}

impl PluginEntry {
    /// Returns the version literal if one is declared.
    #[must_use]
    pub fn version_literal(&self) -> Option<&StringLiteral> {
        self.version.as_ref().map(|(_, version)| version)
    }
}

impl SourceElement for PluginEntry {
    fn span(&self) -> Span {
        let end = self
            .version_literal()
            .map_or_else(|| self.plugin_id.span(), SourceElement::span);
        self.id_identifier.span.join(&end).expect("Invalid span")
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// RepositoriesBlock:
///     'repositories' '{' RepositoryEntry* '}'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct RepositoriesBlock {
    #[get = "pub"]
    repositories_keyword: Keyword,
    #[get = "pub"]
    block: Block<RepositoryEntry>,
}

impl RepositoriesBlock {
    /// Returns the repository entries in source order.
    #[must_use]
    pub fn entries(&self) -> &[RepositoryEntry] {
        self.block.entries()
    }
}

impl SourceElement for RepositoriesBlock {
    fn span(&self) -> Span {
        self.repositories_keyword
            .span
            .join(&self.block.span())
            .expect("Invalid span")
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// RepositoryEntry:
///     'mavenCentral' '(' ')'
///     | 'jcenter' '(' ')'
///     | 'maven' '{' UrlStatement? '}'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RepositoryEntry {
    /// The central repository, `mavenCentral()`.
    Central(WellKnownRepository),
    /// The secondary index, `jcenter()`.
    SecondaryIndex(WellKnownRepository),
    /// A repository at a custom URL, `maven { url '...' }`.
    Custom(CustomRepository),
}

impl SourceElement for RepositoryEntry {
    fn span(&self) -> Span {
        match self {
            Self::Central(repository) | Self::SecondaryIndex(repository) => repository.span(),
            Self::Custom(repository) => repository.span(),
        }
    }
}

/// A repository referenced by a well-known name followed by an empty argument list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct WellKnownRepository {
    #[get = "pub"]
    keyword: Keyword,
    #[get = "pub"]
    open_paren: Punctuation,
    #[get = "pub"]
    close_paren: Punctuation,
}

impl SourceElement for WellKnownRepository {
    fn span(&self) -> Span {
        self.keyword.span.join(&self.close_paren.span).expect("Invalid span")
    }
}

/// A `maven { ... }` repository entry.
///
/// The URL is optional at the syntax level; its absence is reported when the translation model
/// is built.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct CustomRepository {
    #[get = "pub"]
    maven_keyword: Keyword,
    #[get = "pub"]
    open_brace: Punctuation,
    #[get = "pub"]
    url: Option<UrlStatement>,
    #[get = "pub"]
    close_brace: Punctuation,
}

impl CustomRepository {
    /// Returns the URL literal if the entry declares one.
    #[must_use]
    pub fn url_literal(&self) -> Option<&StringLiteral> {
        self.url.as_ref().and_then(|url| url.value.as_ref())
    }
}

impl SourceElement for CustomRepository {
    fn span(&self) -> Span {
        self.maven_keyword.span.join(&self.close_brace.span).expect("Invalid span")
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// UrlStatement:
///     'url' '='? StringLiteral?
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct UrlStatement {
    #[get = "pub"]
    url_identifier: Identifier,
    #[get = "pub"]
    assignment: Option<Punctuation>,
    #[get = "pub"]
    value: Option<StringLiteral>,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// DependenciesBlock:
///     'dependencies' '{' DependencyEntry* '}'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct DependenciesBlock {
    #[get = "pub"]
    dependencies_keyword: Keyword,
    #[get = "pub"]
    block: Block<DependencyEntry>,
}

impl DependenciesBlock {
    /// Returns the dependency entries in source order.
    #[must_use]
    pub fn entries(&self) -> &[DependencyEntry] {
        self.block.entries()
    }
}

impl SourceElement for DependenciesBlock {
    fn span(&self) -> Span {
        self.dependencies_keyword
            .span
            .join(&self.block.span())
            .expect("Invalid span")
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// DependencyEntry:
///     Identifier (StringLiteral | '(' StringLiteral ')')
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct DependencyEntry {
    /// The configuration the dependency is added to, e.g. `implementation`.
    #[get = "pub"]
    configuration: Identifier,
    #[get = "pub"]
    parentheses: Option<(Punctuation, Punctuation)>,
    #[get = "pub"]
    coordinate: StringLiteral,
}

impl SourceElement for DependencyEntry {
    fn span(&self) -> Span {
        let end = self
            .parentheses
            .as_ref()
            .map_or_else(|| self.coordinate.span(), |(_, close)| close.span());
        self.configuration.span.join(&end).expect("Invalid span")
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// TaskRegistration:
///     'tasks' '.' 'register' '(' StringLiteral (',' Identifier)? ')' '{' TaskStatement* '}'
///     ;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct TaskRegistration {
    #[get = "pub"]
    tasks_keyword: Keyword,
    #[get = "pub"]
    dot: Punctuation,
    #[get = "pub"]
    register_identifier: Identifier,
    #[get = "pub"]
    open_paren: Punctuation,
    #[get = "pub"]
    task_name: StringLiteral,
    #[get = "pub"]
    task_type: Option<(Punctuation, Identifier)>,
    #[get = "pub"]
    close_paren: Punctuation,
    #[get = "pub"]
    block: Block<TaskStatement>,
}

impl TaskRegistration {
    /// Returns the identifier naming the type executing the task, e.g. `JavaExec`.
    #[must_use]
    pub fn task_type_identifier(&self) -> Option<&Identifier> {
        self.task_type.as_ref().map(|(_, identifier)| identifier)
    }

    /// Returns the statements configuring the task in source order.
    #[must_use]
    pub fn statements(&self) -> &[TaskStatement] {
        self.block.entries()
    }
}

impl SourceElement for TaskRegistration {
    fn span(&self) -> Span {
        self.tasks_keyword.span.join(&self.block.span()).expect("Invalid span")
    }
}

impl<'a> Parser<'a> {
    /// Parses a [`Declaration`].
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse_declaration(
        &mut self,
        handler: &impl Handler<base::Error>,
    ) -> Option<Declaration> {
        match self.stop_at_significant() {
            Reading::Atomic(Token::Keyword(keyword)) if keyword.keyword == KeywordKind::Plugins => {
                // eat the plugins keyword
                self.forward();

                let block = self.parse_block(|parser| parser.parse_plugin_entry(handler), handler)?;

                Some(Declaration::Plugins(PluginsBlock {
                    plugins_keyword: keyword,
                    block,
                }))
            }

            Reading::Atomic(Token::Keyword(keyword))
                if keyword.keyword == KeywordKind::Repositories =>
            {
                // eat the repositories keyword
                self.forward();

                let block =
                    self.parse_block(|parser| parser.parse_repository_entry(handler), handler)?;

                Some(Declaration::Repositories(RepositoriesBlock {
                    repositories_keyword: keyword,
                    block,
                }))
            }

            Reading::Atomic(Token::Keyword(keyword))
                if keyword.keyword == KeywordKind::Dependencies =>
            {
                // eat the dependencies keyword
                self.forward();

                let block =
                    self.parse_block(|parser| parser.parse_dependency_entry(handler), handler)?;

                Some(Declaration::Dependencies(DependenciesBlock {
                    dependencies_keyword: keyword,
                    block,
                }))
            }

            Reading::Atomic(Token::Keyword(Keyword {
                keyword: KeywordKind::Tasks,
                ..
            })) => self
                .parse_task_registration(handler)
                .map(Declaration::TaskRegistration),

            unexpected => {
                // make progress
                self.forward();

                handler.receive(Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::Declaration,
                    found: unexpected.into_token(),
                }));

                None
            }
        }
    }

    /// Parses a [`PluginEntry`].
    pub fn parse_plugin_entry(&mut self, handler: &impl Handler<base::Error>) -> Option<PluginEntry> {
        let id_identifier = match self.stop_at_significant() {
            Reading::Atomic(Token::Identifier(identifier)) if identifier.span.str() == "id" => {
                self.forward();
                identifier
            }
            unexpected => {
                handler.receive(Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::PluginEntry,
                    found: unexpected.into_token(),
                }));
                return None;
            }
        };

        let plugin_id = self.parse_string_literal(handler)?;

        let version = match self.stop_at_significant() {
            Reading::Atomic(Token::Identifier(identifier))
                if identifier.span.str() == "version" =>
            {
                // eat the version identifier
                self.forward();

                let version = self.parse_string_literal(handler)?;
                Some((identifier, version))
            }
            _ => None,
        };

        Some(PluginEntry {
            id_identifier,
            plugin_id,
            version,
        })
    }

    /// Parses a [`RepositoryEntry`].
    pub fn parse_repository_entry(
        &mut self,
        handler: &impl Handler<base::Error>,
    ) -> Option<RepositoryEntry> {
        match self.stop_at_significant() {
            Reading::Atomic(Token::Keyword(keyword))
                if matches!(
                    keyword.keyword,
                    KeywordKind::MavenCentral | KeywordKind::JCenter
                ) =>
            {
                // eat the repository keyword
                self.forward();

                let parentheses = self.step_into(Delimiter::Parenthesis, |_| Some(()), handler)?;
                parentheses.tree?;

                let repository = WellKnownRepository {
                    keyword,
                    open_paren: parentheses.open,
                    close_paren: parentheses.close,
                };

                Some(if repository.keyword.keyword == KeywordKind::MavenCentral {
                    RepositoryEntry::Central(repository)
                } else {
                    RepositoryEntry::SecondaryIndex(repository)
                })
            }

            Reading::Atomic(Token::Keyword(maven_keyword))
                if maven_keyword.keyword == KeywordKind::Maven =>
            {
                // eat the maven keyword
                self.forward();

                let delimited_tree = self.step_into(
                    Delimiter::Brace,
                    |parser| {
                        if parser.is_exhausted() {
                            Some(None)
                        } else {
                            parser.parse_url_statement(handler).map(Some)
                        }
                    },
                    handler,
                )?;

                Some(RepositoryEntry::Custom(CustomRepository {
                    maven_keyword,
                    open_brace: delimited_tree.open,
                    url: delimited_tree.tree?,
                    close_brace: delimited_tree.close,
                }))
            }

            Reading::Atomic(Token::Identifier(identifier)) => {
                // make progress
                self.forward();

                handler.receive(Error::from(UnknownRepository::from_name(identifier.span)));

                None
            }

            unexpected => {
                // make progress
                self.forward();

                handler.receive(Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::RepositoryEntry,
                    found: unexpected.into_token(),
                }));

                None
            }
        }
    }

    /// Parses an [`UrlStatement`].
    pub fn parse_url_statement(
        &mut self,
        handler: &impl Handler<base::Error>,
    ) -> Option<UrlStatement> {
        let url_identifier = self.parse_contextual_keyword("url", handler)?;

        let assignment = match self.stop_at_significant() {
            Reading::Atomic(Token::Punctuation(equals)) if equals.punctuation == '=' => {
                self.forward();
                Some(equals)
            }
            _ => None,
        };

        let value = match self.stop_at_significant() {
            Reading::Atomic(Token::StringLiteral(literal)) => {
                self.forward();
                Some(literal)
            }
            _ => None,
        };

        Some(UrlStatement {
            url_identifier,
            assignment,
            value,
        })
    }

    /// Parses a [`DependencyEntry`].
    pub fn parse_dependency_entry(
        &mut self,
        handler: &impl Handler<base::Error>,
    ) -> Option<DependencyEntry> {
        let configuration = match self.stop_at_significant() {
            Reading::Atomic(Token::Identifier(identifier)) => {
                self.forward();
                identifier
            }
            unexpected => {
                // make progress
                self.forward();

                handler.receive(Error::from(UnexpectedSyntax {
                    expected: SyntaxKind::DependencyEntry,
                    found: unexpected.into_token(),
                }));
                return None;
            }
        };

        match self.stop_at_significant() {
            Reading::IntoDelimited(open) if open.punctuation == '(' => {
                let delimited_tree = self.step_into(
                    Delimiter::Parenthesis,
                    |parser| parser.parse_string_literal(handler),
                    handler,
                )?;

                Some(DependencyEntry {
                    configuration,
                    parentheses: Some((delimited_tree.open, delimited_tree.close)),
                    coordinate: delimited_tree.tree?,
                })
            }
            _ => {
                let coordinate = self.parse_string_literal(handler)?;

                Some(DependencyEntry {
                    configuration,
                    parentheses: None,
                    coordinate,
                })
            }
        }
    }

    /// Parses a [`TaskRegistration`].
    pub fn parse_task_registration(
        &mut self,
        handler: &impl Handler<base::Error>,
    ) -> Option<TaskRegistration> {
        let tasks_keyword = self.parse_keyword(KeywordKind::Tasks, handler)?;
        let dot = self.parse_punctuation('.', true, handler)?;
        let register_identifier = self.parse_contextual_keyword("register", handler)?;

        let arguments = self.step_into(
            Delimiter::Parenthesis,
            |parser| {
                let task_name = parser.parse_string_literal(handler)?;

                let task_type = match parser.stop_at_significant() {
                    Reading::Atomic(Token::Punctuation(comma)) if comma.punctuation == ',' => {
                        // eat the comma
                        parser.forward();

                        let identifier = parser.parse_identifier(handler)?;
                        Some((comma, identifier))
                    }
                    _ => None,
                };

                Some((task_name, task_type))
            },
            handler,
        )?;
        let (task_name, task_type) = arguments.tree?;

        let block = self.parse_block(|parser| parser.parse_task_statement(handler), handler)?;

        Some(TaskRegistration {
            tasks_keyword,
            dot,
            register_identifier,
            open_paren: arguments.open,
            task_name,
            task_type,
            close_paren: arguments.close,
            block,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        base::{source_file::SourceFile, SilentHandler},
        lexical::token_stream::TokenStream,
    };

    use super::*;

    fn parse_declaration(source: &str) -> (Option<Declaration>, SilentHandler) {
        let source_file = SourceFile::from_source("build.gradle", source);
        let handler = SilentHandler::new();
        let tokens = TokenStream::tokenize(&source_file, &handler);
        let mut parser = Parser::new(&tokens);
        (parser.parse_declaration(&handler), handler)
    }

    #[test]
    fn test_plugins_block() {
        let (declaration, handler) = parse_declaration(
            "plugins {\n    id 'java'\n    id 'org.jetbrains.kotlin.jvm' version '1.5.31'\n}",
        );
        assert!(!handler.has_received());

        let Some(Declaration::Plugins(plugins)) = declaration else {
            panic!("Expected plugins block");
        };
        let entries = plugins.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].plugin_id().str_content(), "java");
        assert!(entries[0].version().is_none());
        assert_eq!(
            entries[1].plugin_id().str_content(),
            "org.jetbrains.kotlin.jvm"
        );
        assert_eq!(
            entries[1].version_literal().map(StringLiteral::str_content),
            Some("1.5.31")
        );
    }

    #[test]
    fn test_repositories_block() {
        let (declaration, handler) = parse_declaration(
            "repositories {\n    mavenCentral()\n    jcenter()\n    maven { url 'https://repo.example.com' }\n    maven { url = \"https://other.example.com\" }\n    maven { }\n}",
        );
        assert!(!handler.has_received());

        let Some(Declaration::Repositories(repositories)) = declaration else {
            panic!("Expected repositories block");
        };
        let entries = repositories.entries();
        assert_eq!(entries.len(), 5);
        assert!(matches!(entries[0], RepositoryEntry::Central(_)));
        assert!(matches!(entries[1], RepositoryEntry::SecondaryIndex(_)));

        let RepositoryEntry::Custom(custom) = &entries[2] else {
            panic!("Expected custom repository");
        };
        assert_eq!(
            custom.url_literal().map(StringLiteral::str_content),
            Some("https://repo.example.com")
        );

        let RepositoryEntry::Custom(assigned) = &entries[3] else {
            panic!("Expected custom repository");
        };
        assert!(assigned.url().as_ref().unwrap().assignment().is_some());

        let RepositoryEntry::Custom(empty) = &entries[4] else {
            panic!("Expected custom repository");
        };
        assert!(empty.url_literal().is_none());
    }

    #[test]
    fn test_unknown_repository() {
        let (declaration, handler) = parse_declaration("repositories {\n    mavenCentrl()\n}");

        assert!(declaration.is_none());
        let received = handler.received();
        assert_eq!(received.len(), 1);
        let base::Error::ParseError(Error::UnknownRepository(unknown)) = &received[0] else {
            panic!("Expected unknown repository error");
        };
        assert_eq!(unknown.alternatives.first(), Some(&"mavenCentral"));
    }

    #[test]
    fn test_dependencies_block() {
        let (declaration, handler) = parse_declaration(
            "dependencies {\n    implementation 'org.springframework:spring-core:5.2.8.RELEASE'\n    testImplementation('junit:junit:4.13.2')\n}",
        );
        assert!(!handler.has_received());

        let Some(Declaration::Dependencies(dependencies)) = declaration else {
            panic!("Expected dependencies block");
        };
        let entries = dependencies.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].configuration().span.str(), "implementation");
        assert_eq!(
            entries[0].coordinate().str_content(),
            "org.springframework:spring-core:5.2.8.RELEASE"
        );
        assert!(entries[1].parentheses().is_some());
        assert_eq!(entries[1].coordinate().str_content(), "junit:junit:4.13.2");
    }

    #[test]
    fn test_task_registration() {
        let (declaration, handler) = parse_declaration(
            "tasks.register('myCustomTask', JavaExec) {\n    mainClass = 'com.example.Main'\n    classpath = sourceSets.main.runtimeClasspath\n}",
        );
        assert!(!handler.has_received());

        let Some(Declaration::TaskRegistration(task)) = declaration else {
            panic!("Expected task registration");
        };
        assert_eq!(task.task_name().str_content(), "myCustomTask");
        assert_eq!(
            task.task_type_identifier().map(|ident| ident.span.str()),
            Some("JavaExec")
        );

        let statements = task.statements();
        assert_eq!(statements.len(), 2);
        assert!(statements[0].is_key("mainClass"));
        assert!(statements[1].is_key("classpath"));
        assert_eq!(
            statements[1]
                .value()
                .as_identifier_path()
                .map(|path| path.to_dotted_string()),
            Some("sourceSets.main.runtimeClasspath".to_string())
        );
    }

    #[test]
    fn test_task_registration_without_type() {
        let (declaration, handler) = parse_declaration("tasks.register('hello') {}");
        assert!(!handler.has_received());

        let Some(Declaration::TaskRegistration(task)) = declaration else {
            panic!("Expected task registration");
        };
        assert!(task.task_type().is_none());
        assert!(task.statements().is_empty());
    }

    #[test]
    fn test_unexpected_declaration() {
        let (declaration, handler) = parse_declaration("apply plugin: 'java'");

        assert!(declaration.is_none());
        assert!(matches!(
            handler.received().as_slice(),
            [base::Error::ParseError(Error::UnexpectedSyntax(UnexpectedSyntax {
                expected: SyntaxKind::Declaration,
                ..
            }))]
        ));
    }
}
