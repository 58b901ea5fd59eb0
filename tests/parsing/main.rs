use std::{collections::HashMap, path::PathBuf};

use gradle2bazel::{
    base::{source_file::SourceElement, Error, SilentHandler, VoidHandler},
    syntax::syntax_tree::{
        declaration::{Declaration, RepositoryEntry},
        expression::Expression,
    },
};

fn provider(name: &str, source: &str) -> HashMap<PathBuf, String> {
    let mut files = HashMap::new();
    files.insert(PathBuf::from(name), source.to_string());
    files
}

#[test]
fn parsing_complete_script() {
    let files = provider("build.gradle", include_str!("./fixtures/complete.gradle"));

    let parsed = gradle2bazel::parse(&VoidHandler, &files, &PathBuf::from("build.gradle"))
        .expect("Failed to parse");

    let declarations = parsed.declarations();
    assert_eq!(declarations.len(), 4);

    let Declaration::Plugins(plugins) = &declarations[0] else {
        panic!("Expected plugins block");
    };
    let plugin_ids = plugins
        .entries()
        .iter()
        .map(|entry| entry.plugin_id().str_content())
        .collect::<Vec<_>>();
    assert_eq!(
        plugin_ids,
        vec!["java", "application", "org.jetbrains.kotlin.jvm"]
    );

    let Declaration::Repositories(repositories) = &declarations[1] else {
        panic!("Expected repositories block");
    };
    let entries = repositories.entries();
    assert!(matches!(entries[0], RepositoryEntry::Central(_)));
    assert!(matches!(entries[1], RepositoryEntry::SecondaryIndex(_)));
    let RepositoryEntry::Custom(custom) = &entries[2] else {
        panic!("Expected custom repository");
    };
    assert_eq!(
        custom.url_literal().map(|url| url.str_content()),
        Some("https://repo.example.com/releases")
    );

    let Declaration::Dependencies(dependencies) = &declarations[2] else {
        panic!("Expected dependencies block");
    };
    let coordinates = dependencies
        .entries()
        .iter()
        .map(|entry| {
            (
                entry.configuration().span.str(),
                entry.coordinate().str_content(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        coordinates,
        vec![
            (
                "implementation",
                "org.springframework:spring-core:5.2.8.RELEASE"
            ),
            ("testImplementation", "junit:junit:4.13.2"),
        ]
    );

    let Declaration::TaskRegistration(task) = &declarations[3] else {
        panic!("Expected task registration");
    };
    assert_eq!(task.task_name().str_content(), "myCustomTask");
    let main_class = task
        .statements()
        .iter()
        .find(|statement| statement.is_key("mainClass"))
        .expect("Expected mainClass statement");
    assert!(matches!(
        main_class.value(),
        Expression::StringLiteral(literal) if literal.str_content() == "com.example.Main"
    ));
    assert_eq!(
        main_class.span().str(),
        "mainClass = 'com.example.Main'"
    );
}

#[test]
fn parsing_invalid() {
    let files = provider("invalid.gradle", include_str!("./fixtures/invalid.gradle"));
    let handler = SilentHandler::new();

    let result = gradle2bazel::parse(&handler, &files, &PathBuf::from("invalid.gradle"));

    assert!(result.expect_err("Expecting parsing failure").is_syntax_error());
    let received = handler.received();
    assert_eq!(received.len(), 2);
    assert!(received
        .iter()
        .all(|err| matches!(err, Error::ParseError(_))));
}

#[test]
fn parsing_unterminated_string() {
    let files = provider(
        "unterminated.gradle",
        include_str!("./fixtures/unterminated.gradle"),
    );
    let handler = SilentHandler::new();

    gradle2bazel::parse(&handler, &files, &PathBuf::from("unterminated.gradle"))
        .expect_err("Expecting tokenizing failure");

    assert!(handler
        .received()
        .iter()
        .any(|err| matches!(err, Error::LexicalError(_))));
}

#[test]
fn parsing_missing_file() {
    let files = HashMap::<PathBuf, String>::new();

    let result = gradle2bazel::parse(&VoidHandler, &files, &PathBuf::from("build.gradle"));

    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn parsing_from_str() {
    let parsed = gradle2bazel::parse_str(
        &VoidHandler,
        "inline.gradle",
        "dependencies { implementation 'org.x:core:1.0' }",
    )
    .expect("Failed to parse");

    assert_eq!(parsed.declarations().len(), 1);
}
