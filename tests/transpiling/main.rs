use std::{collections::HashMap, fs, path::PathBuf};

use gradle2bazel::{
    base::{Error, SilentHandler, VoidHandler},
    model::{CENTRAL_REPOSITORY_URL, SECONDARY_INDEX_URL},
    TranspileOptions,
};

fn provider(name: &str, source: &str) -> HashMap<PathBuf, String> {
    let mut files = HashMap::new();
    files.insert(PathBuf::from(name), source.to_string());
    files
}

#[test]
fn transpile_central_repository() {
    let files = provider("build.gradle", include_str!("./fixtures/central.gradle"));
    let out_dir = tempfile::tempdir().unwrap();

    gradle2bazel::transpile(
        &VoidHandler,
        &files,
        &PathBuf::from("build.gradle"),
        out_dir.path(),
        &TranspileOptions::default(),
    )
    .expect("Failed to transpile");

    let workspace = fs::read_to_string(out_dir.path().join("WORKSPACE")).unwrap();
    let build_file = fs::read_to_string(out_dir.path().join("BUILD.bazel")).unwrap();

    assert_eq!(workspace, include_str!("./fixtures/central.WORKSPACE"));
    assert_eq!(build_file, include_str!("./fixtures/central.BUILD.bazel"));
    assert_eq!(build_file.matches("java_binary(").count(), 1);
}

#[test]
fn transpile_missing_repository_url() {
    let files = provider("build.gradle", include_str!("./fixtures/missing_url.gradle"));
    let out_dir = tempfile::tempdir().unwrap();
    let handler = SilentHandler::new();

    let result = gradle2bazel::transpile(
        &handler,
        &files,
        &PathBuf::from("build.gradle"),
        out_dir.path(),
        &TranspileOptions::default(),
    );

    assert!(result.expect_err("Expecting semantic failure").is_semantic_error());
    assert_eq!(handler.received().len(), 1);
    assert_eq!(fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[test]
fn transpile_duplicate_plugins() {
    let with_plugins = provider(
        "build.gradle",
        include_str!("./fixtures/duplicate_plugins.gradle"),
    );
    let model = gradle2bazel::build_model_from_file(
        &VoidHandler,
        &with_plugins,
        &PathBuf::from("build.gradle"),
    )
    .expect("Failed to build model");

    assert_eq!(model.declared_plugins().len(), 1);

    let without_plugins = gradle2bazel::parse_str(
        &VoidHandler,
        "build.gradle",
        "repositories {\n    mavenCentral()\n}\ndependencies {\n    implementation 'org.x:core:1.0'\n}\ntasks.register('run', JavaExec) {\n    mainClass = 'com.example.Main'\n}",
    )
    .and_then(|script| gradle2bazel::build_model(&VoidHandler, &script))
    .expect("Failed to build model");

    let options = TranspileOptions::default();
    assert_eq!(
        gradle2bazel::render(&model, &options),
        gradle2bazel::render(&without_plugins, &options)
    );
}

#[test]
fn transpile_order_and_deduplication() {
    let files = provider("build.gradle", include_str!("./fixtures/mixed.gradle"));
    let model =
        gradle2bazel::build_model_from_file(&VoidHandler, &files, &PathBuf::from("build.gradle"))
            .expect("Failed to build model");

    assert_eq!(
        model.repositories().as_slice(),
        &[
            "https://repo.example.com".to_string(),
            CENTRAL_REPOSITORY_URL.to_string(),
            SECONDARY_INDEX_URL.to_string(),
        ]
    );
    assert_eq!(
        model.dependencies(),
        &["org.b:second:2.0", "org.a:first:1.0", "org.b:second:2.0"]
    );
    assert_eq!(model.task_specs().len(), 3);

    let documents = gradle2bazel::render(&model, &TranspileOptions::default());

    let workspace = documents.workspace();
    let second = workspace.find("\"org.b:second:2.0\"").unwrap();
    let first = workspace.find("\"org.a:first:1.0\"").unwrap();
    assert!(second < first);
    assert_eq!(workspace.matches("\"org.b:second:2.0\"").count(), 2);

    let build_file = documents.build_file();
    assert!(!build_file.contains("\"docs\""));
    let server = build_file.find("name = \"server\"").unwrap();
    let client = build_file.find("name = \"client\"").unwrap();
    assert!(server < client);
}

#[test]
fn transpile_deterministic() {
    let files = provider("build.gradle", include_str!("./fixtures/mixed.gradle"));
    let options = TranspileOptions::default();

    let first_dir = tempfile::tempdir().unwrap();
    let second_dir = tempfile::tempdir().unwrap();

    for dir in [&first_dir, &second_dir] {
        gradle2bazel::transpile(
            &VoidHandler,
            &files,
            &PathBuf::from("build.gradle"),
            dir.path(),
            &options,
        )
        .expect("Failed to transpile");
    }

    for name in ["WORKSPACE", "BUILD.bazel"] {
        assert_eq!(
            fs::read(first_dir.path().join(name)).unwrap(),
            fs::read(second_dir.path().join(name)).unwrap()
        );
    }
}

#[test]
fn transpile_syntax_error_writes_nothing() {
    let files = provider("build.gradle", "dependencies {\n    implementation\n}\n");
    let out_dir = tempfile::tempdir().unwrap();

    let result = gradle2bazel::transpile(
        &VoidHandler,
        &files,
        &PathBuf::from("build.gradle"),
        out_dir.path(),
        &TranspileOptions::default(),
    );

    assert!(matches!(result, Err(ref err) if err.is_syntax_error()));
    assert!(!out_dir.path().join("WORKSPACE").exists());
}

#[test]
fn transpile_missing_script() {
    let out_dir = tempfile::tempdir().unwrap();

    let result = gradle2bazel::transpile(
        &VoidHandler,
        &HashMap::<PathBuf, String>::new(),
        &PathBuf::from("build.gradle"),
        out_dir.path(),
        &TranspileOptions::default(),
    );

    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn transpile_main_class_forms() {
    let script = gradle2bazel::parse_str(
        &VoidHandler,
        "build.gradle",
        "tasks.register('reference', JavaExec) {\n    mainClass = com.example.Reference\n}\ntasks.register('run', JavaExec) {\n    dependsOn tasks.compileJava\n    mainClass = 'com.example.Main'\n}",
    )
    .expect("Failed to parse");
    let model = gradle2bazel::build_model(&VoidHandler, &script).expect("Failed to build model");

    let documents = gradle2bazel::render(&model, &TranspileOptions::default());
    let build_file = documents.build_file();

    assert_eq!(build_file.matches("java_binary(").count(), 1);
    assert!(!build_file.contains("\"reference\""));
    assert!(!build_file.contains("com.example.Reference"));
    assert!(build_file.contains("main_class = \"com.example.Main\""));
}
