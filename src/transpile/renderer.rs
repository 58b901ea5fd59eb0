//! Renders the translation model into Bazel documents.

use getset::Getters;

use crate::model::TranslationModel;

use super::{
    util::{dependency_label, push_string_list},
    TranspileOptions,
};

/// The text of the two generated Bazel files.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
#[get = "pub"]
pub struct RenderedDocuments {
    /// External dependency setup, written to the workspace file.
    workspace: String,
    /// Build targets, written to the build file.
    build_file: String,
}

/// Renders both documents for the model.
///
/// Rendering is pure; the same model and options always yield byte-identical text.
#[must_use]
#[tracing::instrument(level = "debug", skip_all)]
pub fn render(model: &TranslationModel, options: &TranspileOptions) -> RenderedDocuments {
    RenderedDocuments {
        workspace: render_workspace(model, options),
        build_file: render_build_file(model, options),
    }
}

/// Renders the workspace document fetching `rules_jvm_external` and installing every dependency.
#[must_use]
pub fn render_workspace(model: &TranslationModel, options: &TranspileOptions) -> String {
    let version = options.rules_jvm_external_version();

    let mut out = format!(
        r#"load("@bazel_tools//tools/build_defs/repo:http.bzl", "http_archive")

rules_jvm_external_version = "{version}"
http_archive(
    name = "rules_jvm_external",
    urls = ["https://github.com/bazelbuild/rules_jvm_external/archive/%s.zip" % rules_jvm_external_version],
    strip_prefix = "rules_jvm_external-%s" % rules_jvm_external_version,
)

load("@rules_jvm_external//:defs.bzl", "maven_install")

maven_install(
"#
    );

    push_string_list(
        &mut out,
        1,
        "artifacts = ",
        model.dependencies().iter().map(String::as_str),
        ",",
    );
    push_string_list(
        &mut out,
        1,
        "repositories = ",
        model.repositories().iter().map(String::as_str),
        ",",
    );
    out.push_str(")\n");

    out
}

/// Renders the build document with the dependency labels and one `java_binary` per runnable
/// task.
#[must_use]
pub fn render_build_file(model: &TranslationModel, options: &TranspileOptions) -> String {
    let mut sections = Vec::new();

    if !model.dependencies().is_empty() {
        let labels = model
            .dependencies()
            .iter()
            .map(|coordinate| dependency_label(coordinate))
            .collect::<Vec<_>>();

        let mut section = String::new();
        push_string_list(
            &mut section,
            0,
            "maven_deps = ",
            labels.iter().map(String::as_str),
            "",
        );
        sections.push(section);
    }

    for (name, main_class) in model.runnable_tasks() {
        sections.push(format!(
            "java_binary(\n    name = \"{name}\",\n    main_class = \"{main_class}\",\n    runtime_deps = [\"{}\"],\n)\n",
            options.runtime_deps_placeholder()
        ));
    }

    tracing::trace!("Rendered {} build file sections", sections.len());

    sections.join("\n")
}
