//! Translates Gradle build scripts into Bazel build files.
//!
//! A build script is tokenized, parsed into a syntax tree and reduced to a
//! [`TranslationModel`] holding the repositories, dependencies, plugins and tasks it declares.
//! The model is then rendered into a `WORKSPACE` document that installs the dependencies with
//! `rules_jvm_external` and a `BUILD.bazel` document with one `java_binary` per runnable task.

#![deny(
    unsafe_code,
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod base;
pub mod lexical;
pub mod model;
pub mod semantic;
pub mod syntax;
pub mod transpile;

use std::path::Path;

use base::{source_file::SourceFile, FileProvider, Handler, Result, TrackingHandler};
use syntax::syntax_tree::program::BuildScript;

pub use model::TranslationModel;
pub use transpile::{RenderedDocuments, TranspileOptions};

use crate::{base::Error, lexical::token_stream::TokenStream, syntax::parser::Parser};

/// Converts the build script at the given path to tokens.
///
/// # Errors
/// - If an error occurs while reading the file.
pub fn tokenize(
    handler: &impl Handler<base::Error>,
    file_provider: &impl FileProvider,
    path: &Path,
) -> Result<TokenStream> {
    tracing::info!("Tokenizing the build script at {}", path.display());

    let source_file = SourceFile::load(path, file_provider)?;

    Ok(TokenStream::tokenize(&source_file, handler))
}

/// Parses the build script at the given path.
///
/// # Errors
/// - If an error occurs while reading the file.
/// - If an error occurs while tokenizing or parsing the build script.
pub fn parse(
    handler: &impl Handler<base::Error>,
    file_provider: &impl FileProvider,
    path: &Path,
) -> Result<BuildScript> {
    tracing::info!("Parsing the build script at {}", path.display());

    let source_file = SourceFile::load(path, file_provider)?;

    parse_source_file(handler, &source_file)
}

/// Parses a build script held in memory.
///
/// The identifier is shown as the file name in diagnostics.
///
/// # Errors
/// - If an error occurs while tokenizing or parsing the build script.
pub fn parse_str(
    handler: &impl Handler<base::Error>,
    identifier: &str,
    script: &str,
) -> Result<BuildScript> {
    let source_file = SourceFile::from_source(identifier, script);

    parse_source_file(handler, &source_file)
}

fn parse_source_file(
    handler: &impl Handler<base::Error>,
    source_file: &std::sync::Arc<SourceFile>,
) -> Result<BuildScript> {
    let tracker = TrackingHandler::new(handler);

    let tokens = TokenStream::tokenize(source_file, &tracker);

    if tracker.has_received() {
        return Err(Error::Other(
            "An error occurred while tokenizing the build script.",
        ));
    }

    let mut parser = Parser::new(&tokens);
    let script = parser.parse_build_script(&tracker).ok_or(Error::Other(
        "An error occurred while parsing the build script.",
    ))?;

    if tracker.has_received() {
        return Err(Error::Other(
            "An error occurred while parsing the build script.",
        ));
    }

    Ok(script)
}

/// Builds the translation model of a parsed build script.
///
/// # Errors
/// - If a custom repository does not declare a URL. Every such error is reported to the handler
///   and the first one is returned.
pub fn build_model(
    handler: &impl Handler<base::Error>,
    script: &BuildScript,
) -> Result<TranslationModel> {
    Ok(script.build_model(handler)?)
}

/// Parses the build script at the given path and builds its translation model.
///
/// # Errors
/// - If an error occurs while reading the file.
/// - If an error occurs while parsing the build script.
/// - If an error occurs while building the model.
pub fn build_model_from_file(
    handler: &impl Handler<base::Error>,
    file_provider: &impl FileProvider,
    path: &Path,
) -> Result<TranslationModel> {
    let script = parse(handler, file_provider, path)?;

    build_model(handler, &script)
}

/// Renders the `WORKSPACE` and `BUILD.bazel` documents of the model.
#[must_use]
pub fn render(model: &TranslationModel, options: &TranspileOptions) -> RenderedDocuments {
    transpile::render(model, options)
}

/// Renders the model and writes both documents into the output directory.
///
/// # Errors
/// - If an error occurs while writing a document.
pub fn write_output(
    model: &TranslationModel,
    out_dir: &Path,
    options: &TranspileOptions,
) -> Result<()> {
    let documents = transpile::render(model, options);

    transpile::write_documents(&documents, out_dir, options)
}

/// Transpiles the build script at the given path into Bazel files in the output directory.
///
/// Nothing is written unless the script parses and its model builds.
///
/// # Errors
/// - If an error occurs while reading the file.
/// - If an error occurs while parsing the build script.
/// - If an error occurs while building the model.
/// - If an error occurs while writing a document.
pub fn transpile(
    handler: &impl Handler<base::Error>,
    file_provider: &impl FileProvider,
    script_path: &Path,
    out_dir: &Path,
    options: &TranspileOptions,
) -> Result<()> {
    let model = build_model_from_file(handler, file_provider, script_path)?;

    tracing::info!(
        "Writing {} dependencies and {} tasks to {}",
        model.dependencies().len(),
        model.task_specs().len(),
        out_dir.display()
    );

    write_output(&model, out_dir, options)
}
