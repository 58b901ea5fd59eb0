//! Builds the [`TranslationModel`] from the syntax tree of a build script.
//!
//! Every node kind has its own extraction function producing a [`ModelIncrement`]; the model is
//! the fold of all increments in source order.

#![allow(clippy::missing_errors_doc)]

use crate::{
    base::{self, source_file::SourceElement as _, Handler},
    model::{
        ModelIncrement, PluginDeclaration, TaskSpec, TranslationModel, CENTRAL_REPOSITORY_URL,
        SECONDARY_INDEX_URL,
    },
    syntax::syntax_tree::{
        declaration::{Declaration, DependencyEntry, PluginEntry, RepositoryEntry, TaskRegistration},
        expression::Expression,
        program::BuildScript,
    },
};

pub mod error;

/// Name of the task property holding the entry point of a `java_binary`.
const MAIN_CLASS_KEY: &str = "mainClass";

impl BuildScript {
    /// Builds the translation model of the build script.
    ///
    /// Every error is reported to the handler; the first one is returned and no model is
    /// produced if there was any.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn build_model(
        &self,
        handler: &impl Handler<base::Error>,
    ) -> Result<TranslationModel, error::Error> {
        let mut increments = Vec::new();
        let mut errs = Vec::new();

        for declaration in self.declarations() {
            for increment in declaration.extract_increments() {
                match increment {
                    Ok(increment) => increments.push(increment),
                    Err(err) => {
                        handler.receive(err.clone());
                        errs.push(err);
                    }
                }
            }
        }

        if let Some(err) = errs.into_iter().next() {
            return Err(err);
        }

        let model = increments.into_iter().collect::<TranslationModel>();

        if !model.declared_plugins().is_empty() {
            tracing::debug!(
                "Collected {} plugins that have no Bazel counterpart",
                model.declared_plugins().len()
            );
        }

        Ok(model)
    }
}

impl Declaration {
    /// Returns the increments contributed by the declaration, in source order.
    pub fn extract_increments(&self) -> Vec<Result<ModelIncrement, error::Error>> {
        match self {
            Self::Plugins(plugins) => plugins
                .entries()
                .iter()
                .map(|entry| Ok(entry.extract_increment()))
                .collect(),
            Self::Repositories(repositories) => repositories
                .entries()
                .iter()
                .map(RepositoryEntry::extract_increment)
                .collect(),
            Self::Dependencies(dependencies) => dependencies
                .entries()
                .iter()
                .map(|entry| Ok(entry.extract_increment()))
                .collect(),
            Self::TaskRegistration(task) => vec![Ok(task.extract_increment())],
        }
    }
}

impl PluginEntry {
    /// Extracts the plugin declaration.
    #[must_use]
    pub fn extract_increment(&self) -> ModelIncrement {
        ModelIncrement::Plugin(PluginDeclaration::new(
            self.plugin_id().str_content(),
            self.version_literal()
                .map(|version| version.str_content().to_string()),
        ))
    }
}

impl RepositoryEntry {
    /// Extracts the repository URL.
    pub fn extract_increment(&self) -> Result<ModelIncrement, error::Error> {
        match self {
            Self::Central(_) => Ok(ModelIncrement::Repository(
                CENTRAL_REPOSITORY_URL.to_string(),
            )),
            Self::SecondaryIndex(_) => Ok(ModelIncrement::Repository(
                SECONDARY_INDEX_URL.to_string(),
            )),
            Self::Custom(custom) => custom
                .url_literal()
                .map(|url| ModelIncrement::Repository(url.str_content().to_string()))
                .ok_or_else(|| {
                    error::Error::from(error::MissingRepositoryUrl {
                        span: custom.span(),
                    })
                }),
        }
    }
}

impl DependencyEntry {
    /// Extracts the dependency coordinate, verbatim.
    #[must_use]
    pub fn extract_increment(&self) -> ModelIncrement {
        ModelIncrement::Dependency(self.coordinate().str_content().to_string())
    }
}

impl TaskRegistration {
    /// Extracts the task name and its main class.
    ///
    /// The main class is the quoted value of the first `mainClass` statement. A property
    /// reference such as `mainClass = application.mainClass` leaves the task without one. Every
    /// other statement is ignored.
    #[must_use]
    pub fn extract_increment(&self) -> ModelIncrement {
        let name = self.task_name().str_content();
        let main_class = self
            .statements()
            .iter()
            .find(|statement| statement.is_key(MAIN_CLASS_KEY))
            .and_then(|statement| match statement.value() {
                Expression::StringLiteral(literal) => Some(literal.str_content().to_string()),
                Expression::IdentifierPath(_) => None,
            });

        if main_class.is_none() {
            tracing::trace!("Task `{name}` has no main class and will not be translated");
        }

        ModelIncrement::Task(TaskSpec::new(name, main_class))
    }
}
