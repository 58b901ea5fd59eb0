use getset::Getters;

/// Settings for rendering and writing the Bazel files.
///
/// The defaults produce the canonical documents.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
#[get = "pub"]
pub struct TranspileOptions {
    /// Release of `rules_jvm_external` fetched by the workspace.
    rules_jvm_external_version: String,
    /// Label every generated `java_binary` lists as its runtime dependency.
    runtime_deps_placeholder: String,
    /// File name of the workspace document.
    workspace_file_name: String,
    /// File name of the build document.
    build_file_name: String,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            rules_jvm_external_version: "4.0".to_string(),
            runtime_deps_placeholder: ":my_library".to_string(),
            workspace_file_name: "WORKSPACE".to_string(),
            build_file_name: "BUILD.bazel".to_string(),
        }
    }
}

impl TranspileOptions {
    /// Sets the `rules_jvm_external` release.
    #[must_use]
    pub fn with_rules_jvm_external_version(mut self, version: impl Into<String>) -> Self {
        self.rules_jvm_external_version = version.into();
        self
    }

    /// Sets the runtime dependency label of generated binaries.
    #[must_use]
    pub fn with_runtime_deps_placeholder(mut self, label: impl Into<String>) -> Self {
        self.runtime_deps_placeholder = label.into();
        self
    }

    /// Sets the file name of the workspace document.
    #[must_use]
    pub fn with_workspace_file_name(mut self, name: impl Into<String>) -> Self {
        self.workspace_file_name = name.into();
        self
    }

    /// Sets the file name of the build document.
    #[must_use]
    pub fn with_build_file_name(mut self, name: impl Into<String>) -> Self {
        self.build_file_name = name.into();
        self
    }
}
