//! The translation model collected from a build script.
//!
//! The model is the only thing the renderer sees of a build script. It is assembled by folding
//! [`ModelIncrement`]s, each of which is the contribution of a single syntax tree node.

use std::{collections::HashSet, hash::Hash};

use getset::Getters;

/// URL of the central artifact repository, declared by `mavenCentral()`.
pub const CENTRAL_REPOSITORY_URL: &str = "https://repo1.maven.org/maven2";

/// URL of the secondary artifact index, declared by `jcenter()`.
pub const SECONDARY_INDEX_URL: &str = "https://jcenter.bintray.com/";

/// A set that remembers the order in which its elements were first inserted.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "Vec<T>",
        into = "Vec<T>",
        bound(
            serialize = "T: serde::Serialize + Clone",
            deserialize = "T: serde::Deserialize<'de> + Eq + Hash + Clone"
        )
    )
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedSet<T: Eq + Hash> {
    elements: Vec<T>,
    seen: HashSet<T>,
}

impl<T: Eq + Hash> Default for OrderedSet<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the value unless it is already present.
    ///
    /// Returns whether the value was newly inserted.
    pub fn insert(&mut self, value: T) -> bool {
        if self.seen.insert(value.clone()) {
            self.elements.push(value);
            true
        } else {
            false
        }
    }

    /// Returns whether the set contains the value.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.seen.contains(value)
    }
}

impl<T: Eq + Hash> OrderedSet<T> {
    /// Returns an iterator over the elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Returns the elements in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'a, T: Eq + Hash> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T: Eq + Hash + Clone> From<Vec<T>> for OrderedSet<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Eq + Hash> From<OrderedSet<T>> for Vec<T> {
    fn from(set: OrderedSet<T>) -> Self {
        set.elements
    }
}

/// A plugin applied by the build script.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct PluginDeclaration {
    /// The plugin identifier, e.g. `java`.
    #[get = "pub"]
    id: String,
    /// The requested plugin version.
    #[get = "pub"]
    version: Option<String>,
}

impl PluginDeclaration {
    /// Creates a new plugin declaration.
    #[must_use]
    pub fn new(id: impl Into<String>, version: Option<String>) -> Self {
        Self {
            id: id.into(),
            version,
        }
    }
}

/// A registered task, reduced to what the renderer needs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct TaskSpec {
    /// The name the task was registered under.
    #[get = "pub"]
    name: String,
    /// The fully qualified entry point, if the task configures one.
    #[get = "pub"]
    main_class: Option<String>,
}

impl TaskSpec {
    /// Creates a new task spec.
    #[must_use]
    pub fn new(name: impl Into<String>, main_class: Option<String>) -> Self {
        Self {
            name: name.into(),
            main_class,
        }
    }
}

/// The contribution of a single syntax tree node to the [`TranslationModel`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModelIncrement {
    /// A plugin declaration.
    Plugin(PluginDeclaration),
    /// A repository URL.
    Repository(String),
    /// A dependency coordinate, verbatim.
    Dependency(String),
    /// A registered task.
    Task(TaskSpec),
}

/// Everything the renderer needs to know about a build script.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct TranslationModel {
    /// Repository URLs without duplicates, in order of first declaration.
    #[get = "pub"]
    repositories: OrderedSet<String>,
    /// Dependency coordinates in encounter order, duplicates included.
    #[get = "pub"]
    dependencies: Vec<String>,
    /// Plugins declared by the script. They are not translated.
    #[get = "pub"]
    declared_plugins: OrderedSet<PluginDeclaration>,
    /// Registered tasks in encounter order.
    #[get = "pub"]
    task_specs: Vec<TaskSpec>,
}

impl TranslationModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the model with the increment added.
    #[must_use]
    pub fn apply(mut self, increment: ModelIncrement) -> Self {
        match increment {
            ModelIncrement::Plugin(plugin) => {
                self.declared_plugins.insert(plugin);
            }
            ModelIncrement::Repository(url) => {
                self.repositories.insert(url);
            }
            ModelIncrement::Dependency(coordinate) => self.dependencies.push(coordinate),
            ModelIncrement::Task(task) => self.task_specs.push(task),
        }
        self
    }

    /// Returns the tasks that configure a main class, paired with it.
    pub fn runnable_tasks(&self) -> impl Iterator<Item = (&str, &str)> {
        self.task_specs.iter().filter_map(|task| {
            task.main_class
                .as_deref()
                .map(|main_class| (task.name.as_str(), main_class))
        })
    }
}

impl FromIterator<ModelIncrement> for TranslationModel {
    fn from_iter<I: IntoIterator<Item = ModelIncrement>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::apply)
    }
}
