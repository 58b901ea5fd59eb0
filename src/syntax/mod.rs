//! This module contains the syntax tree and parser for Gradle build scripts.

pub mod error;
pub mod parser;
#[allow(clippy::module_name_repetitions)]
pub mod syntax_tree;
