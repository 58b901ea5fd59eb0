//! The base module contains the core functionality shared by every phase of the transpiler.

pub mod source_file;

mod error;
#[doc(inline)]
pub use error::{Error, Result};

mod diagnostic;
pub use diagnostic::{Handler, PrintHandler, SilentHandler, VoidHandler};
pub(crate) use diagnostic::TrackingHandler;

mod file_provider;
pub use file_provider::{FileProvider, FsProvider};

pub mod log;
