//! The transpile module turns a translation model into Bazel `WORKSPACE` and `BUILD` files.

mod options;
#[doc(inline)]
pub use options::TranspileOptions;

mod renderer;
#[doc(inline)]
pub use renderer::{render, render_build_file, render_workspace, RenderedDocuments};

mod writer;
#[doc(inline)]
pub use writer::write_documents;

mod util;
#[doc(inline)]
pub use util::dependency_label;
