//! UI toolkit backends.

pub mod process;

pub use process::{BOOTSTRAP_DOCUMENT_NAME, ProcessToolkit, bootstrap_document};
