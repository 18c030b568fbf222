//! The narrow surface the launcher consumes from the declarative UI runtime.
//!
//! Two host shapes exist: a plain engine that loads a document and exposes its
//! root objects, and a platform view that owns an engine, shows a single root
//! item and is shown explicitly. Both share one application object whose run
//! loop decides the process exit code.

use std::path::Path;

use crate::bootstrap::DocumentLocation;
use crate::error::ToolkitError;

/// Root property asking the document to make itself visible.
pub const VISIBLE_PROPERTY: &str = "visible";

/// Root property telling the document that a native launcher started it.
pub const NATIVE_LAUNCHER_PROPERTY: &str = "nativeLauncher";

/// Factory for the UI runtime objects.
///
/// `create_application` must be called first; it consumes the process
/// argument vector the same way the runtime's application constructor does.
pub trait UiToolkit {
    /// # Errors
    /// Returns an error if the runtime cannot create its application object.
    fn create_application(&mut self, args: &[String])
    -> Result<Box<dyn UiApplication>, ToolkitError>;

    /// Standard QML engine used by the generic startup variant.
    ///
    /// # Errors
    /// Returns an error if the engine cannot be created.
    fn create_engine(&mut self) -> Result<Box<dyn UiEngine>, ToolkitError>;

    /// Platform view used by the integrated startup variant.
    ///
    /// # Errors
    /// Returns an error if the view cannot be created.
    fn create_view(&mut self) -> Result<Box<dyn UiView>, ToolkitError>;
}

/// The runtime's application object.
pub trait UiApplication {
    /// Enter the blocking event loop and return its exit code.
    ///
    /// # Errors
    /// Returns an error if the run loop could not be started at all.
    fn exec(self: Box<Self>) -> Result<i32, ToolkitError>;
}

pub trait UiEngine {
    fn add_import_path(&mut self, path: &Path);

    /// # Errors
    /// Returns an error if the runtime rejects the document location.
    fn load(&mut self, document: &DocumentLocation) -> Result<(), ToolkitError>;

    /// First root object produced by the last load, if any.
    fn root_object(&mut self) -> Option<&mut dyn RootObject>;
}

pub trait UiView {
    /// Adds an import path to the engine owned by the view.
    fn add_import_path(&mut self, path: &Path);

    /// # Errors
    /// Returns an error if the runtime rejects the document location.
    fn set_source(&mut self, document: &DocumentLocation) -> Result<(), ToolkitError>;

    fn root_object(&mut self) -> Option<&mut dyn RootObject>;

    fn show(&mut self);
}

pub trait RootObject {
    fn set_property(&mut self, name: &str, value: bool);
}
