//! Recording fakes of the process environment and the UI toolkit.

use std::collections::HashMap;
use std::path::Path;

use super::journal::{Event, Journal};
use crate::bootstrap::{DocumentLocation, ProcessEnvironment};
use crate::error::ToolkitError;
use crate::toolkit::{RootObject, UiApplication, UiEngine, UiToolkit, UiView};

/// In-memory environment that journals every write.
#[derive(Debug)]
pub struct RecordingEnvironment {
    journal: Journal,
    vars: HashMap<String, String>,
}

impl RecordingEnvironment {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            vars: HashMap::new(),
        }
    }
}

impl ProcessEnvironment for RecordingEnvironment {
    fn set_var(&mut self, key: &str, value: &str) {
        self.journal.record(Event::EnvSet {
            key: key.to_owned(),
            value: value.to_owned(),
        });
        self.vars.insert(key.to_owned(), value.to_owned());
    }

    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Toolkit whose loads produce a configurable number of root objects.
#[derive(Debug)]
pub struct RecordingToolkit {
    journal: Journal,
    roots_per_load: usize,
    exit_code: i32,
}

impl RecordingToolkit {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            roots_per_load: 1,
            exit_code: 0,
        }
    }

    #[must_use]
    pub fn with_roots(mut self, roots_per_load: usize) -> Self {
        self.roots_per_load = roots_per_load;
        self
    }

    #[must_use]
    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }

    fn host(&self) -> FakeHost {
        FakeHost {
            journal: self.journal.clone(),
            roots_per_load: self.roots_per_load,
            roots: Vec::new(),
        }
    }
}

impl UiToolkit for RecordingToolkit {
    fn create_application(
        &mut self,
        args: &[String],
    ) -> Result<Box<dyn UiApplication>, ToolkitError> {
        self.journal.record(Event::ApplicationCreated {
            args: args.to_vec(),
        });
        Ok(Box::new(FakeApplication {
            journal: self.journal.clone(),
            exit_code: self.exit_code,
        }))
    }

    fn create_engine(&mut self) -> Result<Box<dyn UiEngine>, ToolkitError> {
        self.journal.record(Event::EngineCreated);
        Ok(Box::new(FakeEngine { host: self.host() }))
    }

    fn create_view(&mut self) -> Result<Box<dyn UiView>, ToolkitError> {
        self.journal.record(Event::ViewCreated);
        Ok(Box::new(FakeView { host: self.host() }))
    }
}

struct FakeApplication {
    journal: Journal,
    exit_code: i32,
}

impl UiApplication for FakeApplication {
    fn exec(self: Box<Self>) -> Result<i32, ToolkitError> {
        self.journal.record(Event::Exec);
        Ok(self.exit_code)
    }
}

struct FakeRoot {
    journal: Journal,
}

impl RootObject for FakeRoot {
    fn set_property(&mut self, name: &str, value: bool) {
        self.journal.record(Event::PropertySet {
            name: name.to_owned(),
            value,
        });
    }
}

struct FakeHost {
    journal: Journal,
    roots_per_load: usize,
    roots: Vec<FakeRoot>,
}

impl FakeHost {
    fn add_import_path(&mut self, path: &Path) {
        self.journal.record(Event::ImportPathAdded(path.to_path_buf()));
    }

    fn instantiate(&mut self) {
        self.roots = (0..self.roots_per_load)
            .map(|_| FakeRoot {
                journal: self.journal.clone(),
            })
            .collect();
    }

    fn first_root(&mut self) -> Option<&mut dyn RootObject> {
        self.roots.first_mut().map(|root| root as &mut dyn RootObject)
    }
}

struct FakeEngine {
    host: FakeHost,
}

impl UiEngine for FakeEngine {
    fn add_import_path(&mut self, path: &Path) {
        self.host.add_import_path(path);
    }

    fn load(&mut self, document: &DocumentLocation) -> Result<(), ToolkitError> {
        self.host
            .journal
            .record(Event::DocumentLoaded(document.as_str().to_owned()));
        self.host.instantiate();
        Ok(())
    }

    fn root_object(&mut self) -> Option<&mut dyn RootObject> {
        self.host.first_root()
    }
}

struct FakeView {
    host: FakeHost,
}

impl UiView for FakeView {
    fn add_import_path(&mut self, path: &Path) {
        self.host.add_import_path(path);
    }

    fn set_source(&mut self, document: &DocumentLocation) -> Result<(), ToolkitError> {
        self.host
            .journal
            .record(Event::SourceSet(document.as_str().to_owned()));
        // a view hosts at most one root item
        self.host.roots_per_load = self.host.roots_per_load.min(1);
        self.host.instantiate();
        Ok(())
    }

    fn root_object(&mut self) -> Option<&mut dyn RootObject> {
        self.host.first_root()
    }

    fn show(&mut self) {
        self.host.journal.record(Event::ViewShown);
    }
}
