//! Shared, ordered record of everything the fakes were asked to do.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    EnvSet { key: String, value: String },
    ApplicationCreated { args: Vec<String> },
    EngineCreated,
    ViewCreated,
    ImportPathAdded(PathBuf),
    DocumentLoaded(String),
    SourceSet(String),
    PropertySet { name: String, value: bool },
    ViewShown,
    Exec,
}

/// Cloning a journal shares it.
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Index of the first event matching `pred`.
    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(pred)
    }

    /// Properties set on root objects, in order.
    pub fn properties(&self) -> Vec<(String, bool)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::PropertySet { name, value } => Some((name.clone(), *value)),
                _ => None,
            })
            .collect()
    }

    /// Arguments the application was constructed with.
    pub fn application_args(&self) -> Option<Vec<String>> {
        self.0.borrow().iter().find_map(|event| match event {
            Event::ApplicationCreated { args } => Some(args.clone()),
            _ => None,
        })
    }
}
