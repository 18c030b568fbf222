//! Toolkit backed by an external QML runtime process.
//!
//! The backend itself starts its Qt 5 GUI this way (`qmlscene main.qml -I
//! <components>`). Here the application, engine, view and root handles only
//! record what the launcher asks for; [`UiApplication::exec`] writes a small
//! bootstrap document that instantiates the entry document with the recorded
//! root properties and runs `<program> <runtime args> -I <import>... <bootstrap>`.
//!
//! The runtime's own argv (`Qt.application.arguments`) belongs to the runtime
//! binary. The argument vector the application was constructed with is
//! published instead as `launcher.applicationArguments`, where `launcher` is
//! the id of the bootstrap object and visible from the entry document.
//!
//! The child inherits the launcher's environment, `PYTHONPATH` included.

use std::cell::RefCell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::rc::Rc;

use serde_json::{Map, Value};
use tracing::{debug, info};
use url::Url;

use crate::bootstrap::{DocumentLocation, RuntimeSettings};
use crate::error::ToolkitError;
use crate::toolkit::{
    RootObject, UiApplication, UiEngine, UiToolkit, UiView, VISIBLE_PROPERTY,
};

/// File name of the generated bootstrap document.
pub const BOOTSTRAP_DOCUMENT_NAME: &str = "modrana-launcher.qml";

const IMPORT_PATH_FLAG: &str = "-I";

#[derive(Debug, Default)]
struct LaunchPlan {
    application_args: Option<Vec<String>>,
    import_paths: Vec<PathBuf>,
    document: Option<Url>,
    root_properties: Map<String, Value>,
}

impl LaunchPlan {
    fn command_line(&self, runtime: &RuntimeSettings, bootstrap: &Path) -> Vec<OsString> {
        let mut argv: Vec<OsString> = runtime.args.iter().map(OsString::from).collect();
        for path in &self.import_paths {
            argv.push(IMPORT_PATH_FLAG.into());
            argv.push(path.into());
        }
        argv.push(bootstrap.into());
        argv
    }
}

type SharedPlan = Rc<RefCell<LaunchPlan>>;

/// [`UiToolkit`] that runs the GUI in a child QML runtime.
#[derive(Debug)]
pub struct ProcessToolkit {
    runtime: RuntimeSettings,
    plan: SharedPlan,
}

impl ProcessToolkit {
    #[must_use]
    pub fn new(runtime: RuntimeSettings) -> Self {
        Self {
            runtime,
            plan: SharedPlan::default(),
        }
    }

    fn require_application(&self, operation: &'static str) -> Result<(), ToolkitError> {
        if self.plan.borrow().application_args.is_some() {
            Ok(())
        } else {
            Err(ToolkitError::NoApplication { operation })
        }
    }
}

impl UiToolkit for ProcessToolkit {
    fn create_application(
        &mut self,
        args: &[String],
    ) -> Result<Box<dyn UiApplication>, ToolkitError> {
        self.plan.borrow_mut().application_args = Some(args.to_vec());
        Ok(Box::new(ProcessApplication {
            runtime: self.runtime.clone(),
            plan: Rc::clone(&self.plan),
        }))
    }

    fn create_engine(&mut self) -> Result<Box<dyn UiEngine>, ToolkitError> {
        self.require_application("engine creation")?;
        Ok(Box::new(ProcessEngine {
            host: DocumentHost::new(Rc::clone(&self.plan)),
        }))
    }

    fn create_view(&mut self) -> Result<Box<dyn UiView>, ToolkitError> {
        self.require_application("view creation")?;
        Ok(Box::new(ProcessView {
            host: DocumentHost::new(Rc::clone(&self.plan)),
        }))
    }
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Root of the document the child runtime will instantiate.
struct DeferredRoot {
    plan: SharedPlan,
}

impl RootObject for DeferredRoot {
    fn set_property(&mut self, name: &str, value: bool) {
        debug!(name, value, "root property recorded");
        self.plan
            .borrow_mut()
            .root_properties
            .insert(name.to_owned(), Value::Bool(value));
    }
}

/// Engine state shared by the engine and view handles.
struct DocumentHost {
    plan: SharedPlan,
    root: Option<DeferredRoot>,
}

impl DocumentHost {
    fn new(plan: SharedPlan) -> Self {
        Self { plan, root: None }
    }

    fn add_import_path(&mut self, path: &Path) {
        self.plan.borrow_mut().import_paths.push(path.to_path_buf());
    }

    fn load(&mut self, document: &DocumentLocation) -> Result<(), ToolkitError> {
        let url = document.to_url()?;
        debug!(%url, "entry document recorded");
        self.plan.borrow_mut().document = Some(url);
        self.root = Some(DeferredRoot {
            plan: Rc::clone(&self.plan),
        });
        Ok(())
    }

    fn root_object(&mut self) -> Option<&mut dyn RootObject> {
        self.root.as_mut().map(|root| root as &mut dyn RootObject)
    }
}

struct ProcessEngine {
    host: DocumentHost,
}

impl UiEngine for ProcessEngine {
    fn add_import_path(&mut self, path: &Path) {
        self.host.add_import_path(path);
    }

    fn load(&mut self, document: &DocumentLocation) -> Result<(), ToolkitError> {
        self.host.load(document)
    }

    fn root_object(&mut self) -> Option<&mut dyn RootObject> {
        self.host.root_object()
    }
}

struct ProcessView {
    host: DocumentHost,
}

impl UiView for ProcessView {
    fn add_import_path(&mut self, path: &Path) {
        self.host.add_import_path(path);
    }

    fn set_source(&mut self, document: &DocumentLocation) -> Result<(), ToolkitError> {
        self.host.load(document)
    }

    fn root_object(&mut self) -> Option<&mut dyn RootObject> {
        self.host.root_object()
    }

    // the instantiated root window is the view
    fn show(&mut self) {
        self.host
            .plan
            .borrow_mut()
            .root_properties
            .insert(VISIBLE_PROPERTY.to_owned(), Value::Bool(true));
    }
}

struct ProcessApplication {
    runtime: RuntimeSettings,
    plan: SharedPlan,
}

impl UiApplication for ProcessApplication {
    fn exec(self: Box<Self>) -> Result<i32, ToolkitError> {
        let workdir = tempfile::Builder::new()
            .prefix("modrana-launcher-")
            .tempdir()?;
        let bootstrap = workdir.path().join(BOOTSTRAP_DOCUMENT_NAME);

        let argv = {
            let plan = self.plan.borrow();
            let document = plan.document.as_ref().ok_or_else(|| {
                ToolkitError::invalid_document("", "no entry document was loaded")
            })?;
            std::fs::write(
                &bootstrap,
                bootstrap_document(
                    document,
                    plan.application_args.as_deref().unwrap_or_default(),
                    &plan.root_properties,
                ),
            )?;
            plan.command_line(&self.runtime, &bootstrap)
        };

        info!(
            program = %self.runtime.program.display(),
            bootstrap = %bootstrap.display(),
            "starting UI runtime"
        );
        let status = Command::new(&self.runtime.program)
            .args(&argv)
            .status()
            .map_err(|source| ToolkitError::Spawn {
                program: self.runtime.program.clone(),
                source,
            })?;

        let code = exit_code(status);
        debug!(code, "UI runtime exited");
        Ok(code)
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

/// QML document instantiating `document` with `properties` as initial root
/// property values and publishing `arguments` as `launcher.applicationArguments`.
#[must_use]
pub fn bootstrap_document(
    document: &Url,
    arguments: &[String],
    properties: &Map<String, Value>,
) -> String {
    // JSON string, array and object literals are valid JavaScript
    let source = Value::String(document.to_string());
    let arguments = Value::from(arguments.to_vec());
    let properties = Value::Object(properties.clone());
    format!(
        r"import QtQml 2.2

QtObject {{
    id: launcher

    readonly property var applicationArguments: {arguments}
    property var root: null

    function instantiate(component) {{
        if (component.status === Component.Error) {{
            console.error(component.errorString());
            Qt.exit(1);
            return;
        }}
        root = component.createObject(null, {properties});
    }}

    Component.onCompleted: {{
        var component = Qt.createComponent({source});
        if (component.status === Component.Loading) {{
            component.statusChanged.connect(function() {{ instantiate(component); }});
        }} else {{
            instantiate(component);
        }}
    }}
}}
"
    )
}
