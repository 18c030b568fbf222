//! Process bootstrap for the launcher.
//!
//! ## Modules
//!
//! - [`config`]: compiled-in paths and runtime launcher settings
//! - [`env`]: the one-time process environment setup for the Python backend
//! - [`logging`]: console logging
//! - [`timeline`]: startup milestone reporting
//!
//! [`Launcher::run`] ties them together.

pub mod config;
pub mod env;
pub mod logging;
pub mod timeline;

pub use config::{
    ConsoleFormat, DeviceId, DocumentLocation, KNOWN_DEVICE_MODULES, LaunchPaths,
    LauncherSettings, LoggingConfig, RuntimeSettings, SETTINGS_ENV_PREFIX, UnknownDeviceError,
    VariantOptions,
};
pub use env::{
    EnvironmentReady, PYTHON_PATH_ENV, ProcessEnvironment, SystemEnvironment, prepare_environment,
};
pub use logging::{init_logging, log_filter};
pub use timeline::StartupTimeline;

mod run;
pub use run::Launcher;
