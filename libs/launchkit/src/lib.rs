//! Bootstrap library for the modRana native launcher.
//!
//! The launcher does not render anything itself. It prepares the process
//! environment for the Python backend, picks one of two startup variants,
//! builds the QML host, tells the root object that a native launcher is in
//! use and then hands control to the host's event loop.
//!
//! ## Modules
//!
//! - [`bootstrap`]: configuration, environment setup, logging and the
//!   [`Launcher`] entry point
//! - [`toolkit`]: the narrow surface consumed from the UI runtime
//! - [`variant`]: the integrated and generic startup strategies
//! - [`backends`]: toolkit implementations (an external runtime process)

// === PUBLIC API ===
pub mod bootstrap;
pub mod error;
pub mod toolkit;
pub mod variant;

pub use bootstrap::{
    ConsoleFormat, DeviceId, DocumentLocation, EnvironmentReady, LaunchPaths, Launcher,
    LauncherSettings, LoggingConfig, ProcessEnvironment, RuntimeSettings, StartupTimeline,
    SystemEnvironment, VariantOptions, init_logging, prepare_environment,
};
pub use error::{LaunchError, ToolkitError};
pub use variant::{LaunchArgs, PlatformVariant, StartupStrategy, strategy_for};

// === BACKENDS ===
pub mod backends;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;
