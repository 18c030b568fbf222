//! One-time process environment setup.
//!
//! The Python backend is started by the QML layer, possibly while the host is
//! still being constructed, so its search path has to be in the environment
//! before any toolkit object exists. [`prepare_environment`] does that write
//! and hands out the [`EnvironmentReady`] token every startup strategy needs.

use tracing::debug;

use super::config::LaunchPaths;
use crate::error::LaunchError;

/// Variable through which the Python backend finds its modules.
pub const PYTHON_PATH_ENV: &str = "PYTHONPATH";

pub trait ProcessEnvironment {
    fn set_var(&mut self, key: &str, value: &str);
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
///
/// Writes are only sound while the process is single-threaded; the launcher
/// performs its single write before the UI runtime starts any thread.
#[derive(Debug, Default)]
pub struct SystemEnvironment {
    _private: (),
}

impl SystemEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProcessEnvironment for SystemEnvironment {
    #[allow(unsafe_code)]
    fn set_var(&mut self, key: &str, value: &str) {
        // SAFETY: called from the launcher's main thread before the UI runtime
        // and the backend interpreter exist; nothing reads the environment
        // concurrently.
        unsafe { std::env::set_var(key, value) }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Proof that the backend search path has been exported.
///
/// Only [`prepare_environment`] creates it.
#[derive(Debug)]
pub struct EnvironmentReady {
    python_path: String,
}

impl EnvironmentReady {
    #[must_use]
    pub fn python_path(&self) -> &str {
        &self.python_path
    }
}

/// Export `PYTHONPATH` for the backend interpreter.
///
/// Must run once, before any UI toolkit object is created. Afterwards
/// `env.var(PYTHONPATH)` equals `paths.python_path()`.
///
/// # Errors
/// Returns `LaunchError::InvalidEnvironment` if the path contains a NUL byte.
pub fn prepare_environment(
    env: &mut dyn ProcessEnvironment,
    paths: &LaunchPaths,
) -> Result<EnvironmentReady, LaunchError> {
    let python_path = paths.python_path();
    if python_path.contains('\0') {
        return Err(LaunchError::InvalidEnvironment {
            key: PYTHON_PATH_ENV,
            value: python_path.escape_default().to_string(),
        });
    }

    env.set_var(PYTHON_PATH_ENV, python_path);
    debug!(key = PYTHON_PATH_ENV, value = python_path, "environment prepared");

    Ok(EnvironmentReady {
        python_path: python_path.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Event, Journal, RecordingEnvironment};

    #[test]
    fn exports_python_path() {
        let journal = Journal::new();
        let mut env = RecordingEnvironment::new(journal.clone());
        let paths = LaunchPaths::new("/opt/libs", "/opt/libs/ui_controls", "/opt/app/main.qml");

        let ready = prepare_environment(&mut env, &paths).unwrap();

        assert_eq!(ready.python_path(), "/opt/libs");
        assert_eq!(env.var(PYTHON_PATH_ENV).as_deref(), Some("/opt/libs"));
        assert_eq!(
            journal.events(),
            vec![Event::EnvSet {
                key: PYTHON_PATH_ENV.to_owned(),
                value: "/opt/libs".to_owned(),
            }]
        );
    }

    #[test]
    fn rejects_nul_in_python_path() {
        let mut env = RecordingEnvironment::new(Journal::new());
        let paths = LaunchPaths::new("/opt/\0libs", "/opt/libs/ui_controls", "/opt/app/main.qml");

        let err = prepare_environment(&mut env, &paths).unwrap_err();

        assert!(matches!(err, LaunchError::InvalidEnvironment { key: PYTHON_PATH_ENV, .. }));
        assert_eq!(env.var(PYTHON_PATH_ENV), None);
    }

    #[test]
    fn system_environment_writes_process_env() {
        temp_env::with_var_unset(PYTHON_PATH_ENV, || {
            let mut env = SystemEnvironment::new();
            let paths = LaunchPaths::new("/opt/libs", "/opt/libs/ui_controls", "/opt/app/main.qml");

            prepare_environment(&mut env, &paths).unwrap();

            assert_eq!(std::env::var(PYTHON_PATH_ENV).as_deref(), Ok("/opt/libs"));
        });
    }
}
