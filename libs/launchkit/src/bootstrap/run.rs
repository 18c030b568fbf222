use tracing::info;

use super::config::{LaunchPaths, LauncherSettings};
use super::env::{ProcessEnvironment, prepare_environment};
use super::timeline::StartupTimeline;
use crate::error::LaunchError;
use crate::toolkit::UiToolkit;
use crate::variant::{LaunchArgs, LaunchContext, strategy_for};

/// Startup sequence from raw process arguments to the host's event loop.
#[derive(Debug, Clone)]
pub struct Launcher {
    paths: LaunchPaths,
    settings: LauncherSettings,
}

impl Launcher {
    #[must_use]
    pub fn new(paths: LaunchPaths, settings: LauncherSettings) -> Self {
        Self { paths, settings }
    }

    /// Export the backend search path, run the configured startup variant
    /// and return the exit code of the event loop.
    ///
    /// Nothing is requested from `toolkit` before the environment write.
    ///
    /// # Errors
    /// Returns an error if the environment cannot be prepared, the toolkit
    /// fails, or the entry document yields no root object.
    pub fn run(
        &self,
        args: LaunchArgs,
        env: &mut dyn ProcessEnvironment,
        toolkit: &mut dyn UiToolkit,
    ) -> Result<i32, LaunchError> {
        let mut timeline = StartupTimeline::start();
        self.paths.log_resolved();

        let ready = prepare_environment(env, &self.paths)?;
        timeline.mark("environment ready");

        let strategy = strategy_for(self.settings.variant, &self.settings);
        info!(variant = %strategy.variant(), "selected startup variant");

        let ctx = LaunchContext::new(&self.paths, &ready);
        let exit_code = strategy.launch(&ctx, args, toolkit, &mut timeline)?;
        info!(exit_code, "event loop finished");
        Ok(exit_code)
    }
}
