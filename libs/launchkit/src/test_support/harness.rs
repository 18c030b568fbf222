//! One-call launcher runs against the recording fakes.

use super::fake::{RecordingEnvironment, RecordingToolkit};
use super::journal::Journal;
use crate::bootstrap::{LaunchPaths, Launcher, LauncherSettings, VariantOptions};
use crate::error::LaunchError;
use crate::variant::{LaunchArgs, PlatformVariant};

/// Launcher wired to a [`RecordingEnvironment`] and a [`RecordingToolkit`]
/// sharing one [`Journal`].
pub struct LaunchHarness {
    launcher: Launcher,
    args: LaunchArgs,
    roots_per_load: usize,
    exit_code: i32,
}

/// Result of [`LaunchHarness::run`].
pub struct LaunchOutcome {
    pub result: Result<i32, LaunchError>,
    pub journal: Journal,
    pub environment: RecordingEnvironment,
}

impl LaunchHarness {
    pub fn builder() -> LaunchHarnessBuilder {
        LaunchHarnessBuilder::default()
    }

    pub fn run(self) -> LaunchOutcome {
        let journal = Journal::new();
        let mut environment = RecordingEnvironment::new(journal.clone());
        let mut toolkit = RecordingToolkit::new(journal.clone())
            .with_roots(self.roots_per_load)
            .with_exit_code(self.exit_code);

        let result = self.launcher.run(self.args, &mut environment, &mut toolkit);
        LaunchOutcome {
            result,
            journal,
            environment,
        }
    }
}

/// Builder for [`LaunchHarness`].
pub struct LaunchHarnessBuilder {
    paths: LaunchPaths,
    settings: LauncherSettings,
    args: Vec<String>,
    roots_per_load: usize,
    exit_code: i32,
}

impl Default for LaunchHarnessBuilder {
    fn default() -> Self {
        Self {
            paths: LaunchPaths::new("/opt/libs", "/opt/libs/ui_controls", "/opt/app/main.qml"),
            settings: LauncherSettings::default(),
            args: vec!["app".to_owned()],
            roots_per_load: 1,
            exit_code: 0,
        }
    }
}

impl LaunchHarnessBuilder {
    pub fn with_paths(mut self, paths: LaunchPaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_variant(mut self, variant: PlatformVariant) -> Self {
        self.settings.variant = variant;
        self
    }

    pub fn with_variant_options(mut self, variant: PlatformVariant, options: VariantOptions) -> Self {
        match variant {
            PlatformVariant::Integrated => self.settings.integrated = options,
            PlatformVariant::Generic => self.settings.generic = options,
        }
        self
    }

    pub fn with_args(mut self, args: &[&str]) -> Self {
        self.args = args.iter().map(|a| (*a).to_owned()).collect();
        self
    }

    /// Number of root objects each document load yields.
    pub fn with_roots(mut self, roots_per_load: usize) -> Self {
        self.roots_per_load = roots_per_load;
        self
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = exit_code;
        self
    }

    pub fn build(self) -> LaunchHarness {
        LaunchHarness {
            launcher: Launcher::new(self.paths, self.settings),
            args: LaunchArgs::new(self.args),
            roots_per_load: self.roots_per_load,
            exit_code: self.exit_code,
        }
    }
}
