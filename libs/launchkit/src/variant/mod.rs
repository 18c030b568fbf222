//! Startup strategies.
//!
//! Exactly one strategy runs per process. The integrated one drives a platform
//! view (Sailfish style), the generic one a plain QML engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bootstrap::{
    DeviceId, EnvironmentReady, LaunchPaths, LauncherSettings, StartupTimeline, VariantOptions,
};
use crate::error::LaunchError;
use crate::toolkit::{NATIVE_LAUNCHER_PROPERTY, RootObject, UiToolkit, VISIBLE_PROPERTY};

mod generic;
mod integrated;

pub use generic::GenericStartup;
pub use integrated::IntegratedStartup;

/// Backend flag selecting a device module.
pub const DEVICE_FLAG: &str = "-d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformVariant {
    Integrated,
    Generic,
}

impl Default for PlatformVariant {
    /// Follows the build target: Sailfish builds start integrated.
    fn default() -> Self {
        if cfg!(feature = "sailfish") {
            Self::Integrated
        } else {
            Self::Generic
        }
    }
}

impl fmt::Display for PlatformVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integrated => f.write_str("integrated"),
            Self::Generic => f.write_str("generic"),
        }
    }
}

/// Process argument vector handed to the UI application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchArgs(Vec<String>);

impl LaunchArgs {
    #[must_use]
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(args.into_iter().map(Into::into).collect())
    }

    /// Arguments of the current process; non UTF-8 arguments are converted lossily.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::args_os().map(|arg| arg.to_string_lossy().into_owned()))
    }

    /// Append `-d <device>` so the backend skips device auto-detection.
    #[must_use]
    pub fn with_device(mut self, device: &DeviceId) -> Self {
        self.0.push(DEVICE_FLAG.to_owned());
        self.0.push(device.as_str().to_owned());
        self
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for LaunchArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// What a strategy needs from the bootstrap.
///
/// Building one requires [`EnvironmentReady`], so no strategy can run before
/// the backend search path is exported.
#[derive(Debug, Clone, Copy)]
pub struct LaunchContext<'a> {
    paths: &'a LaunchPaths,
    environment: &'a EnvironmentReady,
}

impl<'a> LaunchContext<'a> {
    #[must_use]
    pub fn new(paths: &'a LaunchPaths, environment: &'a EnvironmentReady) -> Self {
        Self { paths, environment }
    }

    #[must_use]
    pub fn paths(&self) -> &'a LaunchPaths {
        self.paths
    }

    #[must_use]
    pub fn environment(&self) -> &'a EnvironmentReady {
        self.environment
    }
}

pub trait StartupStrategy {
    fn variant(&self) -> PlatformVariant;

    /// Construct the host, load the entry document, assert the capability
    /// flags and run the event loop.
    ///
    /// # Errors
    /// Returns `LaunchError::MissingRoot` if the document yields no root
    /// object, or the toolkit error that stopped startup.
    fn launch(
        &self,
        ctx: &LaunchContext<'_>,
        args: LaunchArgs,
        toolkit: &mut dyn UiToolkit,
        timeline: &mut StartupTimeline,
    ) -> Result<i32, LaunchError>;
}

#[must_use]
pub fn strategy_for(
    variant: PlatformVariant,
    settings: &LauncherSettings,
) -> Box<dyn StartupStrategy> {
    let options = settings.options_for(variant).clone();
    match variant {
        PlatformVariant::Integrated => Box::new(IntegratedStartup::new(options)),
        PlatformVariant::Generic => Box::new(GenericStartup::new(options)),
    }
}

fn augment_args(args: LaunchArgs, options: &VariantOptions) -> LaunchArgs {
    match &options.device {
        Some(device) => args.with_device(device),
        None => args,
    }
}

fn assert_capabilities(root: &mut dyn RootObject, options: &VariantOptions) {
    if options.force_visible {
        root.set_property(VISIBLE_PROPERTY, true);
    }
    root.set_property(NATIVE_LAUNCHER_PROPERTY, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::prepare_environment;
    use crate::test_support::{Journal, RecordingEnvironment, RecordingToolkit};

    #[test]
    fn device_flag_is_appended_in_order() {
        let args = LaunchArgs::new(["app"]).with_device(&DeviceId::jolla());
        assert_eq!(args.as_slice(), ["app", "-d", "jolla"]);
    }

    #[test]
    fn augmentation_follows_variant_options() {
        let args = augment_args(LaunchArgs::new(["app", "--center-on-position"]), &VariantOptions::generic());
        assert_eq!(args.as_slice(), ["app", "--center-on-position"]);

        let args = augment_args(LaunchArgs::new(["app"]), &VariantOptions::integrated());
        assert_eq!(args.as_slice(), ["app", "-d", "jolla"]);
    }

    #[test]
    fn strategy_matches_requested_variant() {
        let settings = LauncherSettings::default();
        for variant in [PlatformVariant::Integrated, PlatformVariant::Generic] {
            assert_eq!(strategy_for(variant, &settings).variant(), variant);
        }
    }

    #[test]
    fn variant_names_round_trip_through_serde() {
        let parsed: PlatformVariant = serde_json::from_str("\"integrated\"").unwrap();
        assert_eq!(parsed, PlatformVariant::Integrated);
        assert_eq!(serde_json::to_string(&PlatformVariant::Generic).unwrap(), "\"generic\"");
    }

    #[test]
    fn event_loop_entry_is_the_last_milestone() {
        let paths = LaunchPaths::new("/opt/libs", "/opt/libs/ui_controls", "/opt/app/main.qml");
        let settings = LauncherSettings::default();
        for variant in [PlatformVariant::Integrated, PlatformVariant::Generic] {
            let journal = Journal::new();
            let mut env = RecordingEnvironment::new(journal.clone());
            let mut toolkit = RecordingToolkit::new(journal);
            let ready = prepare_environment(&mut env, &paths).unwrap();
            let ctx = LaunchContext::new(&paths, &ready);
            let mut timeline = StartupTimeline::start();

            strategy_for(variant, &settings)
                .launch(&ctx, LaunchArgs::new(["app"]), &mut toolkit, &mut timeline)
                .unwrap();

            assert_eq!(timeline.milestones().last(), Some("event loop entered"), "{variant}");
        }
    }
}
