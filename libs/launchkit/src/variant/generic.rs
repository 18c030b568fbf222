use tracing::{debug, info};

use super::{
    LaunchArgs, LaunchContext, PlatformVariant, StartupStrategy, assert_capabilities, augment_args,
};
use crate::bootstrap::{StartupTimeline, VariantOptions};
use crate::error::LaunchError;
use crate::toolkit::UiToolkit;

/// Startup through a standard application and QML engine.
#[derive(Debug, Clone)]
pub struct GenericStartup {
    options: VariantOptions,
}

impl GenericStartup {
    #[must_use]
    pub fn new(options: VariantOptions) -> Self {
        Self { options }
    }
}

impl StartupStrategy for GenericStartup {
    fn variant(&self) -> PlatformVariant {
        PlatformVariant::Generic
    }

    fn launch(
        &self,
        ctx: &LaunchContext<'_>,
        args: LaunchArgs,
        toolkit: &mut dyn UiToolkit,
        timeline: &mut StartupTimeline,
    ) -> Result<i32, LaunchError> {
        let paths = ctx.paths();

        let args = augment_args(args, &self.options);
        debug!(%args, python_path = ctx.environment().python_path(), "creating application");
        let app = toolkit.create_application(args.as_slice())?;
        let mut engine = toolkit.create_engine()?;
        timeline.mark("host constructed");

        engine.add_import_path(paths.import_path());
        engine.load(paths.main_document())?;
        timeline.mark("document loaded");

        // main.qml does not set its own visibility on every platform, hence
        // `force_visible` in the generic defaults
        let root = engine
            .root_object()
            .ok_or_else(|| LaunchError::missing_root(self.variant(), paths.main_document().as_str()))?;
        assert_capabilities(root, &self.options);
        timeline.mark("capability flags asserted");
        timeline.mark("event loop entered");
        timeline.report();

        info!("entering event loop");
        Ok(app.exec()?)
    }
}
