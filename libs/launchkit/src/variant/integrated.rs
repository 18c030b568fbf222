use tracing::{debug, info};

use super::{
    LaunchArgs, LaunchContext, PlatformVariant, StartupStrategy, assert_capabilities, augment_args,
};
use crate::bootstrap::{StartupTimeline, VariantOptions};
use crate::error::LaunchError;
use crate::toolkit::UiToolkit;

/// Startup through the platform's own application and view (Sailfish).
#[derive(Debug, Clone)]
pub struct IntegratedStartup {
    options: VariantOptions,
}

impl IntegratedStartup {
    #[must_use]
    pub fn new(options: VariantOptions) -> Self {
        Self { options }
    }
}

impl StartupStrategy for IntegratedStartup {
    fn variant(&self) -> PlatformVariant {
        PlatformVariant::Integrated
    }

    fn launch(
        &self,
        ctx: &LaunchContext<'_>,
        args: LaunchArgs,
        toolkit: &mut dyn UiToolkit,
        timeline: &mut StartupTimeline,
    ) -> Result<i32, LaunchError> {
        let paths = ctx.paths();

        // the application consumes the argument vector on construction
        let args = augment_args(args, &self.options);
        debug!(%args, python_path = ctx.environment().python_path(), "creating platform application");
        let app = toolkit.create_application(args.as_slice())?;
        let mut view = toolkit.create_view()?;
        timeline.mark("host constructed");

        view.add_import_path(paths.import_path());
        view.set_source(paths.main_document())?;
        timeline.mark("document loaded");

        let root = view
            .root_object()
            .ok_or_else(|| LaunchError::missing_root(self.variant(), paths.main_document().as_str()))?;
        assert_capabilities(root, &self.options);
        timeline.mark("capability flags asserted");

        view.show();
        timeline.mark("view shown");
        timeline.mark("event loop entered");
        timeline.report();

        info!("entering event loop");
        Ok(app.exec()?)
    }
}
