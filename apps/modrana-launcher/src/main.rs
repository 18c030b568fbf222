//! modRana launcher
//!
//! Exports the backend search path and starts the Qt 5 GUI through the
//! startup variant configured for this build. Every argument is forwarded to
//! the GUI untouched.

// Settings and logger failures happen before any subscriber exists
#![allow(clippy::print_stderr)]

use std::process::ExitCode;

use anyhow::Context;
use launchkit::backends::ProcessToolkit;
use launchkit::{LaunchArgs, Launcher, LauncherSettings, SystemEnvironment, init_logging};

mod build_config;

fn main() -> ExitCode {
    let settings = match LauncherSettings::load(Some(build_config::settings_file())) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("modrana: failed to load launcher settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logging(&settings.logging) {
        eprintln!("modrana: {e}");
        return ExitCode::FAILURE;
    }

    match run(settings) {
        Ok(code) => exit_code(code),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "modRana launcher failed");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: LauncherSettings) -> anyhow::Result<i32> {
    let mut toolkit = ProcessToolkit::new(settings.runtime.clone());
    let launcher = Launcher::new(build_config::launch_paths(), settings);
    launcher
        .run(
            LaunchArgs::from_env(),
            &mut SystemEnvironment::new(),
            &mut toolkit,
        )
        .context("GUI startup failed")
}

/// The GUI's exit status, truncated the way the platform reports it.
fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code & 0xff).map_or(ExitCode::FAILURE, ExitCode::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_keep_the_low_byte() {
        assert_eq!(exit_code(0), ExitCode::SUCCESS);
        assert_eq!(exit_code(3), ExitCode::from(3));
        assert_eq!(exit_code(143), ExitCode::from(143));
        assert_eq!(exit_code(256 + 2), ExitCode::from(2));
        assert_eq!(exit_code(-1), ExitCode::from(255));
    }
}
