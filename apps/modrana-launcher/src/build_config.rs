//! Locations compiled into the launcher.
//!
//! Packaging sets these through the build environment; none of them can be
//! changed at runtime.

use std::path::Path;

use launchkit::LaunchPaths;

/// Search path for the Python backend.
pub const PYTHON_PATH: &str = match option_env!("MODRANA_PYTHON_PATH") {
    Some(path) => path,
    None => "/usr/share/modrana",
};

/// Directory holding the universal components backends.
pub const UC_ROOT_PATH: &str = match option_env!("MODRANA_UC_ROOT_PATH") {
    Some(path) => path,
    None => "/usr/share/modrana/modules/gui_modules/gui_qt5/qml/universal_components",
};

/// Components backend matching the target platform.
pub const UC_BACKEND_FOLDER: &str = match option_env!("MODRANA_UC_BACKEND_FOLDER") {
    Some(folder) => folder,
    None if cfg!(feature = "sailfish") => "silica",
    None => "controls",
};

/// Entry QML document of the GUI.
pub const MAIN_QML: &str = match option_env!("MODRANA_MAIN_QML") {
    Some(path) => path,
    None => "/usr/share/modrana/modules/gui_modules/gui_qt5/qml/main.qml",
};

/// Optional YAML file with launcher settings.
pub const SETTINGS_FILE: &str = match option_env!("MODRANA_SETTINGS_FILE") {
    Some(path) => path,
    None => "/etc/modrana/launcher.yaml",
};

#[must_use]
pub fn launch_paths() -> LaunchPaths {
    LaunchPaths::compose(PYTHON_PATH, UC_ROOT_PATH, UC_BACKEND_FOLDER, MAIN_QML)
}

#[must_use]
pub fn settings_file() -> &'static Path {
    Path::new(SETTINGS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_path_is_root_joined_with_backend_folder() {
        let paths = launch_paths();
        assert_eq!(
            paths.import_path(),
            Path::new(UC_ROOT_PATH).join(UC_BACKEND_FOLDER)
        );
        assert_eq!(paths.python_path(), PYTHON_PATH);
        assert_eq!(paths.main_document().as_str(), MAIN_QML);
    }

    #[test]
    fn compiled_locations_are_not_blank() {
        for value in [PYTHON_PATH, UC_ROOT_PATH, UC_BACKEND_FOLDER, MAIN_QML, SETTINGS_FILE] {
            assert!(!value.trim().is_empty());
        }
    }
}
