use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::error::{LaunchError, ToolkitError};
use crate::variant::PlatformVariant;

/// Prefix of environment variables overriding [`LauncherSettings`].
///
/// Nested keys are separated by `__`, e.g. `MODRANA_LAUNCHER_LOGGING__LEVEL=debug`.
pub const SETTINGS_ENV_PREFIX: &str = "MODRANA_LAUNCHER_";

/// Device modules shipped with the Python backend, by id.
pub const KNOWN_DEVICE_MODULES: &[&str] = &[
    "android",
    "android_chroot",
    "bb10",
    "jolla",
    "n900",
    "n9",
    "neo",
    "nemo",
    "netbook",
    "pc",
    "q7",
];

// ---------------------------------------------------------------------------
// Compiled-in paths
// ---------------------------------------------------------------------------

/// Entry document of the QML GUI, a file path or a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation(String);

impl DocumentLocation {
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL form of the location as understood by the QML runtime.
    ///
    /// Locations that already carry a scheme (`file:`, `qrc:`, `http:` ...)
    /// are kept, anything else is a file path resolved against the current
    /// directory.
    ///
    /// # Errors
    /// Returns `ToolkitError::InvalidDocument` if the path cannot be made absolute.
    pub fn to_url(&self) -> Result<Url, ToolkitError> {
        // single-letter schemes are Windows drive letters
        if let Ok(url) = Url::parse(&self.0)
            && url.scheme().len() > 1
        {
            return Ok(url);
        }

        let absolute = std::path::absolute(&self.0)
            .map_err(|e| ToolkitError::invalid_document(&self.0, e.to_string()))?;
        Url::from_file_path(&absolute)
            .map_err(|()| ToolkitError::invalid_document(&self.0, "not a file path"))
    }
}

impl fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three build-time constants the launcher works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPaths {
    python_path: String,
    import_path: PathBuf,
    main_document: DocumentLocation,
}

impl LaunchPaths {
    #[must_use]
    pub fn new(
        python_path: impl Into<String>,
        import_path: impl Into<PathBuf>,
        main_document: impl Into<String>,
    ) -> Self {
        Self {
            python_path: python_path.into(),
            import_path: import_path.into(),
            main_document: DocumentLocation::new(main_document),
        }
    }

    /// Build the paths from the raw build constants; the import path is the
    /// components root joined with the backend folder name. The folder is
    /// always taken relative to the root, leading `/` included.
    #[must_use]
    pub fn compose(
        python_path: impl Into<String>,
        components_root: impl AsRef<Path>,
        components_folder: &str,
        main_document: impl Into<String>,
    ) -> Self {
        Self::new(
            python_path,
            components_root
                .as_ref()
                .join(components_folder.trim_start_matches('/')),
            main_document,
        )
    }

    /// Search path of the Python backend, exported as `PYTHONPATH`.
    #[must_use]
    pub fn python_path(&self) -> &str {
        &self.python_path
    }

    /// QML import path of the universal components backend.
    #[must_use]
    pub fn import_path(&self) -> &Path {
        &self.import_path
    }

    #[must_use]
    pub fn main_document(&self) -> &DocumentLocation {
        &self.main_document
    }

    pub fn log_resolved(&self) {
        info!("modRana launcher running");
        info!(python_path = %self.python_path, "Python path");
        info!(import_path = %self.import_path.display(), "UC backend path");
        info!(main_document = %self.main_document, "modRana main.qml");
    }
}

// ---------------------------------------------------------------------------
// Device selection
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
#[error("unknown device module '{0}'")]
pub struct UnknownDeviceError(String);

/// Id of a backend device module, validated against [`KNOWN_DEVICE_MODULES`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// # Errors
    /// Returns `UnknownDeviceError` if no backend device module has this id.
    pub fn parse(id: &str) -> Result<Self, UnknownDeviceError> {
        let id = id.trim().to_lowercase();
        if KNOWN_DEVICE_MODULES.contains(&id.as_str()) {
            Ok(Self(id))
        } else {
            Err(UnknownDeviceError(id))
        }
    }

    /// Device module of Sailfish OS phones.
    #[must_use]
    pub fn jolla() -> Self {
        Self("jolla".to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceId {
    type Error = UnknownDeviceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Runtime settings
// ---------------------------------------------------------------------------

/// Behaviour that differs between the two startup variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantOptions {
    /// Set `visible = true` on the root object after load.
    #[serde(default)]
    pub force_visible: bool,
    /// Device module forced on the backend with `-d <device>`.
    #[serde(default)]
    pub device: Option<DeviceId>,
}

impl VariantOptions {
    /// The platform view shows itself; the backend must not auto-detect the device.
    #[must_use]
    pub fn integrated() -> Self {
        Self {
            force_visible: false,
            device: Some(DeviceId::jolla()),
        }
    }

    /// The entry document does not set its own visibility.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            force_visible: true,
            device: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directives; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: ConsoleFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: ConsoleFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

/// External QML runtime started by the process backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeSettings {
    #[serde(default = "default_runtime_program")]
    pub program: PathBuf,
    /// Arguments placed before the launcher supplied ones.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            program: default_runtime_program(),
            args: Vec::new(),
        }
    }
}

// `sailfish-qml` only starts installed applications by name, so Sailfish
// builds use the same runtime
fn default_runtime_program() -> PathBuf {
    PathBuf::from("qml")
}

/// Runtime-tunable launcher settings.
///
/// The paths in [`LaunchPaths`] are absent: they are build inputs
/// and cannot be overridden here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherSettings {
    #[serde(default)]
    pub variant: PlatformVariant,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub runtime: RuntimeSettings,
    #[serde(default = "VariantOptions::integrated")]
    pub integrated: VariantOptions,
    #[serde(default = "VariantOptions::generic")]
    pub generic: VariantOptions,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            variant: PlatformVariant::default(),
            logging: LoggingConfig::default(),
            runtime: RuntimeSettings::default(),
            integrated: VariantOptions::integrated(),
            generic: VariantOptions::generic(),
        }
    }
}

impl LauncherSettings {
    /// Layered settings: compiled defaults, then the YAML file (if it
    /// exists), then `MODRANA_LAUNCHER_*` environment variables.
    #[must_use]
    pub fn figment(settings_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = settings_file {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(SETTINGS_ENV_PREFIX).split("__"))
    }

    /// # Errors
    /// Returns `LaunchError::Settings` if a layer cannot be read or does not
    /// match the settings schema.
    pub fn load(settings_file: Option<&Path>) -> Result<Self, LaunchError> {
        Ok(Self::figment(settings_file).extract()?)
    }

    #[must_use]
    pub fn options_for(&self, variant: PlatformVariant) -> &VariantOptions {
        match variant {
            PlatformVariant::Integrated => &self.integrated,
            PlatformVariant::Generic => &self.generic,
        }
    }
}
