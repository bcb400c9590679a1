use std::path::Path;

use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE, DEFAULT_LOG_LEVEL, DEFAULT_OUTPUT_VERSION, ENV_PREFIX, SUPPORTED_VERSIONS,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// How converted cards are written.
#[derive(Debug, Clone, Deserialize)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "mirrors the serializer switches"
)]
pub struct OutputConfig {
    /// Target vCard version (`2.1`, `3.0` or `4.0`).
    pub version: String,
    pub write_rfc9554_extensions: bool,
    pub write_x_extensions: bool,
    pub write_non_standard: bool,
    pub write_empty_properties: bool,
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// Encoding label for files without a byte order mark; UTF-8 when unset.
    pub encoding: Option<String>,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `config.toml` and `ROLODEX_*` environment
    /// variables into a `Settings`. Environment variables take precedence over
    /// the file; nested keys are separated by `__`
    /// (`ROLODEX_OUTPUT__VERSION=3.0`).
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating it fails.
    pub fn load() -> Result<Self> {
        let settings = defaults()?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            // Environment
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Loads configuration from a TOML file on top of the defaults, without
    /// consulting the environment.
    ///
    /// ## Errors
    /// Returns an error if the file cannot be read or the result is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings = defaults()?
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        tracing::debug!(path = %path.display(), "configuration read from file");
        Ok(settings)
    }

    /// ## Summary
    /// Checks values the types cannot express.
    ///
    /// ## Errors
    /// Returns [`CoreError::InvalidConfiguration`] for an unsupported
    /// `output.version`.
    pub fn validate(&self) -> CoreResult<()> {
        if !SUPPORTED_VERSIONS.contains(&self.output.version.as_str()) {
            return Err(CoreError::InvalidConfiguration(format!(
                "output.version must be one of {}, got {}",
                SUPPORTED_VERSIONS.join(", "),
                self.output.version
            )));
        }
        Ok(())
    }
}

fn defaults() -> CoreResult<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("logging.level", DEFAULT_LOG_LEVEL)?
        .set_default("output.version", DEFAULT_OUTPUT_VERSION)?
        .set_default("output.write_rfc9554_extensions", false)?
        .set_default("output.write_x_extensions", true)?
        .set_default("output.write_non_standard", true)?
        .set_default("output.write_empty_properties", false)?)
}

/// ## Summary
/// Loads configuration from environment variables, a `.env` file and
/// `config.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(?settings, "configuration loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test_log::test]
    fn defaults_apply_to_empty_file() {
        let file = write_config("");
        let settings = Settings::from_file(file.path()).unwrap();

        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.output.version, "4.0");
        assert!(!settings.output.write_rfc9554_extensions);
        assert!(settings.output.write_x_extensions);
        assert!(settings.output.write_non_standard);
        assert!(!settings.output.write_empty_properties);
        assert_eq!(settings.output.product_id, None);
        assert_eq!(settings.input.encoding, None);
    }

    #[test_log::test]
    fn file_overrides_defaults() {
        let file = write_config(
            r#"
[logging]
level = "debug"

[output]
version = "3.0"
write_x_extensions = false
product_id = "-//Example//rolodex//EN"

[input]
encoding = "windows-1252"
"#,
        );
        let settings = Settings::from_file(file.path()).unwrap();

        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.output.version, "3.0");
        assert!(!settings.output.write_x_extensions);
        assert_eq!(settings.output.product_id.as_deref(), Some("-//Example//rolodex//EN"));
        assert_eq!(settings.input.encoding.as_deref(), Some("windows-1252"));
    }

    #[test_log::test]
    fn unsupported_version_is_rejected() {
        let file = write_config("[output]\nversion = \"5.0\"\n");
        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("output.version"));
    }
}
