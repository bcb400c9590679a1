/// Prefix of the environment variables read by [`crate::config::Settings`]
pub const ENV_PREFIX: &str = "ROLODEX";

/// Configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// vCard versions accepted for `output.version`
pub const SUPPORTED_VERSIONS: [&str; 3] = ["2.1", "3.0", "4.0"];

pub const DEFAULT_OUTPUT_VERSION: &str = "4.0";
pub const DEFAULT_LOG_LEVEL: &str = "info";
