//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "bluecore.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "bluecore";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "BLUECORE";

/// Separator between nested keys in environment variable names
///
/// `BLUECORE_REGISTRY__HANDLER_THREAD_PREFIX` maps to
/// `registry.handler_thread_prefix`.
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// MODULE REGISTRY CONSTANTS
// ============================================================================

/// Prefix of every handler thread name (`<prefix>-<module>`)
pub const DEFAULT_HANDLER_THREAD_PREFIX: &str = "bluecore";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding an `EnvFilter` directive
pub const LOG_FILTER_ENV: &str = "BLUECORE_LOG";

/// Fallback file stem for log files
pub const DEFAULT_LOG_FILE_STEM: &str = "bluecore";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 5;
