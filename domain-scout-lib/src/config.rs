//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and merging
//! configurations with proper precedence rules.

use crate::error::DomainScoutError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration loaded from TOML files.
///
/// This represents the structure of configuration files that users can
/// create to set default values and custom presets.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// User-defined TLD presets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_presets: Option<HashMap<String, Vec<String>>>,

    /// Output formatting preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default delay between checks, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,

    /// Default TLD preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Default TLD list (alternative to preset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tlds: Option<Vec<String>>,

    /// Default pretty output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,

    /// Default whois timeout (as string, e.g., "8s", "30s")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_timeout: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Default output format ("text", "json" or "csv")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Include CSV headers by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_headers: Option<bool>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// The parsed configuration or an error if parsing fails.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainScoutError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainScoutError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainScoutError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig =
            toml::from_str(&content).map_err(|e| DomainScoutError::ConfigError {
                message: format!("Failed to parse TOML configuration: {}", e),
            })?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Looks for configuration files in standard locations and merges them,
    /// later locations overriding earlier ones: XDG, then home directory,
    /// then current directory.
    ///
    /// # Returns
    ///
    /// Merged configuration from all discovered files.
    pub fn discover_and_load(&self) -> Result<FileConfig, DomainScoutError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        // 1. Load XDG config (lowest precedence)
        if let Some(xdg_path) = self.get_xdg_config_path() {
            if let Ok(config) = self.load_file(&xdg_path) {
                tracing::debug!(path = %xdg_path.display(), "loaded config file");
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(xdg_path);
            }
        }

        // 2. Load global config
        if let Some(global_path) = self.get_global_config_path() {
            if let Ok(config) = self.load_file(&global_path) {
                tracing::debug!(path = %global_path.display(), "loaded config file");
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(global_path);
            }
        }

        // 3. Load local config (highest precedence)
        if let Some(local_path) = self.get_local_config_path() {
            if let Ok(config) = self.load_file(&local_path) {
                tracing::debug!(path = %local_path.display(), "loaded config file");
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(local_path);
            }
        }

        if self.verbose && loaded_files.len() > 1 {
            eprintln!("⚠️  Multiple config files found. Using precedence:");
            for (i, path) in loaded_files.iter().enumerate() {
                let status = if i == loaded_files.len() - 1 {
                    "active"
                } else {
                    "overridden"
                };
                eprintln!("   {} ({})", path.display(), status);
            }
        }

        Ok(merged_config)
    }

    /// Get the local configuration file path.
    ///
    /// Looks for configuration files in the current directory.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./domain-scout.toml", "./.domain-scout.toml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Get the global configuration file path.
    ///
    /// Looks for configuration files in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        if let Some(home) = env::var_os("HOME") {
            let candidates = [".domain-scout.toml", "domain-scout.toml"];

            for candidate in &candidates {
                let path = Path::new(&home).join(candidate);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        None
    }

    /// Get the XDG configuration file path.
    ///
    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-scout").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Merge two configurations with proper precedence.
    ///
    /// Values from `higher` take precedence over values from `lower`.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(mut lower_defaults), Some(higher_defaults)) => {
                    if higher_defaults.delay_ms.is_some() {
                        lower_defaults.delay_ms = higher_defaults.delay_ms;
                    }
                    if higher_defaults.preset.is_some() {
                        lower_defaults.preset = higher_defaults.preset;
                    }
                    if higher_defaults.tlds.is_some() {
                        lower_defaults.tlds = higher_defaults.tlds;
                    }
                    if higher_defaults.pretty.is_some() {
                        lower_defaults.pretty = higher_defaults.pretty;
                    }
                    if higher_defaults.whois_timeout.is_some() {
                        lower_defaults.whois_timeout = higher_defaults.whois_timeout;
                    }
                    Some(lower_defaults)
                }
                (None, Some(higher_defaults)) => Some(higher_defaults),
                (Some(lower_defaults), None) => Some(lower_defaults),
                (None, None) => None,
            },
            custom_presets: match (lower.custom_presets, higher.custom_presets) {
                (Some(mut lower_presets), Some(higher_presets)) => {
                    // Higher precedence wins for conflicting names
                    lower_presets.extend(higher_presets);
                    Some(lower_presets)
                }
                (None, Some(higher_presets)) => Some(higher_presets),
                (Some(lower_presets), None) => Some(lower_presets),
                (None, None) => None,
            },
            output: higher.output.or(lower.output),
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), DomainScoutError> {
        if let Some(defaults) = &config.defaults {
            // Validate whois timeout format
            if let Some(timeout_str) = &defaults.whois_timeout {
                match parse_timeout_string(timeout_str) {
                    None => {
                        return Err(DomainScoutError::ConfigError {
                            message: format!(
                                "Invalid whois_timeout format '{}'. Use format like '8s', '30s', '2m'",
                                timeout_str
                            ),
                        });
                    }
                    Some(0) => {
                        return Err(DomainScoutError::ConfigError {
                            message: "whois_timeout must be at least one second".to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }

            // Validate that preset and tlds are not both specified
            if defaults.preset.is_some() && defaults.tlds.is_some() {
                return Err(DomainScoutError::ConfigError {
                    message: "Cannot specify both 'preset' and 'tlds' in defaults".to_string(),
                });
            }
        }

        // Validate custom presets
        if let Some(presets) = &config.custom_presets {
            for (name, tlds) in presets {
                if name.is_empty() {
                    return Err(DomainScoutError::ConfigError {
                        message: "Custom preset names cannot be empty".to_string(),
                    });
                }

                if tlds.is_empty() {
                    return Err(DomainScoutError::ConfigError {
                        message: format!("Custom preset '{}' cannot have empty TLD list", name),
                    });
                }

                for tld in tlds {
                    if tld.is_empty() || tld.contains('.') || tld.contains(' ') {
                        return Err(DomainScoutError::ConfigError {
                            message: format!("Invalid TLD '{}' in preset '{}'", tld, name),
                        });
                    }
                }
            }
        }

        if let Some(output) = &config.output {
            if let Some(format) = &output.default_format {
                if !matches!(format.as_str(), "text" | "json" | "csv") {
                    return Err(DomainScoutError::ConfigError {
                        message: format!(
                            "Invalid default_format '{}'. Use 'text', 'json' or 'csv'",
                            format
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// This represents configuration values that can be set via DS_* environment
/// variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub delay_ms: Option<u64>,
    pub preset: Option<String>,
    pub tlds: Option<Vec<String>>,
    pub pretty: Option<bool>,
    pub whois_timeout: Option<String>,
    pub json: Option<bool>,
    pub csv: Option<bool>,
    pub file: Option<String>,
    pub config: Option<String>,
    pub debug: Option<bool>,
}

/// Parse a boolean-ish environment value.
fn parse_env_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load configuration from environment variables.
///
/// Parses all DS_* environment variables and returns a structured
/// configuration. Invalid values are logged as warnings and ignored.
///
/// # Arguments
///
/// * `verbose` - Whether to log environment variable usage
///
/// # Returns
///
/// Parsed environment configuration with validated values.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    let mut env_config = EnvConfig::default();

    // DS_DELAY - delay between checks in milliseconds
    if let Ok(val) = env::var("DS_DELAY") {
        match val.parse::<u64>() {
            Ok(delay_ms) => {
                env_config.delay_ms = Some(delay_ms);
                if verbose {
                    println!("🔧 Using DS_DELAY={}", delay_ms);
                }
            }
            Err(_) => {
                if verbose {
                    eprintln!("⚠️ Invalid DS_DELAY='{}', must be milliseconds", val);
                }
            }
        }
    }

    // DS_PRESET - TLD preset name
    if let Ok(preset) = env::var("DS_PRESET") {
        if !preset.trim().is_empty() {
            env_config.preset = Some(preset.clone());
            if verbose {
                println!("🔧 Using DS_PRESET={}", preset);
            }
        }
    }

    // DS_TLD - comma-separated TLD list
    if let Ok(tld_str) = env::var("DS_TLD") {
        let tlds: Vec<String> = tld_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !tlds.is_empty() {
            env_config.tlds = Some(tlds);
            if verbose {
                println!("🔧 Using DS_TLD={}", tld_str);
            }
        }
    }

    // DS_PRETTY - enable pretty output
    if let Ok(val) = env::var("DS_PRETTY") {
        match parse_env_bool(&val) {
            Some(pretty) => {
                env_config.pretty = Some(pretty);
                if verbose {
                    println!("🔧 Using DS_PRETTY={}", pretty);
                }
            }
            None => {
                if verbose {
                    eprintln!("⚠️ Invalid DS_PRETTY='{}', use true/false", val);
                }
            }
        }
    }

    // DS_TIMEOUT - whois timeout setting
    if let Ok(timeout_str) = env::var("DS_TIMEOUT") {
        if parse_timeout_string(&timeout_str).is_some() {
            env_config.whois_timeout = Some(timeout_str.clone());
            if verbose {
                println!("🔧 Using DS_TIMEOUT={}", timeout_str);
            }
        } else if verbose {
            eprintln!(
                "⚠️ Invalid DS_TIMEOUT='{}', use format like '8s', '30s', '2m'",
                timeout_str
            );
        }
    }

    // DS_JSON - enable JSON output
    if let Ok(val) = env::var("DS_JSON") {
        match parse_env_bool(&val) {
            Some(json) => {
                env_config.json = Some(json);
                if verbose {
                    println!("🔧 Using DS_JSON={}", json);
                }
            }
            None => {
                if verbose {
                    eprintln!("⚠️ Invalid DS_JSON='{}', use true/false", val);
                }
            }
        }
    }

    // DS_CSV - enable CSV output
    if let Ok(val) = env::var("DS_CSV") {
        match parse_env_bool(&val) {
            Some(csv) => {
                env_config.csv = Some(csv);
                if verbose {
                    println!("🔧 Using DS_CSV={}", csv);
                }
            }
            None => {
                if verbose {
                    eprintln!("⚠️ Invalid DS_CSV='{}', use true/false", val);
                }
            }
        }
    }

    // DS_FILE - default domains file
    if let Ok(file_path) = env::var("DS_FILE") {
        if !file_path.trim().is_empty() {
            env_config.file = Some(file_path.clone());
            if verbose {
                println!("🔧 Using DS_FILE={}", file_path);
            }
        }
    }

    // DS_CONFIG - default config file
    if let Ok(config_path) = env::var("DS_CONFIG") {
        if !config_path.trim().is_empty() {
            env_config.config = Some(config_path.clone());
            if verbose {
                println!("🔧 Using DS_CONFIG={}", config_path);
            }
        }
    }

    // DS_DEBUG - structured debug logging
    if let Ok(val) = env::var("DS_DEBUG") {
        match parse_env_bool(&val) {
            Some(debug) => {
                env_config.debug = Some(debug);
                if verbose {
                    println!("🔧 Using DS_DEBUG={}", debug);
                }
            }
            None => {
                if verbose {
                    eprintln!("⚠️ Invalid DS_DEBUG='{}', use true/false", val);
                }
            }
        }
    }

    env_config
}

impl EnvConfig {
    /// Get the preset value, checking for conflicts with explicit TLD list.
    pub fn get_effective_preset(&self) -> Option<String> {
        // If explicit TLDs are set, preset is ignored
        if self.tlds.is_some() {
            None
        } else {
            self.preset.clone()
        }
    }

    /// Check if output format conflicts exist (JSON and CSV both set).
    pub fn has_output_format_conflict(&self) -> bool {
        matches!((self.json, self.csv), (Some(true), Some(true)))
    }
}

/// Parse a timeout string like "8s", "30s", "2m" into seconds.
///
/// A bare number is taken as seconds.
///
/// # Returns
///
/// Number of seconds, or None if parsing fails.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if timeout_str.ends_with('s') {
        timeout_str
            .strip_suffix('s')
            .and_then(|s| s.parse::<u64>().ok())
    } else if timeout_str.ends_with('m') {
        timeout_str
            .strip_suffix('m')
            .and_then(|s| s.parse::<u64>().ok())
            .map(|m| m * 60)
    } else {
        timeout_str.parse::<u64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn timeout_strings_parse_to_seconds() {
        assert_eq!(parse_timeout_string("8s"), Some(8));
        assert_eq!(parse_timeout_string("30s"), Some(30));
        assert_eq!(parse_timeout_string("2m"), Some(120));
        assert_eq!(parse_timeout_string("5"), Some(5));
        assert_eq!(parse_timeout_string("invalid"), None);
    }

    #[test]
    fn valid_config_files_load() {
        let config_content = r#"
[defaults]
delay_ms = 500
preset = "startup"
pretty = true

[custom_presets]
my_preset = ["com", "org", "io"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let manager = ConfigManager::new(false);
        let config = manager.load_file(temp_file.path()).unwrap();

        assert!(config.defaults.is_some());
        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.delay_ms, Some(500));
        assert_eq!(defaults.preset, Some("startup".to_string()));
        assert_eq!(defaults.pretty, Some(true));

        assert!(config.custom_presets.is_some());
        let presets = config.custom_presets.unwrap();
        assert_eq!(
            presets.get("my_preset"),
            Some(&vec![
                "com".to_string(),
                "org".to_string(),
                "io".to_string()
            ])
        );
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let manager = ConfigManager::new(false);
        let result = manager.load_file("/nonexistent/domain-scout.toml");
        assert!(result.is_err());
    }

    #[test]
    fn zero_whois_timeout_is_rejected() {
        let config_content = r#"
[defaults]
whois_timeout = "0s"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let manager = ConfigManager::new(false);
        assert!(manager.load_file(temp_file.path()).is_err());
    }

    #[test]
    fn preset_and_tlds_cannot_both_be_set() {
        let config_content = r#"
[defaults]
preset = "startup"
tlds = ["com", "io"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let manager = ConfigManager::new(false);
        assert!(manager.load_file(temp_file.path()).is_err());
    }

    #[test]
    fn custom_preset_tlds_are_validated() {
        let config_content = r#"
[custom_presets]
broken = ["com", ".io"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let manager = ConfigManager::new(false);
        assert!(manager.load_file(temp_file.path()).is_err());
    }

    #[test]
    fn higher_precedence_values_win_in_merge() {
        let manager = ConfigManager::new(false);

        let lower = FileConfig {
            defaults: Some(DefaultsConfig {
                delay_ms: Some(350),
                preset: Some("startup".to_string()),
                pretty: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };

        let higher = FileConfig {
            defaults: Some(DefaultsConfig {
                delay_ms: Some(1000),
                pretty: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = manager.merge_configs(lower, higher);
        let defaults = merged.defaults.unwrap();

        assert_eq!(defaults.delay_ms, Some(1000)); // Higher wins
        assert_eq!(defaults.preset, Some("startup".to_string())); // Lower preserved
        assert_eq!(defaults.pretty, Some(true)); // Higher wins
    }

    #[test]
    fn output_section_loads_and_validates() {
        let config_content = r#"
[output]
default_format = "json"
csv_headers = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let manager = ConfigManager::new(false);
        let config = manager.load_file(temp_file.path()).unwrap();

        let output = config.output.unwrap();
        assert_eq!(output.default_format, Some("json".to_string()));
        assert_eq!(output.csv_headers, Some(false));
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let config_content = r#"
[output]
default_format = "xml"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let manager = ConfigManager::new(false);
        assert!(manager.load_file(temp_file.path()).is_err());
    }

    #[test]
    fn custom_presets_merge_across_files() {
        let manager = ConfigManager::new(false);

        let mut lower_presets = HashMap::new();
        lower_presets.insert("alpha".to_string(), vec!["com".to_string()]);
        lower_presets.insert("shared".to_string(), vec!["org".to_string()]);

        let mut higher_presets = HashMap::new();
        higher_presets.insert("shared".to_string(), vec!["io".to_string()]);

        let lower = FileConfig {
            custom_presets: Some(lower_presets),
            ..Default::default()
        };
        let higher = FileConfig {
            custom_presets: Some(higher_presets),
            ..Default::default()
        };

        let merged = manager.merge_configs(lower, higher);
        let presets = merged.custom_presets.unwrap();

        assert_eq!(presets.get("alpha"), Some(&vec!["com".to_string()]));
        assert_eq!(presets.get("shared"), Some(&vec!["io".to_string()]));
    }
}
