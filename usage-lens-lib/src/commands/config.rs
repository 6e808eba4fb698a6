use crate::Result;
use crate::usage::BucketWindow;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File name looked up in the base directory when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "usage-lens.toml";

/// Upper bound for both window settings: one leap year of hours
const MAX_WINDOW_HOURS: usize = 366 * 24;

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Number of hourly buckets in the chart
    #[serde(default = "default_window_length")]
    pub window_length: usize,

    /// Hours between the current time and the start of the first bucket
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: u32,
}

const fn default_window_length() -> usize {
    crate::usage::DEFAULT_WINDOW_LENGTH
}

const fn default_lookback_hours() -> u32 {
    crate::usage::DEFAULT_LOOKBACK_HOURS
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading usage-lens configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("no configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading usage-lens configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// The bucket window described by this configuration
    #[must_use]
    pub const fn window(&self) -> BucketWindow {
        BucketWindow {
            length: self.window_length,
            lookback_hours: self.lookback_hours,
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a window setting is out of range
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WINDOW_HOURS).contains(&self.window_length) {
            return Err(app_err!(
                "window_length must be between 1 and {}, got {}",
                MAX_WINDOW_HOURS,
                self.window_length
            ));
        }

        if self.lookback_hours as usize > MAX_WINDOW_HOURS {
            return Err(app_err!(
                "lookback_hours must be at most {}, got {}",
                MAX_WINDOW_HOURS,
                self.lookback_hours
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
