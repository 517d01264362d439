//! # Daemon Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an
//! empty file (or no file) is a valid configuration.
//!
//! ```toml
//! [scheduler]
//! update_interval_ms = 10
//! key_poll_interval_ms = 10
//! queue_capacity = 1
//!
//! [device]
//! mode = "usb"               # or "simulator"
//! reset_on_start = false
//! pixel_order = "row-major"  # or "column-major"
//! brightness = 80
//! backlight = [255, 128, 0]
//! persist_backlight = false
//!
//! [device.timeouts]
//! frame_ms = 1000
//! key_read_ms = 10
//! control_ms = 10
//! persist_ms = 1000
//!
//! [logging]
//! level = "info"
//! ```

use std::path::Path;
use std::time::Duration;

use g19_device::{PixelOrder, Timeouts};
use serde::{Deserialize, Serialize};

use crate::error::{ShellError, ShellResult};

/// Whole config file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tick cadences and the main queue.
    pub scheduler: SchedulerConfig,
    /// Device selection and startup settings.
    pub device: DeviceConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

impl Config {
    /// Parses a config document.
    ///
    /// # Errors
    ///
    /// [`ShellError::ConfigParse`] for malformed TOML, unknown keys or
    /// values outside their type's range, [`ShellError::ConfigInvalid`]
    /// for values [`Config::validate`] rejects.
    pub fn from_toml(text: &str) -> ShellResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the TOML types cannot express.
    ///
    /// # Errors
    ///
    /// [`ShellError::ConfigInvalid`] for a zero tick interval, which the
    /// scheduler would run only once.
    pub fn validate(&self) -> ShellResult<()> {
        for (key, value) in [
            ("scheduler.update_interval_ms", self.scheduler.update_interval_ms),
            ("scheduler.key_poll_interval_ms", self.scheduler.key_poll_interval_ms),
        ] {
            if value == 0 {
                return Err(ShellError::ConfigInvalid(format!("{key} must be at least 1")));
            }
        }
        Ok(())
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// [`ShellError::ConfigRead`] if the file cannot be read, otherwise as
    /// [`Config::from_toml`].
    pub fn load(path: &Path) -> ShellResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ShellError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

/// `[scheduler]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Repaint tick.
    pub update_interval_ms: u64,
    /// Key poll tick.
    pub key_poll_interval_ms: u64,
    /// Main queue bound. Scheduler ticks are dropped when it is full.
    pub queue_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 10,
            key_poll_interval_ms: 10,
            queue_capacity: 1,
        }
    }
}

impl SchedulerConfig {
    /// Repaint tick as a duration.
    #[must_use]
    pub const fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    /// Key poll tick as a duration.
    #[must_use]
    pub const fn key_poll_interval(&self) -> Duration {
        Duration::from_millis(self.key_poll_interval_ms)
    }
}

/// Which panel to drive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceMode {
    /// The real keyboard over USB.
    #[default]
    Usb,
    /// Headless stand-in.
    Simulator,
}

/// Pixel scan order written to the panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PixelOrderConfig {
    /// Row by row from the top-left.
    #[default]
    RowMajor,
    /// Column by column from the top-left.
    ColumnMajor,
}

impl From<PixelOrderConfig> for PixelOrder {
    fn from(order: PixelOrderConfig) -> Self {
        match order {
            PixelOrderConfig::RowMajor => Self::RowMajor,
            PixelOrderConfig::ColumnMajor => Self::ColumnMajor,
        }
    }
}

/// `[device]`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceConfig {
    /// USB or simulator.
    pub mode: DeviceMode,
    /// Bus reset before claiming the interfaces.
    pub reset_on_start: bool,
    /// Frame pixel order.
    pub pixel_order: PixelOrderConfig,
    /// Display brightness, 0..=100.
    pub brightness: Option<u8>,
    /// Keyboard backlight color.
    pub backlight: Option<[u8; 3]>,
    /// Store the backlight as the power-on default.
    pub persist_backlight: bool,
    /// Transfer timeouts.
    pub timeouts: TimeoutConfig,
}

/// `[device.timeouts]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeoutConfig {
    /// Bulk frame write.
    pub frame_ms: u64,
    /// Interrupt key reads.
    pub key_read_ms: u64,
    /// Volatile control transfers.
    pub control_ms: u64,
    /// Control transfers that write device flash.
    pub persist_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            frame_ms: 1000,
            key_read_ms: 10,
            control_ms: 10,
            persist_ms: 1000,
        }
    }
}

impl From<TimeoutConfig> for Timeouts {
    fn from(config: TimeoutConfig) -> Self {
        Self {
            frame: Duration::from_millis(config.frame_ms),
            key_read: Duration::from_millis(config.key_read_ms),
            control: Duration::from_millis(config.control_ms),
            persist: Duration::from_millis(config.persist_ms),
        }
    }
}

/// `[logging]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.scheduler.update_interval(), Duration::from_millis(10));
        assert_eq!(config.scheduler.queue_capacity, 1);
        assert_eq!(config.device.mode, DeviceMode::Usb);
        assert_eq!(config.logging.level, "info");
        assert_eq!(Timeouts::from(config.device.timeouts), Timeouts::default());
    }

    #[test]
    fn test_full_document() {
        let config = Config::from_toml(
            r#"
            [scheduler]
            update_interval_ms = 50
            key_poll_interval_ms = 20
            queue_capacity = 4

            [device]
            mode = "simulator"
            reset_on_start = true
            pixel_order = "column-major"
            brightness = 80
            backlight = [255, 128, 0]
            persist_backlight = true

            [device.timeouts]
            key_read_ms = 5

            [logging]
            level = "g19=debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.scheduler.key_poll_interval(), Duration::from_millis(20));
        assert_eq!(config.device.mode, DeviceMode::Simulator);
        assert_eq!(PixelOrder::from(config.device.pixel_order), PixelOrder::ColumnMajor);
        assert_eq!(config.device.backlight, Some([255, 128, 0]));
        assert_eq!(config.device.timeouts.key_read_ms, 5);
        assert_eq!(config.device.timeouts.frame_ms, 1000);
        assert_eq!(config.logging.level, "g19=debug");
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            Config::from_toml("[device]\nmode = \"serial\""),
            Err(ShellError::ConfigParse(_))
        ));
        assert!(Config::from_toml("[scheduler]\nupdate_ms = 5").is_err());
        assert!(Config::from_toml("[device]\nbrightness = 300").is_err());
    }

    #[test]
    fn test_rejects_zero_intervals() {
        let err = Config::from_toml("[scheduler]\nupdate_interval_ms = 0").unwrap_err();
        assert!(matches!(&err, ShellError::ConfigInvalid(msg) if msg.contains("update_interval_ms")));
        let err = Config::from_toml("[scheduler]\nkey_poll_interval_ms = 0").unwrap_err();
        assert!(matches!(&err, ShellError::ConfigInvalid(msg) if msg.contains("key_poll_interval_ms")));
        assert!(Config::from_toml("[scheduler]\nupdate_interval_ms = 1\nkey_poll_interval_ms = 1").is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/g19.toml")).unwrap_err();
        assert!(matches!(err, ShellError::ConfigRead { .. }));
    }
}
