//! Configuration persistence utilities
//!
//! Loads and saves host preferences for a dial (handle size, dial scale,
//! starting angles) as TOML under the platform config directory. The alarm
//! range a user drags to is not written here.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::dial::{DialGeometry, DialOptions, DEFAULT_ICON_WIDTH};
use crate::geometry::Point;
use crate::time_codec::Meridiem;

/// Error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to determine config directory
    NoConfigDir,
    /// IO error while reading/writing config
    Io(io::Error),
    /// Failed to parse config file
    Parse(toml::de::Error),
    /// Failed to serialize config
    Serialize(toml::ser::Error),
    /// Config parsed but holds values the dial cannot use
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Could not determine config directory"),
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Host preferences for a dial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialSettings {
    /// Handle icon diameter in view units
    pub icon_width: f64,
    /// Dial radius as a fraction of the smaller window dimension
    pub radius_fraction: f64,
    /// Bedtime angle the dial starts at
    pub default_bed_angle: f64,
    /// Wake angle the dial starts at
    pub default_wake_angle: f64,
    /// Touching the ring away from the handles drags both
    pub drag_ring_on_band_touch: bool,
    pub bed_meridiem: Meridiem,
    pub wake_meridiem: Meridiem,
}

impl Default for DialSettings {
    fn default() -> Self {
        Self {
            icon_width: DEFAULT_ICON_WIDTH,
            radius_fraction: 0.35,
            default_bed_angle: 45.0,
            default_wake_angle: 90.0,
            drag_ring_on_band_touch: false,
            bed_meridiem: Meridiem::PM,
            wake_meridiem: Meridiem::AM,
        }
    }
}

impl DialSettings {
    /// Reject values that cannot describe a dial
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.icon_width.is_finite() || self.icon_width <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "icon_width must be positive, got {}",
                self.icon_width
            )));
        }
        if !(self.radius_fraction > 0.0 && self.radius_fraction <= 0.5) {
            return Err(ConfigError::Invalid(format!(
                "radius_fraction must be in (0, 0.5], got {}",
                self.radius_fraction
            )));
        }
        if !self.default_bed_angle.is_finite() || !self.default_wake_angle.is_finite() {
            return Err(ConfigError::Invalid(
                "default angles must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn options(&self) -> DialOptions {
        DialOptions {
            drag_ring_on_band_touch: self.drag_ring_on_band_touch,
        }
    }

    /// Dial geometry for a view whose smaller side is `min_dim`
    ///
    /// The icon shrinks with small views so it never exceeds the radius.
    pub fn geometry_for(&self, min_dim: f64) -> DialGeometry {
        let radius = (min_dim * self.radius_fraction).max(1.0);
        DialGeometry {
            center: Point::new(radius, radius),
            radius,
            icon_width: self.icon_width.min(radius),
        }
    }
}

/// Get the base configuration directory for all dials
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "alarm-dial", "dials").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the configuration file path for a specific dial host
pub fn config_path(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", name)))
}

/// Load configuration for a specific dial host
///
/// Returns `None` if the config file doesn't exist yet.
/// Returns an error if the file exists but can't be parsed.
pub fn load_config<T: DeserializeOwned>(name: &str) -> Result<Option<T>, ConfigError> {
    let path = config_path(name).ok_or(ConfigError::NoConfigDir)?;
    load_config_from(&path)
}

/// Load configuration from an explicit file
pub fn load_config_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let config: T = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Save configuration for a specific dial host
pub fn save_config<T: Serialize>(name: &str, config: &T) -> Result<(), ConfigError> {
    let path = config_path(name).ok_or(ConfigError::NoConfigDir)?;
    save_config_to(&path, config)
}

/// Save configuration to an explicit file
pub fn save_config_to<T: Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Delete configuration for a specific dial host
pub fn delete_config(name: &str) -> Result<(), ConfigError> {
    let path = config_path(name).ok_or(ConfigError::NoConfigDir)?;

    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

/// Load and validate dial settings, falling back to defaults when absent
pub fn load_settings(name: &str) -> Result<DialSettings, ConfigError> {
    let settings: DialSettings = load_config(name)?.unwrap_or_default();
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path() {
        let path = config_path("bedtime_dial");
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("bedtime_dial.toml"));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dial.toml");

        let settings = DialSettings {
            icon_width: 32.0,
            drag_ring_on_band_touch: true,
            ..DialSettings::default()
        };
        save_config_to(&path, &settings).unwrap();

        let loaded: Option<DialSettings> = load_config_from(&path).unwrap();
        assert_eq!(loaded, Some(settings));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Option<DialSettings> = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dial.toml");
        fs::write(&path, "icon_width = 24.0\nwake_meridiem = \"PM\"\n").unwrap();

        let loaded: DialSettings = load_config_from(&path).unwrap().unwrap();
        assert_eq!(loaded.icon_width, 24.0);
        assert_eq!(loaded.wake_meridiem, Meridiem::PM);
        assert_eq!(loaded.radius_fraction, DialSettings::default().radius_fraction);
    }

    #[test]
    fn test_garbage_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dial.toml");
        fs::write(&path, "icon_width = \"wide\"").unwrap();

        let result: Result<Option<DialSettings>, _> = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate() {
        assert!(DialSettings::default().validate().is_ok());

        let bad_icon = DialSettings {
            icon_width: 0.0,
            ..DialSettings::default()
        };
        assert!(matches!(bad_icon.validate(), Err(ConfigError::Invalid(_))));

        let bad_fraction = DialSettings {
            radius_fraction: 0.8,
            ..DialSettings::default()
        };
        assert!(bad_fraction.validate().is_err());

        let bad_angle = DialSettings {
            default_bed_angle: f64::NAN,
            ..DialSettings::default()
        };
        assert!(bad_angle.validate().is_err());
    }

    #[test]
    fn test_geometry_for_clamps_icon() {
        let settings = DialSettings::default();
        let g = settings.geometry_for(1000.0);
        assert_eq!(g.radius, 350.0);
        assert_eq!(g.icon_width, 40.0);
        assert_eq!(g.center, Point::new(350.0, 350.0));

        let tiny = settings.geometry_for(50.0);
        assert!(tiny.icon_width <= tiny.radius);
    }
}
