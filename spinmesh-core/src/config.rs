/// Viewport configuration loaded from TOML
use crate::damping::DampingMode;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

/// An sRGB colour, written as `#rrggbb` in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::ValidationError(format!(
                "colour must be #rrggbb, got {hex:?}"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|e| {
                ConfigError::ValidationError(format!("bad colour {hex:?}: {e}"))
            })
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Scale every channel by `amount` (clamped to 0..=1).
    pub fn scaled(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * amount).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

/// Every tunable of the viewport. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Number of independent triangles in the generated mesh
    pub triangle_count: usize,
    /// Vertices are drawn from `[-half_extent, half_extent]` on every axis
    pub half_extent: f32,
    /// Fixed seed for the mesh generator; random when absent
    pub seed: Option<u64>,
    /// Radians of target rotation per pixel of drag
    pub rotation_sensitivity: f32,
    /// Camera distance per unit of wheel delta
    pub zoom_sensitivity: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub initial_distance: f32,
    pub rotation_damping: f32,
    pub zoom_damping: f32,
    /// Vertical field of view
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub wire_color: Rgb,
    pub background: Rgb,
    /// Kept last so it serializes as a trailing TOML table
    pub damping: DampingMode,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            triangle_count: 50,
            half_extent: 2.0,
            seed: None,
            rotation_sensitivity: 0.002,
            zoom_sensitivity: 0.001,
            zoom_min: 1.0,
            zoom_max: 10.0,
            initial_distance: 5.0,
            rotation_damping: 0.1,
            zoom_damping: 0.05,
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            wire_color: Rgb::new(0xff, 0xff, 0x00),
            background: Rgb::new(0x00, 0x00, 0x00),
            damping: DampingMode::PerTick,
        }
    }
}

impl ViewportConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ViewportConfig = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::ReadError(format!("failed to read {}: {e}", path.display()))
        })?;

        let config = Self::from_toml_str(&content)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(format!("failed to serialize TOML: {e}")))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: String| Err(ConfigError::ValidationError(msg));

        for (name, value) in [
            ("half_extent", self.half_extent),
            ("rotation_sensitivity", self.rotation_sensitivity),
            ("zoom_sensitivity", self.zoom_sensitivity),
            ("zoom_min", self.zoom_min),
            ("zoom_max", self.zoom_max),
            ("initial_distance", self.initial_distance),
            ("fov_degrees", self.fov_degrees),
            ("near", self.near),
            ("far", self.far),
        ] {
            if !value.is_finite() {
                return fail(format!("{name} must be a finite number, got {value}"));
            }
        }

        if self.triangle_count == 0 {
            return fail("triangle_count must be at least 1".into());
        }
        if !(self.half_extent > 0.0) {
            return fail(format!("half_extent must be positive, got {}", self.half_extent));
        }
        if self.rotation_sensitivity < 0.0 || self.zoom_sensitivity < 0.0 {
            return fail("sensitivities must not be negative".into());
        }
        if !(self.zoom_min > 0.0) || !(self.zoom_max >= self.zoom_min) {
            return fail(format!(
                "zoom range [{}, {}] must be positive and ordered",
                self.zoom_min, self.zoom_max
            ));
        }
        for (name, factor) in [
            ("rotation_damping", self.rotation_damping),
            ("zoom_damping", self.zoom_damping),
        ] {
            if !(factor > 0.0 && factor <= 1.0) {
                return fail(format!("{name} must lie in (0, 1], got {factor}"));
            }
        }
        if let DampingMode::TimeScaled { reference_hz } = self.damping {
            if !(reference_hz.is_finite() && reference_hz > 0.0) {
                return fail(format!("reference_hz must be positive and finite, got {reference_hz}"));
            }
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return fail(format!("fov_degrees must lie in (0, 180), got {}", self.fov_degrees));
        }
        if !(self.near > 0.0) || !(self.far > self.near) {
            return fail(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            ));
        }
        Ok(())
    }

    /// The initial zoom distance, pulled into the allowed range
    pub fn clamped_initial_distance(&self) -> f32 {
        self.initial_distance.clamp(self.zoom_min, self.zoom_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ViewportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.triangle_count, 50);
        assert_eq!(config.damping, DampingMode::PerTick);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ViewportConfig::from_toml_str(
            r##"
triangle_count = 12
wire_color = "#00ff80"

[damping]
mode = "time_scaled"
reference_hz = 60.0
"##,
        )
        .unwrap();

        assert_eq!(config.triangle_count, 12);
        assert_eq!(config.wire_color, Rgb::new(0x00, 0xff, 0x80));
        assert_eq!(config.damping, DampingMode::TimeScaled { reference_hz: 60.0 });
        assert_eq!(config.zoom_max, 10.0);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = ViewportConfig {
            seed: Some(7),
            ..ViewportConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        let parsed = ViewportConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_inverted_zoom_range() {
        let err = ViewportConfig::from_toml_str("zoom_min = 8.0\nzoom_max = 2.0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        for doc in [
            "zoom_max = nan",
            "zoom_min = nan",
            "initial_distance = nan",
            "initial_distance = inf",
            "half_extent = nan",
            "zoom_sensitivity = nan",
            "rotation_sensitivity = -inf",
            "near = nan",
            "far = inf",
            "fov_degrees = nan",
            "[damping]\nmode = \"time_scaled\"\nreference_hz = nan",
            "[damping]\nmode = \"time_scaled\"\nreference_hz = inf",
        ] {
            let err = ViewportConfig::from_toml_str(doc).unwrap_err();
            assert!(matches!(err, ConfigError::ValidationError(_)), "{doc}: {err}");
        }
    }

    #[test]
    fn test_validated_config_keeps_zoom_target_in_range() {
        let config = ViewportConfig::from_toml_str("initial_distance = 0.25").unwrap();
        let distance = config.clamped_initial_distance();
        assert!((config.zoom_min..=config.zoom_max).contains(&distance));
    }

    #[test]
    fn test_rejects_damping_out_of_range() {
        let config = ViewportConfig {
            zoom_damping: 1.5,
            ..ViewportConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ViewportConfig {
            rotation_damping: 0.0,
            ..ViewportConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_colour() {
        let err = ViewportConfig::from_toml_str("background = \"black\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::from_hex("#FFFF00").unwrap(), Rgb::new(255, 255, 0));
        assert_eq!(Rgb::from_hex("102030").unwrap(), Rgb::new(0x10, 0x20, 0x30));
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#zzzzzz").is_err());
        // from_str_radix alone would take the sign as part of each pair
        assert!(Rgb::from_hex("#+f+f+f").is_err());
        assert_eq!(Rgb::new(255, 128, 0).to_string(), "#ff8000");
        assert_eq!(Rgb::new(200, 100, 0).scaled(0.5), Rgb::new(100, 50, 0));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "triangle_count = 3\nseed = 42").unwrap();

        let config = ViewportConfig::load(file.path()).unwrap();
        assert_eq!(config.triangle_count, 3);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewportConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_initial_distance_is_clamped() {
        let config = ViewportConfig {
            initial_distance: 40.0,
            ..ViewportConfig::default()
        };
        assert_eq!(config.clamped_initial_distance(), 10.0);
    }
}
