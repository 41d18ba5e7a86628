//! Snowfall configuration: defaults, TOML parsing and layered loading
//!
//! Config is loaded with four layers of precedence (highest wins):
//! 1. Environment variables: `SNOWFALL_{KEY}` (e.g. `SNOWFALL_SNOWFLAKES_NUM`)
//! 2. An explicitly named file
//! 3. Project-local: `snowfall.toml`
//! 4. Global: `~/.snowfall/config.toml`

use serde::Serialize;
use snowfall_core::{Color, Result, SnowfallError};
use std::path::{Path, PathBuf};

pub const DEFAULT_SNOWFLAKES_NUM: u32 = 300;
pub const DEFAULT_SNOWFLAKE_ALPHA_MIN: i32 = 150;
pub const DEFAULT_SNOWFLAKE_ALPHA_MAX: i32 = 250;
pub const DEFAULT_SNOWFLAKE_ANGLE_MAX: i32 = 10;
pub const DEFAULT_SNOWFLAKE_SIZE_MIN_DP: i32 = 6;
pub const DEFAULT_SNOWFLAKE_SIZE_MAX_DP: i32 = 20;
pub const DEFAULT_SNOWFLAKE_SPEED_MIN: i32 = 2;
pub const DEFAULT_SNOWFLAKE_SPEED_MAX: i32 = 12;
pub const DEFAULT_SNOWFLAKES_FADING_ENABLED: bool = false;
pub const DEFAULT_SNOWFLAKES_ALREADY_FALLING: bool = false;

/// Project-local config file name
pub const PROJECT_CONFIG_FILE: &str = "snowfall.toml";

/// Largest accepted flake size, in density-independent pixels
pub const MAX_SNOWFLAKE_SIZE_DP: i32 = 10_000;
/// Largest accepted speed magnitude, in pixels per frame
pub const MAX_SNOWFLAKE_SPEED: i32 = 10_000;
/// Largest accepted deflection, in degrees
pub const MAX_SNOWFLAKE_ANGLE: i32 = 360;

/// Styled options for one snowfall view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnowfallConfig {
    pub snowflakes_num: u32,
    /// Optional sprite drawn instead of circles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
    pub alpha_min: i32,
    pub alpha_max: i32,
    /// Maximum deflection from vertical, in degrees
    pub angle_max: i32,
    /// Smallest flake, in density-independent pixels
    pub size_min: i32,
    /// Largest flake, in density-independent pixels
    pub size_max: i32,
    pub speed_min: i32,
    pub speed_max: i32,
    pub fading_enabled: bool,
    pub already_falling: bool,
    pub color: [u8; 3],
    /// Display density used to turn dp into pixels
    pub density: f32,
}

impl Default for SnowfallConfig {
    fn default() -> Self {
        Self {
            snowflakes_num: DEFAULT_SNOWFLAKES_NUM,
            image: None,
            alpha_min: DEFAULT_SNOWFLAKE_ALPHA_MIN,
            alpha_max: DEFAULT_SNOWFLAKE_ALPHA_MAX,
            angle_max: DEFAULT_SNOWFLAKE_ANGLE_MAX,
            size_min: DEFAULT_SNOWFLAKE_SIZE_MIN_DP,
            size_max: DEFAULT_SNOWFLAKE_SIZE_MAX_DP,
            speed_min: DEFAULT_SNOWFLAKE_SPEED_MIN,
            speed_max: DEFAULT_SNOWFLAKE_SPEED_MAX,
            fading_enabled: DEFAULT_SNOWFLAKES_FADING_ENABLED,
            already_falling: DEFAULT_SNOWFLAKES_ALREADY_FALLING,
            color: [255, 255, 255],
            density: 1.0,
        }
    }
}

impl SnowfallConfig {
    /// Parse a config from a TOML table, keeping defaults for missing keys
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();
        config.merge_toml(table);
        config
    }

    /// Overwrite the fields present in `table`
    pub fn merge_toml(&mut self, table: &toml::value::Table) {
        if let Some(v) = table.get("snowflakes_num") {
            self.snowflakes_num = v
                .as_integer()
                .map(|n| n.clamp(0, u32::MAX.into()) as u32)
                .unwrap_or(self.snowflakes_num);
        }
        if let Some(v) = table.get("image") {
            if let Some(s) = v.as_str() {
                self.image = if s.is_empty() { None } else { Some(PathBuf::from(s)) };
            }
        }
        if let Some(v) = table.get("alpha_min") {
            self.alpha_min = toml_i32(v, self.alpha_min);
        }
        if let Some(v) = table.get("alpha_max") {
            self.alpha_max = toml_i32(v, self.alpha_max);
        }
        if let Some(v) = table.get("angle_max") {
            self.angle_max = toml_i32(v, self.angle_max);
        }
        if let Some(v) = table.get("size_min") {
            self.size_min = toml_i32(v, self.size_min);
        }
        if let Some(v) = table.get("size_max") {
            self.size_max = toml_i32(v, self.size_max);
        }
        if let Some(v) = table.get("speed_min") {
            self.speed_min = toml_i32(v, self.speed_min);
        }
        if let Some(v) = table.get("speed_max") {
            self.speed_max = toml_i32(v, self.speed_max);
        }
        if let Some(v) = table.get("fading_enabled") {
            self.fading_enabled = v.as_bool().unwrap_or(self.fading_enabled);
        }
        if let Some(v) = table.get("already_falling") {
            self.already_falling = v.as_bool().unwrap_or(self.already_falling);
        }
        if let Some(v) = table.get("color") {
            self.color = toml_rgb(v, self.color);
        }
        if let Some(v) = table.get("density") {
            self.density = v
                .as_float()
                .map(|f| f as f32)
                .or_else(|| v.as_integer().map(|i| i as f32))
                .unwrap_or(self.density);
        }
    }

    /// Load config with layered precedence: global < project < `explicit` < env vars
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let global_path = Self::global_config_path();
        Self::load_layers(
            global_path.as_deref(),
            Path::new(PROJECT_CONFIG_FILE),
            explicit,
        )
    }

    /// Merge the given layers in order; missing global or project files are skipped,
    /// a missing explicit file is an error
    pub fn load_layers(
        global: Option<&Path>,
        project: &Path,
        explicit: Option<&Path>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = global.filter(|p| p.exists()) {
            config.merge_toml(&Self::load_file(global_path)?);
        }

        if project.exists() {
            config.merge_toml(&Self::load_file(project)?);
        }

        if let Some(path) = explicit {
            config.merge_toml(&Self::load_file(path)?);
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file path only (plus env overrides)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::from_toml(&Self::load_file(path)?);
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check paired bounds and value ranges
    pub fn validate(&self) -> Result<()> {
        for (field, min, max) in [
            ("alpha", self.alpha_min, self.alpha_max),
            ("size", self.size_min, self.size_max),
            ("speed", self.speed_min, self.speed_max),
        ] {
            if min > max {
                return Err(SnowfallError::InvalidRange {
                    field: field.to_string(),
                    min: min.into(),
                    max: max.into(),
                });
            }
        }
        for (field, value) in [("alpha_min", self.alpha_min), ("alpha_max", self.alpha_max)] {
            if !(0..=255).contains(&value) {
                return Err(out_of_range(field, 0.0, 255.0, value.into()));
            }
        }
        let max_size = f64::from(MAX_SNOWFLAKE_SIZE_DP);
        for (field, value) in [("size_min", self.size_min), ("size_max", self.size_max)] {
            if !(0..=MAX_SNOWFLAKE_SIZE_DP).contains(&value) {
                return Err(out_of_range(field, 0.0, max_size, value.into()));
            }
        }
        let max_speed = f64::from(MAX_SNOWFLAKE_SPEED);
        for (field, value) in [("speed_min", self.speed_min), ("speed_max", self.speed_max)] {
            if !(-MAX_SNOWFLAKE_SPEED..=MAX_SNOWFLAKE_SPEED).contains(&value) {
                return Err(out_of_range(field, -max_speed, max_speed, value.into()));
            }
        }
        if !(0..=MAX_SNOWFLAKE_ANGLE).contains(&self.angle_max) {
            let max_angle = f64::from(MAX_SNOWFLAKE_ANGLE);
            return Err(out_of_range("angle_max", 0.0, max_angle, self.angle_max.into()));
        }
        if !(self.density > 0.0) {
            return Err(out_of_range("density", f64::MIN_POSITIVE, f64::MAX, self.density.into()));
        }
        Ok(())
    }

    /// Convert density-independent pixels to device pixels
    pub fn dp_to_px(&self, dp: i32) -> i32 {
        (dp as f32 * self.density) as i32
    }

    pub fn size_min_px(&self) -> i32 {
        self.dp_to_px(self.size_min)
    }

    pub fn size_max_px(&self) -> i32 {
        self.dp_to_px(self.size_max)
    }

    pub fn paint_color(&self) -> Color {
        Color::from(self.color)
    }

    /// Serialize to the TOML layout `load` reads back
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".snowfall").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<toml::value::Table> {
        let content = std::fs::read_to_string(path)?;
        let table: toml::value::Table = toml::from_str(&content).map_err(|e| {
            SnowfallError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        log::debug!("Loaded snowfall config layer {}", path.display());
        Ok(table)
    }

    fn apply_env_overrides(&mut self) {
        macro_rules! env_override {
            ($field:ident, $key:expr) => {
                if let Ok(raw) = std::env::var($key) {
                    match raw.trim().parse() {
                        Ok(value) => self.$field = value,
                        Err(_) => log::warn!("Ignoring {}={:?}: not a valid value", $key, raw),
                    }
                }
            };
        }

        env_override!(snowflakes_num, "SNOWFALL_SNOWFLAKES_NUM");
        env_override!(alpha_min, "SNOWFALL_ALPHA_MIN");
        env_override!(alpha_max, "SNOWFALL_ALPHA_MAX");
        env_override!(angle_max, "SNOWFALL_ANGLE_MAX");
        env_override!(size_min, "SNOWFALL_SIZE_MIN");
        env_override!(size_max, "SNOWFALL_SIZE_MAX");
        env_override!(speed_min, "SNOWFALL_SPEED_MIN");
        env_override!(speed_max, "SNOWFALL_SPEED_MAX");
        env_override!(fading_enabled, "SNOWFALL_FADING_ENABLED");
        env_override!(already_falling, "SNOWFALL_ALREADY_FALLING");
        env_override!(density, "SNOWFALL_DENSITY");

        if let Ok(path) = std::env::var("SNOWFALL_IMAGE") {
            self.image = if path.is_empty() { None } else { Some(PathBuf::from(path)) };
        }
    }
}

fn out_of_range(field: &str, min: f64, max: f64, value: f64) -> SnowfallError {
    SnowfallError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value,
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_i32(v: &toml::Value, default: i32) -> i32 {
    v.as_integer()
        .map(|i| i.clamp(i32::MIN.into(), i32::MAX.into()) as i32)
        .or_else(|| v.as_float().map(|f| f as i32))
        .unwrap_or(default)
}

fn toml_rgb(v: &toml::Value, default: [u8; 3]) -> [u8; 3] {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 3 {
            let channel = |i: usize| {
                arr[i]
                    .as_integer()
                    .map(|c| c.clamp(0, 255) as u8)
                    .unwrap_or(default[i])
            };
            return [channel(0), channel(1), channel(2)];
        }
    }
    default
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("snowfall_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        std::fs::remove_file(path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn default_config_is_sane() {
        let config = SnowfallConfig::default();
        assert_eq!(config.snowflakes_num, 300);
        assert_eq!((config.alpha_min, config.alpha_max), (150, 250));
        assert_eq!(config.angle_max, 10);
        assert_eq!((config.size_min, config.size_max), (6, 20));
        assert_eq!((config.speed_min, config.speed_max), (2, 12));
        assert!(!config.fading_enabled);
        assert!(!config.already_falling);
        assert!(config.image.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r#"
snowflakes_num = 50
image = "flake.png"
alpha_min = 10
alpha_max = 200.0
fading_enabled = true
color = [200, 220, 255]
density = 2
"#;
        let table: toml::value::Table = toml::from_str(toml_str).unwrap();
        let config = SnowfallConfig::from_toml(&table);
        assert_eq!(config.snowflakes_num, 50);
        assert_eq!(config.image, Some(PathBuf::from("flake.png")));
        assert_eq!(config.alpha_min, 10);
        assert_eq!(config.alpha_max, 200);
        assert!(config.fading_enabled);
        assert_eq!(config.paint_color(), Color::rgb(200, 220, 255));
        assert!((config.density - 2.0).abs() < f32::EPSILON);
        // untouched keys keep their defaults
        assert_eq!(config.speed_max, DEFAULT_SNOWFLAKE_SPEED_MAX);
    }

    #[test]
    fn dp_conversion_truncates() {
        let config = SnowfallConfig {
            density: 1.5,
            ..SnowfallConfig::default()
        };
        assert_eq!(config.size_min_px(), 9);
        assert_eq!(config.size_max_px(), 30);
        assert_eq!(config.dp_to_px(3), 4);
    }

    #[test]
    fn validate_rejects_inverted_ranges() {
        let config = SnowfallConfig {
            size_min: 30,
            size_max: 10,
            ..SnowfallConfig::default()
        };
        match config.validate() {
            Err(SnowfallError::InvalidRange { field, min, max }) => {
                assert_eq!(field, "size");
                assert_eq!((min, max), (30, 10));
            }
            other => panic!("expected InvalidRange, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_bad_alpha_and_density() {
        let alpha = SnowfallConfig {
            alpha_max: 300,
            ..SnowfallConfig::default()
        };
        assert!(matches!(
            alpha.validate(),
            Err(SnowfallError::ValueOutOfRange { .. })
        ));

        let density = SnowfallConfig {
            density: 0.0,
            ..SnowfallConfig::default()
        };
        assert!(density.validate().is_err());
    }

    #[test]
    fn validate_rejects_extreme_speeds_and_sizes() {
        let speed = SnowfallConfig {
            speed_min: i32::MIN,
            speed_max: i32::MAX,
            ..SnowfallConfig::default()
        };
        match speed.validate() {
            Err(SnowfallError::ValueOutOfRange { field, .. }) => assert_eq!(field, "speed_min"),
            other => panic!("expected ValueOutOfRange, got {other:?}"),
        }

        let size = SnowfallConfig {
            size_max: i32::MAX,
            ..SnowfallConfig::default()
        };
        assert!(size.validate().is_err());

        let angle = SnowfallConfig {
            angle_max: 720,
            ..SnowfallConfig::default()
        };
        assert!(angle.validate().is_err());
    }

    #[test]
    fn equal_bounds_are_valid() {
        let config = SnowfallConfig {
            size_min: 8,
            size_max: 8,
            ..SnowfallConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        let path = temp_config("snowflakes_num = 12\nalready_falling = true\n");
        let config = SnowfallConfig::load_from_file(&path).unwrap();
        assert_eq!(config.snowflakes_num, 12);
        assert!(config.already_falling);
        cleanup(&path);
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let path = temp_config("snowflakes_num = [");
        let err = SnowfallConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, SnowfallError::ConfigError(_)));
        cleanup(&path);
    }

    #[test]
    fn test_layers_resolve_to_highest() {
        let global = temp_config("snowflakes_num = 1\nalpha_min = 11\nspeed_min = 1\n");
        let project = temp_config("snowflakes_num = 2\nalpha_min = 22\n");
        let explicit = temp_config("snowflakes_num = 3\n");

        let config = SnowfallConfig::load_layers(
            Some(global.as_path()),
            &project,
            Some(explicit.as_path()),
        )
        .unwrap();
        assert_eq!(config.snowflakes_num, 3);
        assert_eq!(config.alpha_min, 22);
        assert_eq!(config.speed_min, 1);
        // a key no layer sets keeps its default
        assert_eq!(config.alpha_max, DEFAULT_SNOWFLAKE_ALPHA_MAX);

        for path in [&global, &project, &explicit] {
            cleanup(path);
        }
    }

    #[test]
    fn test_missing_layers_are_skipped() {
        let missing =
            std::env::temp_dir().join(format!("snowfall_missing_{}", uuid::Uuid::new_v4()));
        let config = SnowfallConfig::load_layers(Some(missing.as_path()), &missing, None).unwrap();
        assert_eq!(config.snowflakes_num, DEFAULT_SNOWFLAKES_NUM);

        assert!(SnowfallConfig::load_layers(None, &missing, Some(missing.as_path())).is_err());
    }

    #[test]
    fn test_env_var_override() {
        let path = temp_config("angle_max = 5\n");
        std::env::set_var("SNOWFALL_ANGLE_MAX", "25");

        let config = SnowfallConfig::load_from_file(&path).unwrap();
        assert_eq!(config.angle_max, 25);

        std::env::remove_var("SNOWFALL_ANGLE_MAX");
        cleanup(&path);
    }

    #[test]
    fn toml_round_trip_through_table() {
        let config = SnowfallConfig {
            snowflakes_num: 42,
            speed_min: 1,
            ..SnowfallConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        let table: toml::value::Table = toml::from_str(&text).unwrap();
        assert_eq!(SnowfallConfig::from_toml(&table), config);
    }
}
