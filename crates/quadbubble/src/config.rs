use crate::error::MenuError;
use crate::geometry::{
    DEFAULT_ITEM_RADIUS_DP, DEFAULT_ITEM_SPACING_DP, DEFAULT_MIN_AXIS_DISTANCE_DP,
    MenuGeometryConfig,
};
use crate::menu::MenuOptions;
use crate::model::default_placeholder;
use crate::quadrant::{Quadrant, ReadingDirection};
use directories::ProjectDirs;
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// `#rrggbb` color as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn to_srgba(self) -> Srgba<f64> {
        let rgb: Srgb<f64> = self.0.into_format();
        Srgba::new(rgb.red, rgb.green, rgb.blue, 1.0)
    }
}

impl FromStr for HexColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::from_str(s.trim())
            .map(Self)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

impl Serialize for HexColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Menu settings in density independent pixels.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    pub item_radius: f64,
    pub item_spacing: f64,
    pub min_axis_distance: f64,
    pub quadrant: Quadrant,
    pub reading_direction: Option<ReadingDirection>,
    pub axis_background: Option<HexColor>,
    pub placeholder: Option<HexColor>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            item_radius: DEFAULT_ITEM_RADIUS_DP,
            item_spacing: DEFAULT_ITEM_SPACING_DP,
            min_axis_distance: DEFAULT_MIN_AXIS_DISTANCE_DP,
            quadrant: Quadrant::default(),
            reading_direction: None,
            axis_background: None,
            placeholder: None,
        }
    }
}

impl MenuConfig {
    /// Scales to device pixels and validates the geometry. A reading
    /// direction in the file wins over `fallback_direction`.
    pub fn options(
        &self,
        density: f64,
        fallback_direction: ReadingDirection,
    ) -> Result<MenuOptions, ConfigError> {
        let geometry = MenuGeometryConfig::from_dp(
            self.item_radius,
            self.item_spacing,
            self.min_axis_distance,
            density,
        )?;

        Ok(MenuOptions {
            geometry,
            quadrant: self.quadrant,
            reading_direction: self.reading_direction.unwrap_or(fallback_direction),
            axis_background: self
                .axis_background
                .map(HexColor::to_srgba)
                .unwrap_or_else(default_placeholder),
            placeholder: self
                .placeholder
                .map(HexColor::to_srgba)
                .unwrap_or_else(default_placeholder),
        })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
    #[error(transparent)]
    Menu(#[from] MenuError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "ubux", "quadbubble").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<MenuConfig, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("QUADBUBBLE"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> MenuConfig {
    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        MenuConfig::default()
    })
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
