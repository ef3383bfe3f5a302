//! Window settings, loadable from TOML.
//!
//! ```toml
//! cell_width = 12
//! cell_height = 12
//! cell_margin = 2
//! caption = "Life"
//!
//! [colors]
//! alive = [0, 200, 0]
//! dead = [40, 40, 40]
//! ```
//!
//! Every key is optional; missing ones keep the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Upper bound for `cell_width`, `cell_height` and `cell_margin`.
pub const MAX_CELL_PIXELS: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const GRAY: Rgb = Rgb([50, 50, 50]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    pub fn r(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn b(self) -> u8 {
        self.0[2]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub background: Rgb,
    pub dead: Rgb,
    pub alive: Rgb,
    pub button: Rgb,
    pub label: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            dead: Rgb::GRAY,
            alive: Rgb::WHITE,
            button: Rgb::WHITE,
            label: Rgb::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels
    pub cell_height: u32,
    /// Gap between neighbouring cells in pixels
    pub cell_margin: u32,
    pub colors: Palette,
    /// Window title
    pub caption: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_width: 9,
            cell_height: 9,
            cell_margin: 1,
            colors: Palette::default(),
            caption: "Conway's Game of Life - Cellular Automaton".to_string(),
        }
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "cell size must be positive, got {}x{}",
                self.cell_width, self.cell_height
            )));
        }
        if self.cell_width > MAX_CELL_PIXELS
            || self.cell_height > MAX_CELL_PIXELS
            || self.cell_margin > MAX_CELL_PIXELS
        {
            return Err(ConfigError::Invalid(format!(
                "cell size and margin must be at most {MAX_CELL_PIXELS} pixels, got {}x{} with margin {}",
                self.cell_width, self.cell_height, self.cell_margin
            )));
        }
        Ok(())
    }
}

/// Pacing of the simulation loop; not part of the visual settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// Pause after each presented frame
    pub delay_ms: u64,
    /// Upper bound on frames per second
    pub fps_cap: u32,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self { delay_ms: 100, fps_cap: 60 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_keeps_defaults() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_override() {
        let settings = Settings::from_toml_str(
            "cell_width = 12\ncaption = \"Life\"\n[colors]\nalive = [0, 200, 0]\n",
        )
        .unwrap();
        assert_eq!(settings.cell_width, 12);
        assert_eq!(settings.cell_height, 9);
        assert_eq!(settings.caption, "Life");
        assert_eq!(settings.colors.alive, Rgb([0, 200, 0]));
        assert_eq!(settings.colors.dead, Rgb::GRAY);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Settings::from_toml_str("font = \"Arial\""),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn zero_cell_size_is_invalid() {
        assert!(matches!(
            Settings::from_toml_str("cell_height = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn oversized_cells_are_invalid() {
        assert!(matches!(
            Settings::from_toml_str("cell_width = 4000000000"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_toml_str("cell_margin = 1025"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(Settings::from_toml_str("cell_width = 1024\ncell_height = 1024").is_ok());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("here.toml"));
    }
}
