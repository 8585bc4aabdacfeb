//! # qj-config: quick-jump settings file
//!
//! Settings live in a TOML file, by default
//! `<config dir>/quick-jump/config.toml`. Every key is optional; a missing key
//! or a missing file means the built-in default.
//!
//! ```toml
//! alphabet = "hklyuiopnm,qwertzxcvbasdgjf;0123456789/"
//! max_columns = 500
//! jump_before_anchor = false
//! dim_color = "#777777"
//! block_label_color = "#ffb400"
//! word_label_color = "#ff0000"
//! ```
//!
//! [`Settings`] is the raw, serde-facing form. Nothing in it is trusted until
//! [`Settings::jump_config`] and [`Settings::palette`] have validated it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use qj_core::{
    ConfigError, DEFAULT_ALPHABET, DEFAULT_MAX_COLUMNS, DEFAULT_PATTERN, JumpConfig, Tier,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Directory under the platform config dir.
pub const APP_DIR: &str = "quick-jump";

/// File name inside [`APP_DIR`].
pub const FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to write config file at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),

    #[error("{field}: {value:?} is not a colour (expected #rrggbb or #rgb)")]
    Colour { field: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

/// A 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Error of [`Rgb::from_str`]; carries no detail, the caller knows the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadColour;

impl FromStr for Rgb {
    type Err = BadColour;

    /// Accepts `#rrggbb` and `#rgb`, with or without the `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(BadColour);
        }
        let byte = |h: &str| u8::from_str_radix(h, 16).map_err(|_| BadColour);
        match hex.len() {
            6 => Ok(Self::new(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
            3 => {
                // #abc is #aabbcc
                let nibble = |i: usize| byte(&hex[i..=i]).map(|v| v * 0x11);
                Ok(Self::new(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            _ => Err(BadColour),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The three colours a host paints a jump with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Text of every scanned region while the jump is active.
    pub dim: Rgb,
    pub block_label: Rgb,
    pub word_label: Rgb,
}

impl Palette {
    /// Label colour for `tier`.
    #[inline]
    #[must_use]
    pub const fn label(&self, tier: Tier) -> Rgb {
        match tier {
            Tier::Block => self.block_label,
            Tier::Word => self.word_label,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dim: Rgb::new(0x77, 0x77, 0x77),
            block_label: Rgb::new(0xff, 0xb4, 0x00),
            word_label: Rgb::new(0xff, 0x00, 0x00),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Label chars, in assignment order.
    pub alphabet: String,
    /// Target regex; the first participating capture group marks the target.
    pub pattern: String,
    pub max_columns: i64,
    pub jump_before_anchor: bool,
    pub dim_color: String,
    pub block_label_color: String,
    pub word_label_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            pattern: DEFAULT_PATTERN.to_string(),
            max_columns: i64::try_from(DEFAULT_MAX_COLUMNS).unwrap_or(i64::MAX),
            jump_before_anchor: false,
            dim_color: palette.dim.to_string(),
            block_label_color: palette.block_label.to_string(),
            word_label_color: palette.word_label.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from `config_path`. `Ok(None)` when the file does not
    /// exist.
    ///
    /// # Errors
    ///
    /// The file exists but cannot be read or is not valid TOML for
    /// [`Settings`]. Values are not validated here.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, SettingsError> {
        let path = config_path.as_ref();
        if !path.exists() {
            debug!("no config file at {}", path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded settings from {}", path.display());
        Ok(Some(settings))
    }

    /// Read settings from the default location.
    ///
    /// # Errors
    ///
    /// See [`load_from_path`](Self::load_from_path).
    pub fn load() -> Result<Option<Self>, SettingsError> {
        match Self::config_path() {
            Some(path) => Self::load_from_path(path),
            None => Ok(None),
        }
    }

    /// Like [`load_from_path`](Self::load_from_path) but a missing file
    /// yields the defaults.
    ///
    /// # Errors
    ///
    /// See [`load_from_path`](Self::load_from_path).
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self, SettingsError> {
        let loaded = match config_path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load()?,
        };
        Ok(loaded.unwrap_or_default())
    }

    /// Write these settings as pretty TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Directory creation or the write itself failed.
    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> Result<(), SettingsError> {
        let path = config_path.as_ref();
        let write_err = |source: std::io::Error| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(write_err)?;
        Ok(())
    }

    /// `<config dir>/quick-jump/config.toml`, if the platform has a config
    /// dir.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Validate the jump-related keys.
    ///
    /// # Errors
    ///
    /// Empty or repeating alphabet, a pattern that does not compile, or a
    /// non-positive `max_columns`.
    pub fn jump_config(&self) -> Result<JumpConfig, ConfigError> {
        JumpConfig::new(
            &self.alphabet,
            &self.pattern,
            self.max_columns,
            self.jump_before_anchor,
        )
    }

    /// Parse the three colour keys.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Colour`] naming the first malformed key.
    pub fn palette(&self) -> Result<Palette, SettingsError> {
        let parse = |field: &'static str, value: &str| {
            value.parse::<Rgb>().map_err(|BadColour| SettingsError::Colour {
                field,
                value: value.to_string(),
            })
        };
        Ok(Palette {
            dim: parse("dim_color", &self.dim_color)?,
            block_label: parse("block_label_color", &self.block_label_color)?,
            word_label: parse("word_label_color", &self.word_label_color)?,
        })
    }

    /// Validate everything at once.
    ///
    /// # Errors
    ///
    /// The first invalid key, jump keys before colours.
    pub fn validate(&self) -> Result<(JumpConfig, Palette), SettingsError> {
        Ok((self.jump_config()?, self.palette()?))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
