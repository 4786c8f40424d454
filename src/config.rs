//! User settings: colors, QR error correction, sizes, dial prefix, format.
//!
//! Settings come from an optional JSON file; every field may be omitted and
//! falls back to the defaults below. The CLI layers its flags on top.

use std::fs;
use std::path::Path;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::core::payload::DEFAULT_DIAL_PREFIX;
use crate::error::ConfigError;
use crate::export::ExportFormat;

pub const DEFAULT_FOREGROUND: &str = "#1e293b";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";
/// Edge length used for a single contact preview.
pub const SINGLE_SIZE: u32 = 220;
/// Edge length used for each code of a bulk batch.
pub const BULK_SIZE: u32 = 100;
pub const DEFAULT_QUIET_ZONE: u32 = 4;
const MIN_SIZE: u32 = 21;
const MAX_SIZE: u32 = 4096;

/// QR error-correction level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    #[default]
    Low,
    Medium,
    Quartile,
    High,
}

/// Settings as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub foreground: String,
    pub background: String,
    pub error_correction: ErrorCorrection,
    /// Image edge in pixels; unset means the flow's own default.
    pub size: Option<u32>,
    /// Margin around the symbol, in modules.
    pub quiet_zone: u32,
    /// Replaces a leading `0` in phone numbers; `null` keeps numbers as typed.
    pub dial_prefix: Option<String>,
    pub format: ExportFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            foreground: DEFAULT_FOREGROUND.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            error_correction: ErrorCorrection::default(),
            size: None,
            quiet_zone: DEFAULT_QUIET_ZONE,
            dial_prefix: Some(DEFAULT_DIAL_PREFIX.to_string()),
            format: ExportFormat::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolve colors and sizes; `fallback_size` applies when no size is set.
    pub fn render_settings(&self, fallback_size: u32) -> Result<RenderSettings, ConfigError> {
        Ok(RenderSettings {
            foreground: parse_hex_color(&self.foreground)?,
            background: parse_hex_color(&self.background)?,
            error_correction: self.error_correction,
            size: self.size.unwrap_or(fallback_size).clamp(MIN_SIZE, MAX_SIZE),
            quiet_zone: self.quiet_zone.min(16),
        })
    }

    pub fn dial_prefix(&self) -> Option<&str> {
        self.dial_prefix.as_deref()
    }
}

/// Visual parameters handed to a payload encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub foreground: Rgba<u8>,
    pub background: Rgba<u8>,
    pub error_correction: ErrorCorrection,
    pub size: u32,
    pub quiet_zone: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            foreground: Rgba([0x1e, 0x29, 0x3b, 0xff]),
            background: Rgba([0xff, 0xff, 0xff, 0xff]),
            error_correction: ErrorCorrection::Low,
            size: SINGLE_SIZE,
            quiet_zone: DEFAULT_QUIET_ZONE,
        }
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
pub fn parse_hex_color(input: &str) -> Result<Rgba<u8>, ConfigError> {
    let invalid = || ConfigError::InvalidColor(input.to_string());
    let hex = input.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let mut out = [0xffu8; 4];
            for (i, c) in hex.chars().enumerate() {
                let nibble = channel(&c.to_string())?;
                out[i] = nibble * 17;
            }
            Ok(Rgba(out))
        }
        6 | 8 => {
            let mut out = [0xffu8; 4];
            for i in 0..hex.len() / 2 {
                out[i] = channel(&hex[i * 2..i * 2 + 2])?;
            }
            Ok(Rgba(out))
        }
        _ => Err(invalid()),
    }
}
