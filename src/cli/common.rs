//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use qrcard::{ErrorCorrection, ExportFormat, Settings};

/// Image formats accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FormatArg {
    Png,
    #[value(alias = "jpg")]
    Jpeg,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> ExportFormat {
        match value {
            FormatArg::Png => ExportFormat::Png,
            FormatArg::Jpeg => ExportFormat::Jpeg,
        }
    }
}

/// QR error-correction levels.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ErrorCorrectionArg {
    #[value(alias = "l")]
    Low,
    #[value(alias = "m")]
    Medium,
    #[value(alias = "q")]
    Quartile,
    #[value(alias = "h")]
    High,
}

impl From<ErrorCorrectionArg> for ErrorCorrection {
    fn from(value: ErrorCorrectionArg) -> ErrorCorrection {
        match value {
            ErrorCorrectionArg::Low => ErrorCorrection::Low,
            ErrorCorrectionArg::Medium => ErrorCorrection::Medium,
            ErrorCorrectionArg::Quartile => ErrorCorrection::Quartile,
            ErrorCorrectionArg::High => ErrorCorrection::High,
        }
    }
}

/// Where raw contact text comes from.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Inline contact text (falls back to stdin if omitted).
    #[arg(long)]
    pub text: Option<String>,
    /// Read contact text from file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
}

/// Phone number rewriting flags.
#[derive(Args, Debug)]
pub struct DialArgs {
    /// Prefix replacing a leading 0 in phone numbers (e.g. +255).
    #[arg(long = "dial-prefix", conflicts_with = "no_dial_prefix")]
    pub dial_prefix: Option<String>,
    /// Keep phone numbers exactly as typed.
    #[arg(long = "no-dial-prefix")]
    pub no_dial_prefix: bool,
}

impl DialArgs {
    pub fn apply(&self, settings: &mut Settings) {
        if self.no_dial_prefix {
            settings.dial_prefix = None;
        } else if let Some(prefix) = &self.dial_prefix {
            settings.dial_prefix = Some(prefix.clone());
        }
    }
}

/// Visual flags layered over the settings file.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Module color, hex (#1e293b).
    #[arg(long = "fg")]
    pub foreground: Option<String>,
    /// Background color, hex (#ffffff).
    #[arg(long = "bg")]
    pub background: Option<String>,
    /// Error-correction level.
    #[arg(long = "ec", value_enum)]
    pub error_correction: Option<ErrorCorrectionArg>,
    /// Image edge in pixels.
    #[arg(long)]
    pub size: Option<u32>,
    /// Margin around the code, in modules.
    #[arg(long = "quiet-zone")]
    pub quiet_zone: Option<u32>,
    /// Output image format.
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

impl RenderArgs {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(fg) = &self.foreground {
            settings.foreground = fg.clone();
        }
        if let Some(bg) = &self.background {
            settings.background = bg.clone();
        }
        if let Some(level) = self.error_correction {
            settings.error_correction = level.into();
        }
        if let Some(size) = self.size {
            settings.size = Some(size);
        }
        if let Some(quiet_zone) = self.quiet_zone {
            settings.quiet_zone = quiet_zone;
        }
        if let Some(format) = self.format {
            settings.format = format.into();
        }
    }
}
