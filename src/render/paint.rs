use image::{DynamicImage, ImageBuffer, Rgba};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use qrcode::{Color as Module, EcLevel, QrCode};

use crate::config::{ErrorCorrection, RenderSettings};
use crate::error::RenderError;

/// Turns a payload string into a scannable image.
pub trait PayloadEncoder {
    fn name(&self) -> &'static str;
    fn encode(&self, payload: &str, settings: &RenderSettings)
    -> Result<DynamicImage, RenderError>;
}

/// QR Code encoder backed by the `qrcode` matrix builder.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrEncoder;

impl QrEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl PayloadEncoder for QrEncoder {
    fn name(&self) -> &'static str {
        "QR"
    }

    fn encode(
        &self,
        payload: &str,
        settings: &RenderSettings,
    ) -> Result<DynamicImage, RenderError> {
        let code = QrCode::with_error_correction_level(
            payload.as_bytes(),
            ec_level(settings.error_correction),
        )
        .map_err(|err| RenderError::Encode(err.to_string()))?;
        let width = code.width() as u32;
        Ok(paint_modules(&code.to_colors(), width, settings))
    }
}

/// Pixel geometry of a square module grid inside the output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleLayout {
    /// Pixels per module edge.
    pub scale: u32,
    /// Output image edge.
    pub edge: u32,
    /// Pixel offset of the first (top-left) module.
    pub origin: u32,
}

impl ModuleLayout {
    /// Fit `modules` plus the quiet zone into at least `settings.size` pixels.
    pub fn fit(modules: u32, settings: &RenderSettings) -> Self {
        let span = modules + 2 * settings.quiet_zone;
        let scale = (settings.size / span.max(1)).max(1);
        let edge = (span * scale).max(settings.size);
        let origin = (edge - span * scale) / 2 + settings.quiet_zone * scale;
        Self {
            scale,
            edge,
            origin,
        }
    }
}

/// Paint a row-major module grid `width` modules wide.
pub fn paint_modules(modules: &[Module], width: u32, settings: &RenderSettings) -> DynamicImage {
    let layout = ModuleLayout::fit(width, settings);
    let mut img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(layout.edge, layout.edge, settings.background);

    for (idx, module) in modules.iter().enumerate() {
        if *module != Module::Dark {
            continue;
        }
        let x = idx as u32 % width.max(1);
        let y = idx as u32 / width.max(1);
        let px = (layout.origin + x * layout.scale) as i32;
        let py = (layout.origin + y * layout.scale) as i32;
        draw_filled_rect_mut(
            &mut img,
            Rect::at(px, py).of_size(layout.scale, layout.scale),
            settings.foreground,
        );
    }

    DynamicImage::ImageRgba8(img)
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::Low => EcLevel::L,
        ErrorCorrection::Medium => EcLevel::M,
        ErrorCorrection::Quartile => EcLevel::Q,
        ErrorCorrection::High => EcLevel::H,
    }
}
