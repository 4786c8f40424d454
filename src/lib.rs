//! Contact lists to vCard QR codes.
//!
//! The core is a lenient bulk text parser that splits pasted contact lists
//! into [`ContactRecord`]s, plus the vCard serializer feeding the QR encoder.

pub mod config;
mod core;
pub mod error;
pub mod export;
pub mod render;

pub use config::{ErrorCorrection, RenderSettings, Settings};
pub use crate::core::{
    ContactRecord, DEFAULT_COUNTRY, DEFAULT_DIAL_PREFIX, Field, LineKind, ParserState,
    PhoneEntry, PhoneLabel, REGION_MARKER, REGIONS, RegionCatalog, RegionError, classify_line,
    normalize_number, parse, serialize,
};
pub use error::{ConfigError, Error, ExportError, RenderError};
pub use export::{BatchArchive, ExportFormat, Manifest, ManifestEntry, SkippedContact};
pub use render::{PayloadEncoder, QrEncoder};

use image::DynamicImage;

/// Serialize a contact and encode it as an image in one step.
pub fn render_contact<E: PayloadEncoder + ?Sized>(
    encoder: &E,
    record: &ContactRecord,
    dial_prefix: Option<&str>,
    settings: &RenderSettings,
) -> Result<DynamicImage, RenderError> {
    encoder.encode(&serialize(record, dial_prefix), settings)
}
