//! Rendering helpers for producing QR images from card payloads.

mod paint;

pub use paint::{ModuleLayout, PayloadEncoder, QrEncoder, paint_modules};
