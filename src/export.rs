//! Image encoding, file naming and ZIP bundles for generated codes.

use std::collections::HashSet;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::config::RenderSettings;
use crate::core::contact::ContactRecord;
use crate::core::payload::serialize;
use crate::error::{Error, ExportError};
use crate::render::PayloadEncoder;

/// Folder inside the archive that holds the images.
pub const ARCHIVE_FOLDER: &str = "QR_Codes";
pub const MANIFEST_NAME: &str = "manifest.json";

/// Raster format of exported images.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    /// Format implied by a file extension (`png`, `jpg`, `jpeg`; any case).
    pub fn from_extension(ext: &str) -> Option<ExportFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            _ => None,
        }
    }

    fn image_format(&self) -> image::ImageFormat {
        match self {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encode an image into PNG or JPEG bytes. JPEG drops the alpha channel.
pub fn encode_image(image: &DynamicImage, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Cursor::new(Vec::new());
    match format {
        ExportFormat::Png => image.write_to(&mut buffer, format.image_format())?,
        ExportFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8())
            .write_to(&mut buffer, format.image_format())?,
    }
    Ok(buffer.into_inner())
}

/// `First_Last_Region.ext`, as used inside batch archives.
pub fn bulk_file_name(record: &ContactRecord, format: ExportFormat) -> String {
    format!(
        "{}_{}_{}.{}",
        sanitize(&record.first_name),
        sanitize(&record.last_name),
        sanitize(&record.region),
        format.extension()
    )
}

/// `First_QR.ext`, as used for a single download.
pub fn single_file_name(record: &ContactRecord, format: ExportFormat) -> String {
    format!("{}_QR.{}", sanitize(&record.first_name), format.extension())
}

/// `Batch_QRs_PNG.zip` / `Batch_QRs_JPEG.zip`.
pub fn archive_name(format: ExportFormat) -> String {
    format!(
        "Batch_QRs_{}.zip",
        format.extension().to_ascii_uppercase()
    )
}

fn sanitize(component: &str) -> String {
    component
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect()
}

/// Write one image file, creating parent directories as needed.
pub fn write_single(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ExportError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize, render and encode one contact.
pub fn render_contact_bytes<E: PayloadEncoder + ?Sized>(
    encoder: &E,
    record: &ContactRecord,
    dial_prefix: Option<&str>,
    settings: &RenderSettings,
    format: ExportFormat,
) -> Result<Vec<u8>, Error> {
    let payload = serialize(record, dial_prefix);
    let image = encoder.encode(&payload, settings)?;
    Ok(encode_image(&image, format)?)
}

/// Manifest line describing one archived image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub file_name: String,
    pub contact: String,
    pub region: String,
    pub bytes: usize,
    pub sha256: String,
}

/// Summary written as `manifest.json` next to the images.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub format: ExportFormat,
    pub entries: Vec<ManifestEntry>,
}

/// Contact that could not be rendered during a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedContact {
    /// Zero-based position in the parsed batch.
    pub index: usize,
    pub name: String,
    pub reason: String,
}

/// In-memory bundle of rendered images awaiting download.
#[derive(Debug, Clone)]
pub struct BatchArchive {
    format: ExportFormat,
    files: Vec<(ManifestEntry, Vec<u8>)>,
    used_names: HashSet<String>,
}

impl BatchArchive {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            files: Vec::new(),
            used_names: HashSet::new(),
        }
    }

    /// Render every record; failures are logged and reported, not fatal.
    pub fn render_all<E: PayloadEncoder + ?Sized>(
        encoder: &E,
        records: &[ContactRecord],
        dial_prefix: Option<&str>,
        settings: &RenderSettings,
        format: ExportFormat,
    ) -> (Self, Vec<SkippedContact>) {
        let mut archive = Self::new(format);
        let mut skipped = Vec::new();
        for (index, record) in records.iter().enumerate() {
            match render_contact_bytes(encoder, record, dial_prefix, settings, format) {
                Ok(bytes) => {
                    archive.add(record, bytes);
                }
                Err(err) => {
                    warn!(index, name = %record.display_name(), error = %err, "skipping contact");
                    skipped.push(SkippedContact {
                        index,
                        name: record.display_name(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        info!(
            encoder = encoder.name(),
            rendered = archive.len(),
            skipped = skipped.len(),
            "batch rendered"
        );
        (archive, skipped)
    }

    /// Add an image for `record`, returning the file name it was stored under.
    pub fn add(&mut self, record: &ContactRecord, bytes: Vec<u8>) -> &str {
        let file_name = self.unique_name(bulk_file_name(record, self.format));
        let entry = ManifestEntry {
            file_name,
            contact: record.display_name(),
            region: record.region.clone(),
            bytes: bytes.len(),
            sha256: format!("{:x}", Sha256::digest(&bytes)),
        };
        self.files.push((entry, bytes));
        &self.files[self.files.len() - 1].0.file_name
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Stored images as `(file name, bytes)` pairs.
    pub fn files(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files
            .iter()
            .map(|(entry, bytes)| (entry.file_name.as_str(), bytes.as_slice()))
    }

    pub fn manifest(&self) -> Manifest {
        Manifest {
            generated_at: Utc::now(),
            format: self.format,
            entries: self.files.iter().map(|(entry, _)| entry.clone()).collect(),
        }
    }

    /// Write the ZIP bundle and hand the writer back.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W, ExportError> {
        let mut zip = zip::ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (entry, bytes) in &self.files {
            zip.start_file(format!("{}/{}", ARCHIVE_FOLDER, entry.file_name), options)?;
            zip.write_all(bytes)?;
        }
        zip.start_file(MANIFEST_NAME, options)?;
        serde_json::to_writer_pretty(&mut zip, &self.manifest())?;

        Ok(zip.finish()?)
    }

    /// Write the bundle to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = self.write_to(BufWriter::new(file))?;
        writer.flush()?;
        Ok(())
    }

    fn unique_name(&mut self, candidate: String) -> String {
        let mut name = candidate.clone();
        let mut counter = 2;
        while self.used_names.contains(&name) {
            name = match candidate.rsplit_once('.') {
                Some((stem, ext)) => format!("{stem}_{counter}.{ext}"),
                None => format!("{candidate}_{counter}"),
            };
            counter += 1;
        }
        self.used_names.insert(name.clone());
        name
    }
}
