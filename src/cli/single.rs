//! Single contact commands (`qrcard single ...`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use qrcard::config::SINGLE_SIZE;
use qrcard::export::{encode_image, single_file_name, write_single};
use qrcard::{
    ContactRecord, DEFAULT_COUNTRY, ExportFormat, PhoneEntry, PhoneLabel, QrEncoder, RegionCatalog, Settings,
    render_contact, serialize,
};

use crate::cli::common::{DialArgs, RenderArgs};
use crate::cli::utils::resolve_output_file;

/// Supported `qrcard single` subcommands.
#[derive(Subcommand, Debug)]
pub enum SingleCommand {
    /// Print the vCard payload for one contact.
    Payload(SinglePayloadArgs),
    /// Render one contact to an image file.
    Export(SingleExportArgs),
}

/// Contact fields for the single-entry flow.
#[derive(Args, Debug)]
pub struct ContactArgs {
    #[arg(long = "first-name", default_value = "")]
    pub first_name: String,
    #[arg(long = "last-name", default_value = "")]
    pub last_name: String,
    #[arg(long, default_value = "")]
    pub company: String,
    #[arg(long = "job-title", default_value = "")]
    pub job_title: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub website: String,
    #[arg(long, default_value = "")]
    pub street: String,
    /// Region from the catalog (see `qrcard regions list`).
    #[arg(long, default_value = RegionCatalog::default_region(), value_parser = parse_region)]
    pub region: String,
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    pub country: String,
    /// Phone as NUMBER or NUMBER:LABEL (CELL, WORK, HOME, FAX); repeatable.
    #[arg(long = "phone", value_parser = parse_phone)]
    pub phones: Vec<PhoneEntry>,
}

impl From<ContactArgs> for ContactRecord {
    fn from(args: ContactArgs) -> ContactRecord {
        ContactRecord {
            first_name: args.first_name,
            last_name: args.last_name,
            company: args.company,
            job_title: args.job_title,
            email: args.email,
            website: args.website,
            street: args.street,
            region: args.region,
            country: args.country,
            phones: args.phones,
        }
    }
}

/// Arguments for `qrcard single payload`.
#[derive(Args, Debug)]
pub struct SinglePayloadArgs {
    #[command(flatten)]
    pub contact: ContactArgs,
    #[command(flatten)]
    pub dial: DialArgs,
}

/// Arguments for `qrcard single export`.
#[derive(Args, Debug)]
pub struct SingleExportArgs {
    #[command(flatten)]
    pub contact: ContactArgs,
    /// Image file to write, or directory receiving `<First>_QR.<ext>`.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    #[command(flatten)]
    pub dial: DialArgs,
    #[command(flatten)]
    pub render: RenderArgs,
}

/// Execute a single-contact command.
pub fn handle(command: SingleCommand, settings: Settings) -> Result<()> {
    match command {
        SingleCommand::Payload(args) => payload(args, settings),
        SingleCommand::Export(args) => export(args, settings),
    }
}

fn payload(args: SinglePayloadArgs, mut settings: Settings) -> Result<()> {
    args.dial.apply(&mut settings);
    let record = ContactRecord::from(args.contact);
    println!("{}", serialize(&record, settings.dial_prefix()));
    Ok(())
}

fn export(args: SingleExportArgs, mut settings: Settings) -> Result<()> {
    args.dial.apply(&mut settings);
    args.render.apply(&mut settings);
    settings.format = output_format(
        &args.output,
        args.render.format.map(ExportFormat::from),
        settings.format,
    )?;
    let render = settings
        .render_settings(SINGLE_SIZE)
        .context("invalid render settings")?;

    let record = ContactRecord::from(args.contact);
    let image = render_contact(&QrEncoder::new(), &record, settings.dial_prefix(), &render)
        .context("failed to render QR code")?;
    let bytes = encode_image(&image, settings.format)?;

    let target = resolve_output_file(
        &args.output,
        &["png", "jpg", "jpeg"],
        &single_file_name(&record, settings.format),
    );
    write_single(&target, &bytes)?;
    println!(
        "Rendered {}x{} QR image to {}",
        image.width(),
        image.height(),
        target.display()
    );
    Ok(())
}

/// An image extension on `output` decides the format unless `--format`
/// contradicts it; otherwise the flag or the settings file decide.
fn output_format(
    output: &Path,
    requested: Option<ExportFormat>,
    configured: ExportFormat,
) -> Result<ExportFormat> {
    let implied = if output.is_dir() {
        None
    } else {
        output
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ExportFormat::from_extension)
    };
    match (implied, requested) {
        (Some(implied), Some(requested)) if implied != requested => bail!(
            "--format {} conflicts with output file {}",
            requested,
            output.display()
        ),
        (Some(implied), _) => Ok(implied),
        (None, requested) => Ok(requested.unwrap_or(configured)),
    }
}

/// Clap value parser restricting regions to the catalog.
fn parse_region(input: &str) -> Result<String, String> {
    RegionCatalog::resolve(input)
        .map(str::to_string)
        .map_err(|err| err.to_string())
}

/// Clap value parser for `NUMBER[:LABEL]`.
fn parse_phone(input: &str) -> Result<PhoneEntry, String> {
    let (number, label) = match input.rsplit_once(':') {
        Some((number, label)) => (number, label.parse::<PhoneLabel>()?),
        None => (input, PhoneLabel::Cell),
    };
    let number = number.trim();
    if number.is_empty() {
        return Err("phone number cannot be empty".to_string());
    }
    Ok(PhoneEntry::new(number, label))
}
