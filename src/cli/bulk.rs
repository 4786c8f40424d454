//! Bulk list commands (`qrcard bulk ...`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use qrcard::config::BULK_SIZE;
use qrcard::export::{archive_name, write_single};
use qrcard::{BatchArchive, ContactRecord, QrEncoder, Settings, parse, serialize};
use tracing::info;

use crate::cli::common::{DialArgs, InputArgs, RenderArgs};
use crate::cli::utils::{ensure_parent, read_text_arg, resolve_output_file};

/// Supported `qrcard bulk` subcommands.
#[derive(Subcommand, Debug)]
pub enum BulkCommand {
    /// Parse pasted text and preview the detected contacts.
    Parse(BulkParseArgs),
    /// Render every detected contact and bundle the images.
    Export(BulkExportArgs),
}

/// Arguments for `qrcard bulk parse`.
#[derive(Args, Debug)]
pub struct BulkParseArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Print the records as JSON.
    #[arg(long, conflicts_with = "payloads")]
    pub json: bool,
    /// Print the vCard payload of each record.
    #[arg(long)]
    pub payloads: bool,
    #[command(flatten)]
    pub dial: DialArgs,
}

/// Arguments for `qrcard bulk export`.
#[derive(Args, Debug)]
pub struct BulkExportArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// ZIP file to write, or directory receiving `Batch_QRs_<FORMAT>.zip`.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Write loose image files into the output directory instead of a ZIP.
    #[arg(long)]
    pub dir: bool,
    #[command(flatten)]
    pub dial: DialArgs,
    #[command(flatten)]
    pub render: RenderArgs,
}

/// Execute a bulk command.
pub fn handle(command: BulkCommand, settings: Settings) -> Result<()> {
    match command {
        BulkCommand::Parse(args) => preview(args, settings),
        BulkCommand::Export(args) => export(args, settings),
    }
}

fn preview(args: BulkParseArgs, mut settings: Settings) -> Result<()> {
    args.dial.apply(&mut settings);
    let text = read_text_arg(args.input.text, args.input.from)?;
    let records = parse(&text);

    if args.json {
        let json =
            serde_json::to_string_pretty(&records).context("failed to serialize records")?;
        println!("{}", json);
        return Ok(());
    }

    println!("{} Results", records.len());
    for (idx, record) in records.iter().enumerate() {
        println!("{:>4}. {}", idx + 1, summary_line(record));
        if args.payloads {
            println!("{}\n", serialize(record, settings.dial_prefix()));
        }
    }
    Ok(())
}

fn export(args: BulkExportArgs, mut settings: Settings) -> Result<()> {
    args.dial.apply(&mut settings);
    args.render.apply(&mut settings);
    let render = settings
        .render_settings(BULK_SIZE)
        .context("invalid render settings")?;

    let text = read_text_arg(args.input.text, args.input.from)?;
    let records = parse(&text);
    if records.is_empty() {
        bail!("no contacts found in input");
    }

    let encoder = QrEncoder::new();
    let (archive, skipped) = BatchArchive::render_all(
        &encoder,
        &records,
        settings.dial_prefix(),
        &render,
        settings.format,
    );
    for skip in &skipped {
        eprintln!(
            "warning: contact {} ({}) skipped: {}",
            skip.index + 1,
            skip.name,
            skip.reason
        );
    }
    if archive.is_empty() {
        bail!("none of the {} contacts could be rendered", records.len());
    }

    if args.dir {
        fs::create_dir_all(&args.output).with_context(|| {
            format!("failed to create output directory {}", args.output.display())
        })?;
        for (name, bytes) in archive.files() {
            let target = args.output.join(name);
            write_single(&target, bytes)
                .with_context(|| format!("failed to write {}", target.display()))?;
        }
        println!(
            "Rendered {} QR image(s) into {}",
            archive.len(),
            args.output.display()
        );
        return Ok(());
    }

    let target = resolve_output_file(&args.output, &["zip"], &archive_name(settings.format));
    ensure_parent(&target)?;
    archive
        .save(&target)
        .with_context(|| format!("failed to write archive {}", target.display()))?;
    info!(path = %target.display(), images = archive.len(), "archive written");
    println!(
        "Bundled {} QR image(s) into {}",
        archive.len(),
        target.display()
    );
    Ok(())
}

fn summary_line(record: &ContactRecord) -> String {
    let company = if record.company.is_empty() {
        "No Company"
    } else {
        record.company.as_str()
    };
    format!(
        "{} | {} | {} | {} phone(s)",
        record.display_name(),
        company,
        record.region,
        record.phones.len()
    )
}
