use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arcwire_tools::{decode_kind, inspect_frames, parse_u64, ArchiveKind, FrameReport};
use clap::{Parser, Subcommand, ValueEnum};
use codec::CodecLimits;
use glob::Pattern;
use schema::{checked_property_hash, checked_property_unhash, IdentityTable};
use tracing_subscriber::EnvFilter;
use wire::{GameMessage, Limits};

#[derive(Parser)]
#[command(
    name = "arcwire-tools",
    version,
    about = "arcwire capture inspection and decoding tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the message envelopes in a capture file or directory.
    Frames {
        /// Path to a capture file or a directory of captures.
        path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected captures.
        #[arg(long, value_enum)]
        sort: Option<FrameSort>,
        /// Limit the number of inspected captures (after sorting).
        #[arg(long)]
        limit: Option<usize>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Decode one archive payload.
    Decode {
        /// Archive type stored in the file.
        #[arg(value_enum)]
        kind: ArchiveKind,
        /// Path to the archive bytes.
        file: PathBuf,
        /// The file holds a whole envelope rather than a bare payload.
        #[arg(long)]
        framed: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Run the power property hash transform.
    Property {
        #[arg(value_enum)]
        op: PropertyOp,
        /// Decimal or 0x-prefixed value.
        value: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FrameSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PropertyOp {
    Hash,
    Unhash,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Frames {
            path,
            glob,
            sort,
            limit,
            format,
        } => {
            if path.is_dir() {
                let entries = collect_capture_entries(&path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|FrameSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    print_frames(&entry.path, format)?;
                }
            } else {
                print_frames(&path, format)?;
            }
        }
        Command::Decode {
            kind,
            file,
            framed,
            format,
        } => {
            let bytes =
                fs::read(&file).with_context(|| format!("read archive {}", file.display()))?;
            let payload = if framed {
                let message = GameMessage::from_bytes(&bytes, &Limits::default())
                    .context("unframe message")?;
                tracing::info!(id = message.id, len = message.payload.len(), "unframed message");
                message.payload
            } else {
                bytes
            };
            let decoded = decode_kind(kind, &payload, &IdentityTable, &CodecLimits::default())
                .with_context(|| format!("decode {kind:?} archive"))?;
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&decoded).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => {
                    println!("{} ({} bytes)", decoded.kind, decoded.size);
                    if let Some(policy) = decoded.policy {
                        println!("policy: {policy:?}");
                    }
                    println!("{}", decoded.debug);
                }
            }
        }
        Command::Property { op, value } => {
            let value = parse_u64(&value).with_context(|| format!("parse value {value:?}"))?;
            match op {
                PropertyOp::Hash => {
                    println!("0x{:04x}", checked_property_hash(value)?);
                }
                PropertyOp::Unhash => {
                    println!("0x{:x}", checked_property_unhash(value)?);
                }
            }
        }
    }
    Ok(())
}

fn print_frames(path: &Path, format: OutputFormat) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("read capture {}", path.display()))?;
    let report = inspect_frames(&bytes, &Limits::default());
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize json")?;
            println!("{json}");
        }
        OutputFormat::Pretty => print_frame_report(&report),
    }
    Ok(())
}

struct CaptureEntry {
    path: PathBuf,
    size: u64,
}

fn collect_capture_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<CaptureEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_name && !pattern.matches_path(&path) {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(CaptureEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn maybe_sort_entries(mut entries: Vec<CaptureEntry>, sort: Option<FrameSort>) -> Vec<CaptureEntry> {
    if let Some(FrameSort::Size) = sort {
        entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    }
    entries
}

fn print_frame_report(report: &FrameReport) {
    println!(
        "messages: {} consumed: {}/{} bytes",
        report.frames.len(),
        report.consumed,
        report.total_bytes
    );
    for frame in &report.frames {
        println!(
            "  @{:<6} id {:>3}: {} bytes",
            frame.offset, frame.id, frame.payload_len
        );
    }
    if let Some(error) = &report.error {
        println!("stopped: {error}");
    }
}
