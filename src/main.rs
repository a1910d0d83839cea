//! rhcodec - Inspect binary fields of RH table files
//!
//! Usage:
//!   rhcodec classify <file> [--offset N] [--count M]   - Flag 4-byte fields that look like floats
//!   rhcodec string <file> --encoding <kind> [...]      - Decode one string field
//!   rhcodec geometry <file> --kind <kind> [...]        - Decode a vector, quaternion or matrix

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rh_codec::{
    read_matrix4x4, read_quaternion, read_vector3, read_vector4, scan, ByteCursor, ClassifiedField,
    MatrixOrientation, StringEncoding, DEFAULT_UTF16_BLOCK_SIZE, FIELD_WIDTH,
};

#[derive(Parser)]
#[command(name = "rhcodec")]
#[command(version = "0.1.0")]
#[command(about = "Inspect binary fields of RH table files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Encoding {
    /// u16 count + UTF-16LE
    LengthPrefixed,
    /// Zero-padded ASCII of --width bytes
    FixedAscii,
    /// ASCII up to the first zero byte
    NullTerminated,
    /// --size bytes of 0x0000-terminated UTF-16LE
    Utf16Block,
    /// 0x0000-terminated UTF-16LE, empty when unterminated
    Utf16z,
}

#[derive(Clone, Copy, ValueEnum)]
enum Orientation {
    RowMajor,
    ColumnMajor,
}

impl From<Orientation> for MatrixOrientation {
    fn from(o: Orientation) -> Self {
        match o {
            Orientation::RowMajor => MatrixOrientation::RowMajor,
            Orientation::ColumnMajor => MatrixOrientation::ColumnMajor,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GeometryKind {
    Vector3,
    Vector4,
    Quaternion,
    Matrix,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify 4-byte fields as int-like or float-like
    Classify {
        /// Input file
        file: PathBuf,
        /// Byte offset of the first field
        #[arg(short, long, default_value = "0")]
        offset: usize,
        /// Number of fields to classify (default: to end of file)
        #[arg(short, long)]
        count: Option<usize>,
        /// Only list float-like fields
        #[arg(long)]
        floats_only: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Decode a single string field
    String {
        /// Input file
        file: PathBuf,
        /// String encoding of the field
        #[arg(short, long, value_enum)]
        encoding: Encoding,
        /// Byte offset of the field
        #[arg(short, long, default_value = "0")]
        offset: usize,
        /// Field width for fixed-ascii
        #[arg(short, long)]
        width: Option<usize>,
        /// Block size for utf16-block
        #[arg(short, long, default_value_t = DEFAULT_UTF16_BLOCK_SIZE)]
        size: usize,
        /// Buffer length for null-terminated and utf16z (default: to end of file)
        #[arg(short, long)]
        length: Option<usize>,
        /// Read the ".\" path sentinel as an empty string
        #[arg(long)]
        collapse_sentinel: bool,
    },
    /// Decode a vector, quaternion or matrix block
    Geometry {
        /// Input file
        file: PathBuf,
        /// Kind of block
        #[arg(short, long, value_enum)]
        kind: GeometryKind,
        /// Byte offset of the block
        #[arg(short, long, default_value = "0")]
        offset: usize,
        /// Matrix layout (required for matrices, never guessed)
        #[arg(short = 'r', long, value_enum)]
        orientation: Option<Orientation>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
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
        Commands::Classify { file, offset, count, floats_only, json } => {
            classify_fields(&file, offset, count, floats_only, json)?;
        }
        Commands::String { file, encoding, offset, width, size, length, collapse_sentinel } => {
            let encoding = match encoding {
                Encoding::LengthPrefixed => StringEncoding::LengthPrefixed { collapse_sentinel },
                Encoding::FixedAscii => StringEncoding::FixedAscii(
                    width.context("--width is required for fixed-ascii")?,
                ),
                Encoding::NullTerminated => StringEncoding::NullTerminatedAscii,
                Encoding::Utf16Block => StringEncoding::FixedUtf16Block(size),
                Encoding::Utf16z => StringEncoding::Utf16ZFromBuffer,
            };
            decode_string(&file, encoding, offset, length)?;
        }
        Commands::Geometry { file, kind, offset, orientation, json } => {
            decode_geometry(&file, kind, offset, orientation.map(Into::into), json)?;
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    debug!("Loaded {} ({} bytes)", path.display(), data.len());
    Ok(data)
}

fn check_offset(data: &[u8], offset: usize) -> Result<()> {
    if offset > data.len() {
        bail!("Offset {:#x} is past the end of the file ({} bytes)", offset, data.len());
    }
    Ok(())
}

fn classify_fields(
    path: &Path,
    offset: usize,
    count: Option<usize>,
    floats_only: bool,
    json: bool,
) -> Result<()> {
    let data = load(path)?;
    check_offset(&data, offset)?;

    let end = match count {
        Some(n) => offset.saturating_add(n.saturating_mul(FIELD_WIDTH)).min(data.len()),
        None => data.len(),
    };
    let fields: Vec<ClassifiedField> = scan(&data[offset..end], offset)
        .into_iter()
        .filter(|f| !floats_only || f.looks_like_float)
        .collect();

    for candidate in fields.iter().filter_map(|f| f.candidate.as_ref()) {
        info!(
            offset = candidate.offset,
            raw = %candidate.raw_hex,
            value = candidate.value,
            "float candidate"
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }

    println!("{:>10}  {:<11}  {:>12}  {}", "Offset", "Bytes", "Int32", "Float");
    for field in &fields {
        let float = match &field.candidate {
            Some(c) => format!("{}", c.value),
            None => "-".to_string(),
        };
        println!(
            "{:>#10x}  {:<11}  {:>12}  {}",
            field.offset,
            field
                .bytes
                .iter()
                .map(|b| format!("{:02X}", b))
                .collect::<Vec<_>>()
                .join(" "),
            field.value,
            float
        );
    }

    let float_like = fields.iter().filter(|f| f.looks_like_float).count();
    println!();
    println!("Total: {} fields, {} float-like", fields.len(), float_like);

    Ok(())
}

fn decode_string(
    path: &Path,
    encoding: StringEncoding,
    offset: usize,
    length: Option<usize>,
) -> Result<()> {
    let data = load(path)?;
    check_offset(&data, offset)?;

    let end = match length {
        Some(n) => offset.saturating_add(n).min(data.len()),
        None => data.len(),
    };
    let mut cursor = ByteCursor::with_position(&data[..end], offset);
    let text = encoding
        .read(&mut cursor)
        .with_context(|| format!("Failed to decode {:?} at offset {:#x}", encoding, offset))?;

    debug!(consumed = cursor.position() - offset, "decoded string field");
    println!("{:?}", text);

    Ok(())
}

fn decode_geometry(
    path: &Path,
    kind: GeometryKind,
    offset: usize,
    orientation: Option<MatrixOrientation>,
    json: bool,
) -> Result<()> {
    let data = load(path)?;
    check_offset(&data, offset)?;
    let mut cursor = ByteCursor::with_position(&data, offset);

    let value = match kind {
        GeometryKind::Vector3 => serde_json::to_value(read_vector3(&mut cursor)?)?,
        GeometryKind::Vector4 => serde_json::to_value(read_vector4(&mut cursor)?)?,
        GeometryKind::Quaternion => serde_json::to_value(read_quaternion(&mut cursor)?)?,
        GeometryKind::Matrix => {
            let Some(orientation) = orientation else {
                bail!("--orientation is required for matrices: the layout is not stored in the file");
            };
            let m = read_matrix4x4(&mut cursor, orientation)?;
            if !json {
                for row in m.rows {
                    println!("{:>14} {:>14} {:>14} {:>14}", row[0], row[1], row[2], row[3]);
                }
                return Ok(());
            }
            serde_json::to_value(m)?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", value);
    }

    Ok(())
}
