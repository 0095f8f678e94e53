//! `rvoip-sdp`: parse, check and normalize SDP documents from the command line

mod logging;

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rvoip_sdp_core::{parse_with, AttributePolicy, Codec, ParserConfig, SessionDescription};
use serde::Deserialize;
use tracing::{debug, info};

use crate::logging::{parse_log_level, setup_logging, LoggingConfig};

const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "rvoip-sdp", version, about = "Parse, check and normalize SDP documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Keep unknown attributes instead of rejecting the document
    #[arg(long, global = true)]
    lenient: bool,

    /// TOML file with `log_level`, `max_bytes` and a `[parser]` table
    #[arg(long, global = true, env = "RVOIP_SDP_CONFIG")]
    config: Option<PathBuf>,

    /// Log level floor (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RVOIP_SDP_LOG_LEVEL")]
    log_level: Option<String>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    /// Include source file and line in log events
    #[arg(long, global = true)]
    log_source: bool,

    /// Refuse inputs larger than this many bytes
    #[arg(long, global = true)]
    max_bytes: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical form of a document
    Parse {
        /// Input file, or `-` for stdin
        input: PathBuf,
        /// Print the decoded model as JSON instead of SDP
        #[arg(long)]
        json: bool,
    },
    /// Validate a document; the exit status is the result
    Check {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },
    /// Look up a codec by payload type or by name
    Codec {
        /// Input file, or `-` for stdin
        input: PathBuf,
        /// Payload type to resolve
        #[arg(long, required_unless_present = "name", conflicts_with = "name")]
        pt: Option<u8>,
        /// Codec name to resolve to a payload type (e.g. opus, VP8)
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

/// Settings read from `--config`
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
struct FileConfig {
    log_level: Option<String>,
    max_bytes: Option<u64>,
    parser: ParserConfig,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Effective settings after merging flags over the config file
#[derive(Debug, PartialEq)]
struct Settings {
    parser: ParserConfig,
    logging: LoggingConfig,
    max_bytes: u64,
}

impl Settings {
    fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let mut parser = file.parser;
        if cli.lenient {
            parser = parser.with_attribute_policy(AttributePolicy::Permissive);
        }

        let mut logging = match cli.log_level.as_deref().or(file.log_level.as_deref()) {
            Some(level) => LoggingConfig::new(parse_log_level(level)?),
            None => LoggingConfig::default(),
        };
        if cli.json_logs {
            logging = logging.with_json();
        }
        if cli.log_source {
            logging = logging.with_file_info();
        }

        Ok(Settings {
            parser,
            logging,
            max_bytes: cli.max_bytes.or(file.max_bytes).unwrap_or(DEFAULT_MAX_BYTES),
        })
    }
}

/// Read `path` (or stdin for `-`) without buffering more than `limit` bytes
fn read_input(path: &Path, limit: u64) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        read_bounded(io::stdin().lock(), limit).context("failed to read stdin")
    } else {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        read_bounded(file, limit).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn read_bounded(reader: impl Read, limit: u64) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut buf)?;
    if buf.len() as u64 > limit {
        bail!("input exceeds {limit} bytes");
    }
    Ok(buf)
}

fn load(path: &Path, settings: &Settings) -> Result<SessionDescription> {
    let input = read_input(path, settings.max_bytes)?;
    debug!(bytes = input.len(), path = %path.display(), "read input");
    parse_with(&input, &settings.parser)
        .with_context(|| format!("{} is not a valid SDP document", path.display()))
}

fn run(cli: Cli, settings: &Settings, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Command::Parse { input, json } => {
            let sdp = load(&input, settings)?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &sdp)?;
                writeln!(out)?;
            } else {
                out.write_all(&sdp.to_bytes())?;
            }
        }
        Command::Check { input } => {
            let sdp = load(&input, settings)?;
            info!(
                media = sdp.media.len(),
                attributes = sdp.attributes.len(),
                "document is valid"
            );
        }
        Command::Codec {
            input,
            pt,
            name,
            json,
        } => {
            let sdp = load(&input, settings)?;
            let codec = match (pt, name) {
                (Some(pt), _) => sdp.codec_for_payload_type(pt)?,
                (None, Some(name)) => {
                    let pt = sdp.payload_type_for_codec(&Codec::named(name))?;
                    sdp.codec_for_payload_type(pt)?
                }
                (None, None) => bail!("either --pt or --name is required"),
            };
            if json {
                serde_json::to_writer_pretty(&mut *out, &codec)?;
                writeln!(out)?;
            } else {
                writeln!(out, "{codec}")?;
                for feedback in &codec.rtcp_feedback {
                    writeln!(out, "  rtcp-fb {feedback}")?;
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&cli, file)?;
    setup_logging(&settings.logging)?;
    debug!(parser = ?settings.parser, max_bytes = settings.max_bytes, "starting rvoip-sdp");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &settings, &mut out)?;
    out.flush()?;
    Ok(())
}
