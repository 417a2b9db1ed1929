use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use imgpath::config::Config;
use imgpath::{check_dimensions, decode_url, DecodedUrl, ImageType, ProxyError};
use serde::Serialize;
use std::path::PathBuf;

/// Imgpath - decode image proxy source paths and check source limits
#[derive(Parser, Debug)]
#[command(name = "imgpath")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Test configuration and exit
    #[arg(long)]
    test: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode the source part of a request path
    Decode {
        /// e.g. `plain/http%3A%2F%2Fexample.com%2Fcat.jpg@webp`
        path: String,
    },
    /// Check source image dimensions against the resolution limit
    Check { width: u64, height: u64 },
    /// List supported image types
    Types,
}

#[derive(Serialize)]
struct DecodeOutput {
    #[serde(flatten)]
    decoded: DecodedUrl,
    format_type: ImageType,
    mime: &'static str,
    content_disposition: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .map_err(ProxyError::Config)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    config
        .validate()
        .map_err(ProxyError::Config)
        .context("Invalid configuration")?;

    imgpath::logging::init_subscriber(&config.logging)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging subsystem")?;

    tracing::info!(
        base_url = %config.base_url,
        max_src_resolution = config.max_src_resolution,
        "Configuration loaded successfully"
    );

    if args.test {
        println!("configuration OK");
        return Ok(());
    }

    match args.command {
        Some(Command::Decode { path }) => decode(&config, &path),
        Some(Command::Check { width, height }) => check(&config, width, height),
        Some(Command::Types) => {
            print_types();
            Ok(())
        }
        None => bail!("no command given, see --help"),
    }
}

fn decode(config: &Config, path: &str) -> anyhow::Result<()> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let decoded = decode_url(&segments, &config.base_url)
        .map_err(ProxyError::from)
        .map_err(report)?;

    // Without a format hint the response keeps the source type, guessed
    // here from the source extension
    let format_type = if decoded.has_format() {
        decoded.format_type()
    } else {
        extension_type(&decoded.source_url)
    };

    let output = DecodeOutput {
        content_disposition: format_type.content_disposition_from_url(&decoded.source_url),
        mime: format_type.mime(),
        format_type,
        decoded,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn check(config: &Config, width: u64, height: u64) -> anyhow::Result<()> {
    check_dimensions(width, height, &config.security())
        .map_err(ProxyError::from)
        .map_err(report)?;

    println!("{}x{} OK", width, height);
    Ok(())
}

/// Log the internal message, surface only the public one
fn report(err: ProxyError) -> anyhow::Error {
    tracing::warn!(
        status = err.to_http_status(),
        error = %err,
        "Request rejected"
    );
    anyhow::anyhow!("{} ({})", err.public_message(), err.to_http_status())
}

fn extension_type(source_url: &str) -> ImageType {
    let path = source_url.split(['?', '#']).next().unwrap_or_default();
    path.rsplit_once('.')
        .map(|(_, ext)| ImageType::parse(&ext.to_lowercase()))
        .unwrap_or(ImageType::Unknown)
}

fn print_types() {
    println!(
        "{:<6} {:<26} {:<6} {:<9} {:<7}",
        "type", "mime", "alpha", "animation", "profile"
    );
    for t in ImageType::ALL {
        println!(
            "{:<6} {:<26} {:<6} {:<9} {:<7}",
            t.as_str(),
            t.mime(),
            t.supports_alpha(),
            t.supports_animation(),
            t.supports_colour_profile()
        );
    }
}
