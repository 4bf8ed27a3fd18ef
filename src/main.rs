use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use epuck_capture::image_pipeline::conversions::{
    convert_framed_file, convert_raw_file, DEFAULT_BAUD_RATE, DEFAULT_HEIGHT, DEFAULT_PORT,
    DEFAULT_WIDTH,
};
use epuck_capture::image_pipeline::link::list_ports;
use epuck_capture::image_pipeline::protocol::DEFAULT_MAX_ATTEMPTS;
use epuck_capture::image_pipeline::sink::DEFAULT_QUALITY;
use epuck_capture::image_pipeline::{
    BayerPattern, CaptureConfig, CaptureConfigBuilder, CaptureSession, DebayerBackend,
    OutputFormat, TiffCompression,
};
use epuck_capture::logger;

use tracing::{error, info};

/// Grabs a single Bayer frame from the e-puck2 camera and saves it as images.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Request one image from the robot and write it to disk.
    Capture(CaptureArgs),
    /// Demosaic a previously saved `image.bayer` file.
    Convert(ConvertArgs),
    /// List serial ports visible on this machine.
    ListPorts,
}

#[derive(Args, Debug)]
struct CaptureArgs {
    /// Serial device of the robot.
    #[arg(short, long, default_value = DEFAULT_PORT)]
    port: String,
    #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,
    /// Longest a single read may block, in milliseconds.
    #[arg(long, default_value_t = 100)]
    timeout_ms: u64,
    /// Reads allowed before giving up on a response.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,
    /// Accept whatever dimensions the robot reports.
    #[arg(long)]
    no_validate_dimensions: bool,
    #[arg(long, value_enum, default_value_t = BackendArg::Bilinear)]
    backend: BackendArg,
    #[command(flatten)]
    image: ImageArgs,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Raw mosaic file written by an earlier capture.
    raw: PathBuf,
    /// The file holds a full response, header included; width and height
    /// are taken from it.
    #[arg(long)]
    framed: bool,
    #[command(flatten)]
    image: ImageArgs,
}

#[derive(Args, Debug)]
struct ImageArgs {
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u8,
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u8,
    /// Color filter layout of the sensor.
    #[arg(long, value_enum, default_value_t = PatternArg::Grbg)]
    pattern: PatternArg,
    #[arg(short, long, value_enum, default_value_t = FormatArg::Jpeg)]
    format: FormatArg,
    /// Compression applied when the format is TIFF.
    #[arg(long, value_enum, default_value_t = CompressionArg::None)]
    tiff_compression: CompressionArg,
    /// JPEG quality, 1-100.
    #[arg(long, default_value_t = DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
    /// Directory receiving the output files.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PatternArg {
    Rggb,
    Bggr,
    Grbg,
    Gbrg,
}

impl From<PatternArg> for BayerPattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Rggb => BayerPattern::Rggb,
            PatternArg::Bggr => BayerPattern::Bggr,
            PatternArg::Grbg => BayerPattern::Grbg,
            PatternArg::Gbrg => BayerPattern::Gbrg,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Jpeg,
    Png,
    Tiff,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::DeflateFast => TiffCompression::DeflateFast,
            CompressionArg::DeflateBalanced => TiffCompression::DeflateBalanced,
            CompressionArg::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BackendArg {
    Bilinear,
    BayerCrate,
}

impl From<BackendArg> for DebayerBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Bilinear => DebayerBackend::Bilinear,
            BackendArg::BayerCrate => DebayerBackend::BayerCrate,
        }
    }
}

impl ImageArgs {
    fn output_format(&self) -> OutputFormat {
        match self.format {
            FormatArg::Jpeg => OutputFormat::Jpeg,
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Tiff => OutputFormat::Tiff(self.tiff_compression.into()),
        }
    }

    fn apply(&self, builder: CaptureConfigBuilder) -> CaptureConfigBuilder {
        builder
            .dimensions(self.width, self.height)
            .pattern(self.pattern.into())
            .format(self.output_format())
            .quality(self.quality)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose.tracing_level_filter());

    match cli.command {
        Commands::Capture(args) => run_capture(args),
        Commands::Convert(args) => run_convert(args),
        Commands::ListPorts => run_list_ports(),
    }
}

fn run_capture(args: CaptureArgs) -> Result<()> {
    let config = args
        .image
        .apply(CaptureConfig::builder())
        .port(&args.port)
        .baud_rate(args.baud)
        .read_timeout(Duration::from_millis(args.timeout_ms))
        .max_attempts(args.max_attempts)
        .validate_dimensions(!args.no_validate_dimensions)
        .backend(args.backend.into())
        .build();

    info!(
        port = %config.port,
        baud = config.baud_rate,
        width = config.width,
        height = config.height,
        pattern = %config.pattern,
        "Starting capture"
    );

    let mut session = CaptureSession::open(config)
        .with_context(|| format!("Failed to open serial port {}", args.port))?;

    match session.capture(&args.image.output_dir) {
        Ok(output) => {
            info!(
                color = %output.paths.color.display(),
                mode = output.frame.header().mode,
                "Capture successful!"
            );
            Ok(())
        }
        Err(e) => {
            if e.is_retryable() {
                error!(state = %session.state(), "Capture failed, retrying may help: {}", e);
            }
            Err(e).context("Capture failed")
        }
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let config = args.image.apply(CaptureConfig::builder()).build();

    let converted = if args.framed {
        convert_framed_file(&args.raw, config, &args.image.output_dir)
    } else {
        convert_raw_file(&args.raw, config, &args.image.output_dir)
    };
    let paths = converted
        .with_context(|| format!("Failed to convert {}", args.raw.display()))?;

    info!(
        mosaic = %paths.mosaic.display(),
        color = %paths.color.display(),
        "Conversion successful!"
    );
    Ok(())
}

fn run_list_ports() -> Result<()> {
    let ports = list_ports().context("Failed to enumerate serial ports")?;
    if ports.is_empty() {
        info!("No serial ports found");
    }
    for port in ports {
        println!("{}\t{}", port.name, port.description);
    }
    Ok(())
}
