//! sheetnote CLI: label the notes of a photographed staff.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "sheetnote")]
#[command(about = "Detect a musical staff and noteheads in an image and label their pitches")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize notes in an image.
    Detect(CliDetectArgs),

    /// Write the built-in demo sheet to a PNG file.
    Demo {
        /// Output image path.
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct CliDetectArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to write the recognition result (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Path to write the labelled overlay image (PNG).
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Optional JSON configuration; fields not present keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Clef of the staff in the image.
    #[arg(long, value_enum, default_value_t = ClefArg::Treble)]
    clef: ClefArg,

    /// Staff detection method (overrides the config file).
    #[arg(long, value_enum)]
    staff_method: Option<StaffMethodArg>,

    /// Overlay label size in pixels (overrides the config file).
    #[arg(long)]
    font_size: Option<f32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClefArg {
    Treble,
    Bass,
}

impl ClefArg {
    fn to_core(self) -> sheetnote::Clef {
        match self {
            Self::Treble => sheetnote::Clef::Treble,
            Self::Bass => sheetnote::Clef::Bass,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StaffMethodArg {
    Proportional,
    Projection,
}

impl StaffMethodArg {
    fn to_core(self) -> sheetnote::StaffMethod {
        match self {
            Self::Proportional => sheetnote::StaffMethod::Proportional,
            Self::Projection => sheetnote::StaffMethod::Projection,
        }
    }
}

impl CliDetectArgs {
    fn to_config(&self) -> CliResult<sheetnote::OmrConfig> {
        let mut config = match &self.config {
            Some(path) => sheetnote::OmrConfig::from_json_file(path).map_err(|e| -> CliError {
                format!("Failed to load config {}: {}", path.display(), e).into()
            })?,
            None => sheetnote::OmrConfig::default(),
        };
        if let Some(method) = self.staff_method {
            config.staff.method = method.to_core();
        }
        if let Some(size) = self.font_size {
            config.overlay.font_size = size;
        }
        Ok(config)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::Demo { out } => run_demo(&out),
    }
}

// ── demo ───────────────────────────────────────────────────────────────

fn run_demo(out: &std::path::Path) -> CliResult<()> {
    sheetnote::demo_sheet().save(out)?;
    tracing::info!("Demo sheet written to {}", out.display());
    Ok(())
}

// ── detect ─────────────────────────────────────────────────────────────

fn run_detect(args: &CliDetectArgs) -> CliResult<()> {
    tracing::info!("Loading image: {}", args.image.display());

    let img = image::open(&args.image).map_err(|e| -> CliError {
        format!("Failed to open image {}: {}", args.image.display(), e).into()
    })?;
    tracing::info!("Image size: {}x{}", img.width(), img.height());

    let recognizer = sheetnote::Recognizer::with_config(args.to_config()?);
    let result = recognizer.recognize(img, args.clef.to_core())?;

    if result.is_fallback() {
        tracing::warn!("No noteheads passed filtering; result holds synthesized notes");
    }
    println!("{}", result.summary());

    let json = serde_json::to_string_pretty(&result)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Results written to {}", args.out.display());

    if let Some(overlay_path) = &args.overlay {
        recognizer.render_overlay(&result).save(overlay_path)?;
        tracing::info!("Overlay written to {}", overlay_path.display());
    }

    Ok(())
}
