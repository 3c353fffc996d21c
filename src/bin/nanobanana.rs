//! CLI for nanobanana - Gemini image generation and editing.

use clap::{Parser, ValueEnum};
use nanobanana::{
    AspectRatio, GeminiClient, GenerationClient, GenerationRequest, ImageAttachment,
    ReferenceKind, Resolution,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nanobanana")]
#[command(about = "Generate images using Nano Banana Pro (Gemini 3 Pro Image)")]
#[command(version)]
struct Cli {
    /// Image description/prompt
    #[arg(short, long)]
    prompt: String,

    /// Output filename (e.g., sunset-mountains.png)
    #[arg(short, long)]
    filename: PathBuf,

    /// Input image path for editing/modification (in-context editing)
    #[arg(short, long)]
    input_image: Option<PathBuf>,

    /// Reference image(s) for style/character/subject consistency (repeatable)
    #[arg(long, visible_alias = "ref")]
    reference_image: Vec<PathBuf>,

    /// Type of reference: STYLE (transfer style), CHARACTER (face/traits), SUBJECT (composition)
    #[arg(long, visible_alias = "rt", value_enum, default_value = "STYLE")]
    reference_type: ReferenceTypeArg,

    /// Output aspect ratio (default: auto)
    #[arg(long, visible_alias = "ar", value_enum)]
    aspect_ratio: Option<AspectRatioArg>,

    /// Output resolution
    #[arg(short, long, value_enum, default_value = "2K")]
    resolution: ResolutionArg,

    /// Number of images to generate (1-4)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=4))]
    num_images: u8,

    /// Gemini API key (overrides GEMINI_API_KEY env var)
    #[arg(short = 'k', long)]
    api_key: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReferenceTypeArg {
    #[value(name = "STYLE")]
    Style,
    #[value(name = "CHARACTER")]
    Character,
    #[value(name = "SUBJECT")]
    Subject,
}

impl From<ReferenceTypeArg> for ReferenceKind {
    fn from(arg: ReferenceTypeArg) -> Self {
        match arg {
            ReferenceTypeArg::Style => ReferenceKind::Style,
            ReferenceTypeArg::Character => ReferenceKind::Character,
            ReferenceTypeArg::Subject => ReferenceKind::Subject,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AspectRatioArg {
    #[value(name = "1:1")]
    Square,
    #[value(name = "4:3")]
    Standard,
    #[value(name = "3:4")]
    StandardPortrait,
    #[value(name = "16:9")]
    Landscape,
    #[value(name = "9:16")]
    Portrait,
}

impl From<AspectRatioArg> for AspectRatio {
    fn from(arg: AspectRatioArg) -> Self {
        match arg {
            AspectRatioArg::Square => AspectRatio::Square,
            AspectRatioArg::Standard => AspectRatio::Standard,
            AspectRatioArg::StandardPortrait => AspectRatio::StandardPortrait,
            AspectRatioArg::Landscape => AspectRatio::Landscape,
            AspectRatioArg::Portrait => AspectRatio::Portrait,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResolutionArg {
    #[value(name = "1K")]
    OneK,
    #[value(name = "2K")]
    TwoK,
    #[value(name = "4K")]
    FourK,
}

impl From<ResolutionArg> for Resolution {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::OneK => Resolution::OneK,
            ResolutionArg::TwoK => Resolution::TwoK,
            ResolutionArg::FourK => Resolution::FourK,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(api_key) = nanobanana::resolve_api_key(cli.api_key.clone()) else {
        eprintln!("Error: No API key provided.");
        eprintln!("Please either:");
        eprintln!("  1. Provide --api-key argument");
        eprintln!("  2. Set GEMINI_API_KEY environment variable");
        std::process::exit(1);
    };

    if let Err(e) = run(cli, api_key).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, api_key: String) -> anyhow::Result<()> {
    if let Some(parent) = cli.filename.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let resolution = Resolution::from(cli.resolution);
    let reference_kind = ReferenceKind::from(cli.reference_type);

    // All local files must load before the network call is made.
    let mut request = GenerationRequest::new(&cli.prompt)
        .with_reference_kind(reference_kind)
        .with_resolution(resolution)
        .with_num_images(cli.num_images);

    for ref_path in &cli.reference_image {
        let attachment = ImageAttachment::from_path(ref_path)?;
        request = request.with_reference_image(attachment);
        println!(
            "Added reference image ({}): {}",
            reference_kind,
            ref_path.display()
        );
    }

    if let Some(ref input_path) = cli.input_image {
        let attachment = ImageAttachment::from_path(input_path)?;
        request = request.with_input_image(attachment);
        println!("Added input image for editing: {}", input_path.display());
    }

    if let Some(ar) = cli.aspect_ratio {
        request = request.with_aspect_ratio(ar.into());
    }

    if cli.input_image.is_some() {
        println!("Editing image with resolution {resolution}...");
    } else if !cli.reference_image.is_empty() {
        println!(
            "Generating with {} reference image(s), resolution {resolution}...",
            cli.reference_image.len()
        );
    } else {
        println!("Generating image with resolution {resolution}...");
    }

    let client = GeminiClient::builder().api_key(api_key).build()?;
    tracing::debug!(model = client.model(), "client ready");
    let parts = client.generate(&request).await?;

    let saved = nanobanana::output::save_response_images(&parts, &cli.filename)?;
    println!("\nTotal images saved: {}", saved.len());

    Ok(())
}
