use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gemini_image_lab::app::App;
use gemini_image_lab::config::Config;
use gemini_image_lab::models::EditorMode;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gemini-image-lab")]
#[command(about = "Generate and edit images with Gemini")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ModeArgs {
    /// Image file(s), in order. Order is meaningful for style transfer.
    #[arg(value_name = "IMAGE", required = true)]
    images: Vec<PathBuf>,

    /// Instruction describing the image to generate.
    #[arg(short, long)]
    prompt: String,

    /// Directory the generated image(s) are written to.
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a different posture or angle from one image.
    Variations(ModeArgs),
    /// Merge elements from up to five images into a new scene.
    Merge(ModeArgs),
    /// Add or remove elements from one image.
    Edit(ModeArgs),
    /// Apply the style of a reference image to a content image
    /// (content first, style second).
    StyleTransfer(ModeArgs),
    /// Apply the same prompt to up to twenty images, one call each.
    Bulk(ModeArgs),
}

impl Command {
    fn split(self) -> (EditorMode, ModeArgs) {
        match self {
            Command::Variations(args) => (EditorMode::Variations, args),
            Command::Merge(args) => (EditorMode::Merge, args),
            Command::Edit(args) => (EditorMode::Edit, args),
            Command::StyleTransfer(args) => (EditorMode::StyleTransfer, args),
            Command::Bulk(args) => (EditorMode::BulkProcess, args),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_image_lab=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let (mode, mode_args) = args.command.split();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let app = App::from_config(&config);

    match app
        .run_mode(
            mode,
            &mode_args.prompt,
            &mode_args.images,
            &mode_args.output_dir,
        )
        .await
    {
        Ok(written) => {
            info!("Generated {} image(s)", written.len());
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
