use anyhow::{Context, Result};
use clap::Parser;
use nano_banana::adapter::RequestAdapter;
use nano_banana::config::Config;
use nano_banana::image::InputImage;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "nano-banana")]
#[command(about = "Edit images with a text prompt using Gemini")]
struct CliArgs {
    /// Instruction for the model.
    #[arg(short, long)]
    prompt: String,

    /// Input image; repeat for several. Sent in the given order.
    #[arg(short, long = "image", value_name = "PATH")]
    images: Vec<PathBuf>,

    /// API key. Falls back to GEMINI_API_KEY when omitted or blank.
    #[arg(long)]
    api_key: Option<String>,

    /// Root directory for dated output folders.
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Model ID override.
    #[arg(long)]
    model: Option<String>,
}

fn load_images(paths: &[PathBuf]) -> Result<Vec<InputImage>> {
    paths
        .iter()
        .map(|path| {
            image::open(path)
                .map(InputImage::from)
                .with_context(|| format!("Failed to read image {}", path.display()))
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nano_banana=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = Config::from_env()?;
    if let Some(output_dir) = args.output_dir {
        config.output_root = output_dir;
    }
    if let Some(model) = args.model {
        config.model = model;
    }

    let images = load_images(&args.images)?;
    let adapter = RequestAdapter::from_config(&config);
    info!("Using model {}", adapter.model());

    match adapter
        .process(images, &args.prompt, args.api_key.as_deref())
        .await
    {
        Ok(outcome) => {
            println!("{}", outcome.path().display());
            Ok(())
        }
        Err(e) => {
            error!("Edit failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_repeated_images() {
        let args = CliArgs::try_parse_from([
            "nano-banana",
            "--prompt",
            "add a hat",
            "--image",
            "a.png",
            "-i",
            "b.png",
        ])
        .unwrap();

        assert_eq!(args.prompt, "add a hat");
        assert_eq!(
            args.images,
            vec![PathBuf::from("a.png"), PathBuf::from("b.png")]
        );
        assert!(args.output_dir.is_none());
    }

    #[test]
    fn test_prompt_is_required() {
        assert!(CliArgs::try_parse_from(["nano-banana", "--image", "a.png"]).is_err());
    }

    #[test]
    fn test_missing_image_file_reports_path() {
        let err = load_images(&[PathBuf::from("/definitely/not/here.png")]).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.png"));
    }
}
