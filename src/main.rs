use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gallery::api::GalleryClient;
use gallery::logging::init_tracing;
use gallery::notify::{Notification, NotificationLevel, SubmissionSurface};
use gallery::submission::ResetPolicy;
use gallery::{
    CandidateSubmission, CollectionCache, CollectionLoader, Config, FileBlob, ImageResource,
    SubmissionPipeline, SurfaceLifetime,
};

#[derive(Parser, Debug)]
#[command(name = "gallery", version, about = "Browse a remote image gallery and add images to it")]
struct Cli {
    /// Config file (default: ~/.config/gallery/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List images page by page
    List {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,
        /// Keep loading until the collection is exhausted
        #[arg(long)]
        all: bool,
    },
    /// Stage an image file and add it to the gallery
    Add {
        file: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
}

/// Prints pipeline notifications the way a toast would show them.
struct ConsoleSurface;

impl SubmissionSurface for ConsoleSurface {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => println!("{}", notification.message),
            NotificationLevel::Error => eprintln!("{}", notification.message),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let client = Arc::new(GalleryClient::from_config(&config)?);
    let cache = CollectionCache::new();

    match cli.command {
        Command::List { pages, all } => list(client, &cache, pages, all).await,
        Command::Add {
            file,
            title,
            description,
        } => add(client, &cache, &config, &file, title, description).await,
    }
}

async fn list(client: Arc<GalleryClient>, cache: &CollectionCache, pages: usize, all: bool) -> Result<()> {
    let view = SurfaceLifetime::new();
    let loader = CollectionLoader::new(client, cache, view.token());

    loader.load_initial().await?;
    let mut loaded = 1;
    while loader.state().can_load_more() && (all || loaded < pages) {
        loader.load_more().await?;
        loaded += 1;
    }

    let state = loader.state();
    for image in &state.items {
        print_image(image);
    }
    if state.has_more {
        println!("-- more images available (use --pages N or --all)");
    }
    Ok(())
}

async fn add(
    client: Arc<GalleryClient>,
    cache: &CollectionCache,
    config: &Config,
    path: &Path,
    title: String,
    description: String,
) -> Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let mut file = FileBlob::new(sniff_mime(&bytes), bytes);
    if let Some(name) = path.file_name() {
        file = file.with_name(name.to_string_lossy());
    }

    let dialog = SurfaceLifetime::new();
    let pipeline = SubmissionPipeline::new(
        client.clone(),
        client,
        cache,
        Arc::new(ConsoleSurface),
        dialog.token(),
    )
    .with_reset_policy(ResetPolicy::from(&config.submission));

    pipeline.stage(file.clone()).await?;
    let image = pipeline
        .submit(CandidateSubmission::new(Some(file), title, description))
        .await?;
    print_image(&image);
    Ok(())
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

fn print_image(image: &ImageResource) {
    println!(
        "{}\t{}\t{}\t{}",
        image.identifier,
        image.title,
        image.description,
        image.original_link()
    );
}
