use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vista_core::{
    api::HttpGallerySource,
    carousel::{CarouselView, PhaseView},
    config::{CarouselConfig, ConfigSource},
    runtime::CarouselRuntime,
};

/// Mount one carousel against a gallery service and log what it renders.
#[derive(Parser)]
#[command(name = "vista-gallery", about = "Headless Vista carousel driver")]
struct Cli {
    /// Gallery service base URL (overrides configuration)
    #[arg(long)]
    base_url: Option<String>,
    /// Read configuration from this file instead of the environment
    #[arg(long)]
    config: Option<PathBuf>,
    /// Unmount after this long, e.g. `30s` or `2m`
    #[arg(long, value_parser = humantime::parse_duration, default_value = "30s")]
    run_for: Duration,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let (mut config, source) = match &cli.config {
        Some(path) => (
            CarouselConfig::load_from_file(path)?,
            ConfigSource::File(path.clone()),
        ),
        None => CarouselConfig::load_from_env()?,
    };
    match &source {
        ConfigSource::Default => info!("using default carousel configuration"),
        ConfigSource::EnvPath(path) => {
            info!(path = %path.display(), "carousel config loaded from env path")
        }
        ConfigSource::EnvInline => {
            info!("carousel config loaded from inline environment json")
        }
        ConfigSource::File(path) => {
            info!(path = %path.display(), "carousel config loaded from file")
        }
    }
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }

    let gallery = Arc::new(
        HttpGallerySource::new(config.api_base_url.clone())
            .context("failed to build gallery client")?,
    );
    let mounted = CarouselRuntime::new(config, gallery)
        .context("invalid carousel configuration")?
        .mount();

    let mut views = mounted.views.clone();
    let deadline = tokio::time::sleep(cli.run_for);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => {
                info!(run_for = %humantime::format_duration(cli.run_for), "run time elapsed");
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                log_view(&views.borrow_and_update());
            }
        }
    }

    mounted.unmount().await;
    Ok(())
}

fn log_view(view: &CarouselView) {
    match &view.phase {
        PhaseView::Loading => info!("loading gallery"),
        PhaseView::Error { message } => info!(%message, "gallery unavailable"),
        PhaseView::Empty => info!("gallery is empty"),
        PhaseView::Ready => {
            let Some(slide) = view.active_slide() else {
                return;
            };
            info!(
                index = view.displayed_index,
                total = view.slides.len(),
                title = %slide.title,
                url = slide.asset.url().unwrap_or("<broken>"),
                autoplay = view.autoplay_enabled,
                zoomed = view.overlay.is_some(),
                "showing slide"
            );
        }
    }
}
