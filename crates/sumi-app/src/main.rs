use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;

mod controller;
mod display;
mod events;
mod io;
mod locale;
mod state;

#[cfg(test)]
mod tests;

use sumi_config::Config;
use sumi_core::language::{self, LanguagePack, LanguageRegistry};
use sumi_core::pipeline::Pipeline;
use sumi_ocr::TesseractBuilder;
use sumi_types::{AppEvent, LanguageCode};

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "sumi", about = "Terminal OCR: image in, recognized text out")]
struct Cli {
    /// Image to load and recognize on startup
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Recognition/UI language (two-letter code, e.g. "ja"); defaults to the
    /// configured or system language
    #[arg(short, long)]
    language: Option<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    // Both configuration failures here are startup-fatal by design.
    let pack = LanguagePack::load(&config.strings_path).with_context(|| {
        format!(
            "failed to load translated-string bundle from {}",
            config.strings_path.display()
        )
    })?;

    let initial = startup_language(cli.language.as_deref(), &config)?;
    tracing::info!(language = %initial, "starting up");

    let registry = LanguageRegistry::new(pack, initial);
    let builder = TesseractBuilder::new(config.ocr.tessdata_dir.clone());
    let pipeline = Pipeline::new(Box::new(builder), initial)
        .context("failed to initialize the recognition engine")?;

    let state = Arc::new(AppState::new(config, registry, pipeline));

    let controller = AppController::new(state);
    // Announce the startup language so the frontend gets its strings, then
    // feed any image given on the command line through the normal path.
    controller.submit(AppEvent::ChangeLanguage(initial)).await;
    if let Some(path) = cli.image {
        controller.submit(AppEvent::OpenImage(path)).await;
    }

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    run(controller, shutdown).await;
    Ok(())
}

pub async fn run(controller: AppController, shutdown: impl Future<Output = ()>) {
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = shutdown => {
            tracing::info!("shutdown requested");
            controller.shutdown();
        }
        _ = async {
            while let Some(result) = tasks.join_next().await {
                match result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::error!("task exited: {e}"),
                    Err(e) => tracing::error!("task panicked: {e}"),
                }
            }
        } => {}
    }
}

/// CLI override beats config override beats system locale; anything else is
/// the default English.
fn startup_language(cli_language: Option<&str>, config: &Config) -> anyhow::Result<LanguageCode> {
    if let Some(tag) = cli_language {
        return LanguageCode::parse(tag)
            .with_context(|| format!("unsupported language \"{tag}\""));
    }
    if let Some(code) = config.ocr.language {
        return Ok(code);
    }
    Ok(language::resolve_from_locale(locale::detect().as_deref()))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // Logs go to stderr; stdout belongs to the display loop.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if atty::is(atty::Stream::Stderr) {
        builder.init();
    } else {
        builder.json().init();
    }
}
