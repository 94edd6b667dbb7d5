mod app;
mod backend;
mod config;
mod error;
mod utils;

use crate::app::ImageImporter;
use crate::backend::{ApiClient, Backend};
use crate::config::{AppConfig, Cli};
use anyhow::Result;
use clap::Parser;
use eframe::egui;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;

    env_logger::Builder::new()
        .filter_level(config.log_filter())
        .init();

    log::info!("Starting image importer against {}", config.api_url);

    // Backend calls run here; the UI thread only polls their results.
    let runtime = tokio::runtime::Runtime::new()?;
    let backend: Arc<dyn Backend> = Arc::new(ApiClient::new(&config)?);
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Image Importer",
        options,
        Box::new(move |cc: &eframe::CreationContext<'_>| {
            Box::new(ImageImporter::new(cc, backend, handle))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run window: {}", e))?;

    Ok(())
}
