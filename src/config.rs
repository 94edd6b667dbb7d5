use crate::error::AppError;
use clap::Parser;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const ENV_PREFIX: &str = "IMPORTER";

/// Desktop client for importing cloud folders and browsing imported images.
#[derive(Parser, Debug, Default, Clone)]
#[command(version, about)]
pub struct Cli {
    /// Base URL of the image backend
    #[arg(long)]
    pub api_url: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Extra configuration file, layered over config/default and config/local
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub log_level: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load(cli: &Cli) -> Result<Self, AppError> {
        let mut builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = &cli.config {
            builder = builder.add_source(File::from(path.as_path()));
        }

        let builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        Self::finish(builder, cli)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, AppError> {
        Ok(Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("log_level", "info")?)
    }

    fn finish(builder: ConfigBuilder<DefaultState>, cli: &Cli) -> Result<Self, AppError> {
        let config: AppConfig = builder
            .set_override_option("api_url", cli.api_url.clone())?
            .set_override_option("log_level", cli.log_level.clone())?
            .build()?
            .try_deserialize()?;

        // Fail at startup rather than on the first request.
        Url::parse(&config.api_url)?;
        Ok(config)
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
