use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::normalize_base_url, load_settings, BrandCatalog, Flow, HttpBackend, Orchestrator,
};
use shared::{
    domain::{BrandId, ContentType, CreatorId, PlatformFilter, ALL_PLATFORMS, CONTENT_PLATFORMS},
    protocol::CreatorQuery,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(about = "Operator console for the creator/brand dashboard backend")]
struct Cli {
    /// Settings file; defaults to ./dashboard.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Headline metrics, distributions and recent activity.
    Overview,
    Creators {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        min_followers: Option<u64>,
    },
    Analytics {
        #[arg(long)]
        creator: i64,
    },
    Generate {
        #[arg(long)]
        topic: String,
        #[arg(long = "type", default_value = "title")]
        content_type: ContentType,
        #[arg(long, default_value = CONTENT_PLATFORMS[0])]
        platform: String,
    },
    Match {
        #[arg(long)]
        brand: Option<i64>,
        #[arg(long, default_value = ALL_PLATFORMS)]
        platform: String,
    },
    Risk {
        #[arg(long)]
        content: String,
    },
    Status,
    /// Lists the brands available for matching.
    Brands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(url) = &cli.api_base_url {
        settings.api_base_url = normalize_base_url(url)?;
    }
    let catalog = match &settings.brand_catalog_path {
        Some(path) => BrandCatalog::load(path)
            .with_context(|| format!("failed to load brand catalog '{}'", path.display()))?,
        None => BrandCatalog::builtin(),
    };
    info!(api_base_url = %settings.api_base_url, brands = catalog.brands().len(), "console starting");

    if let Command::Brands = cli.command {
        print!("{}", render::brands(&catalog));
        return Ok(());
    }

    let backend = HttpBackend::from_settings(&settings).context("failed to build http client")?;
    let mut orchestrator = Orchestrator::mount(Arc::new(backend), catalog);

    let flow = match cli.command {
        Command::Overview => Flow::DashboardOverview,
        Command::Creators {
            category,
            min_followers,
        } => {
            orchestrator.set_creator_query(CreatorQuery {
                category,
                min_followers,
            });
            orchestrator.trigger(Flow::CreatorDirectory)?;
            Flow::CreatorDirectory
        }
        Command::Analytics { creator } => {
            let creator_id = CreatorId(creator);
            orchestrator.select_creator(creator_id)?;
            Flow::CreatorAnalytics(creator_id)
        }
        Command::Generate {
            topic,
            content_type,
            platform,
        } => {
            orchestrator.set_content_type(content_type);
            orchestrator.set_topic(topic);
            orchestrator.set_content_platform(platform);
            orchestrator.trigger(Flow::ContentGeneration)?;
            Flow::ContentGeneration
        }
        Command::Match { brand, platform } => {
            if let Some(brand) = brand {
                orchestrator.select_brand(Some(BrandId(brand)));
            }
            orchestrator.set_matching_platform(PlatformFilter::from_label(&platform));
            orchestrator.trigger(Flow::BrandMatching)?;
            Flow::BrandMatching
        }
        Command::Risk { content } => {
            orchestrator.set_risk_content(content);
            orchestrator.trigger(Flow::RiskCheck)?;
            Flow::RiskCheck
        }
        Command::Status => {
            orchestrator.trigger(Flow::AiStatus)?;
            Flow::AiStatus
        }
        Command::Brands => return Err(anyhow!("brands is handled before mount")),
    };

    orchestrator.settle().await;
    let view = orchestrator.view();
    let (text, error) = render::flow(&view, flow);
    print!("{text}");
    match error {
        Some(message) => Err(anyhow!("{flow} failed: {message}")),
        None => Ok(()),
    }
}
