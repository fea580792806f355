use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use plant_doctor::capture::camera::fake::{FakeDevices, FakeOutcome};
use plant_doctor::capture::{render, Analyzer, Event, ProxyClient, SelectedImage, State};
use plant_doctor::config::{self, ProxyConfig};
use plant_doctor::server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plant-doctor", version, about = "Plant disease classification proxy")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the classification proxy.
    Serve(ServeArgs),
    /// Submit an image (or a camera photo) to a running proxy and print the diagnosis.
    Classify(ClassifyArgs),
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long, env = "HOST", default_value = config::DEFAULT_HOST)]
    host: String,
    #[arg(long, env = "PORT", default_value_t = config::DEFAULT_PORT)]
    port: u16,
    /// Base URL of the prediction backend.
    #[arg(long, env = "BACKEND_URL", default_value = config::DEFAULT_BACKEND_URL)]
    backend_url: String,
    #[arg(long, env = "BACKEND_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[derive(Args)]
struct ClassifyArgs {
    /// JPEG, PNG or WebP image of the plant.
    #[arg(required_unless_present = "camera")]
    image: Option<PathBuf>,
    /// Photograph the plant with the built-in simulated camera instead.
    #[arg(long, conflicts_with = "image")]
    camera: bool,
    #[arg(long, env = "PROXY_URL", default_value = "http://127.0.0.1:3000")]
    proxy_url: String,
}

impl From<ServeArgs> for ProxyConfig {
    fn from(args: ServeArgs) -> Self {
        ProxyConfig {
            host: args.host,
            port: args.port,
            ..ProxyConfig::default()
        }
        .with_backend_url(args.backend_url)
        .with_timeout(Duration::from_secs(args.timeout_secs))
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Serve(args) => serve(args.into()).await,
        Command::Classify(args) => classify(args).await,
    }
}

async fn serve(config: ProxyConfig) -> anyhow::Result<()> {
    info!("plant-doctor v{}", env!("CARGO_PKG_VERSION"));
    let (server, _) = server::bind(config).context("failed to start proxy")?;
    server.await?;
    Ok(())
}

async fn classify(args: ClassifyArgs) -> anyhow::Result<()> {
    let mut analyzer = Analyzer::new(ProxyClient::new(args.proxy_url));
    match args.image {
        Some(path) => {
            let image = SelectedImage::from_path(&path)
                .with_context(|| format!("cannot use {}", path.display()))?;
            analyzer.dispatch(Event::ImageChosen(image)).await;
        }
        None => {
            let devices = FakeDevices::new(FakeOutcome::Grant {
                width: 640,
                height: 480,
            });
            analyzer.photograph(&devices).await;
        }
    }
    let state = analyzer.dispatch(Event::Submit).await;

    print!("{}", render::render(state));
    if let State::Error { message, .. } = state {
        bail!("analysis failed: {message}");
    }
    Ok(())
}
