use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "tidemark-server")]
#[command(about = "Time-series metrics over date-partitioned object storage")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "tidemark.toml")]
    config: String,

    /// Address to bind to, overrides the config file
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tidemark=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    tracing::info!("Config file: {}", args.config);
    let config = tidemark::Config::load_or_create(std::path::Path::new(&args.config))?;

    // One listing handle for the lifetime of the process
    let lister = config.create_lister();

    let addr = args.bind.unwrap_or_else(|| config.server.bind_addr.clone());
    let server = tidemark::api::ApiServer::with_cors(lister, config.server.cors.clone());

    tracing::info!("Listening on {}", addr);
    server.serve(&addr).await?;

    Ok(())
}
