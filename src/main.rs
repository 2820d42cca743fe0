//! spam-predictor: Naive Bayes spam prediction over HTTP
//!
//! Loads the labeled corpus, trains (or loads) the model once, then serves
//! `/status` and `/predict` until stopped.

use clap::Parser;
use spam_predictor::{AppContext, Corpus, ServiceConfig, SpamModel, router};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spam-predictor")]
#[command(version)]
#[command(about = "Serve Naive Bayes spam predictions over HTTP", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "SPAM_PREDICTOR_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,

    /// Training data CSV
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Seed for the train/test split
    #[arg(long)]
    seed: Option<u64>,

    /// Model snapshot to reuse between runs
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Log the accuracy on the held-out partition after training
    #[arg(long)]
    evaluate: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(ServiceConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration from {:?}", path);
                ServiceConfig::from_file(path)?
            }
            None => ServiceConfig::default(),
        };

        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(data) = self.data {
            config.data.path = data;
        }
        if self.seed.is_some() {
            config.model.seed = self.seed;
        }
        if self.snapshot.is_some() {
            config.model.snapshot_path = self.snapshot;
        }

        config.validate()?;
        Ok((config, self.evaluate))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spam_predictor=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting spam-predictor v{}", env!("CARGO_PKG_VERSION"));

    let (config, evaluate) = Cli::parse().into_config()?;

    let corpus = Corpus::from_csv(&config.data.path)?;
    info!("Loaded {} rows from {:?}", corpus.len(), config.data.path);

    let model = match &config.model.snapshot_path {
        Some(snapshot) => {
            if evaluate {
                warn!("--evaluate is ignored when a model snapshot is configured");
            }
            SpamModel::load_or_train_if_stale(
                snapshot,
                &config.data.path,
                &corpus,
                config.model.test_ratio,
                config.model.seed,
            )?
        }
        None => {
            let (model, split) =
                SpamModel::train(&corpus, config.model.test_ratio, config.model.seed)?;
            if evaluate {
                info!(
                    "Held-out accuracy: {:.2}% over {} messages",
                    model.evaluate_on(&split.test) * 100.0,
                    split.test.len()
                );
            }
            model
        }
    };

    let app = router(Arc::new(AppContext::new(corpus, model)));

    let addr = config.bind_addr();
    info!("Starting web api server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
