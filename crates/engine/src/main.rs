//! Charsheet - command-line entry point.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use charsheet_engine::api::{self, Cli};
use charsheet_engine::infrastructure::config::AppConfig;
use charsheet_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charsheet_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(store) = cli.store {
        config = config.with_store_path(store);
    }
    if let Some(spells) = cli.spells {
        config = config.with_spells_csv(spells);
    }
    tracing::debug!(?config, "Loaded configuration");

    let app = App::load(&config)
        .await
        .with_context(|| format!("failed to load spells from {}", config.spells_csv.display()))?;

    let output = api::run(&app, cli.command).await?;
    println!("{}", output);
    Ok(())
}

fn load_dotenv() {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = std::path::Path::new(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
