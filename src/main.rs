mod cli;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use froglet::{ClientConfig, FrogClient, RecordShape};

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "froglet=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig {
        host: cli.host.clone(),
        port: cli.port,
        timeout: Duration::from_secs(cli.timeout),
        server_encoding: cli.encoding,
        shape: if cli.short {
            RecordShape::Short
        } else {
            RecordShape::Extended
        },
        legacy_frog: cli.legacy,
    };
    let mut client = FrogClient::connect(config)?;

    match cli.command {
        Commands::Process { text, format } => {
            cli::process(&mut client, text, format)?;
        }
        Commands::Align { text } => {
            cli::align(&mut client, text)?;
        }
    }

    client.close();
    Ok(())
}
