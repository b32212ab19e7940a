use orbdeck::cli::{parse_args, version_string, CliCommand};
use orbdeck::config::PluginConfig;
use orbdeck::plugin;

use color_eyre::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log to stderr; the host owns stdout.
fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle --version before any initialization
    let command = parse_args(std::env::args())?;
    let launch = match command {
        CliCommand::Version => {
            println!("{}", version_string());
            return Ok(());
        }
        CliCommand::Run(launch) => launch,
    };

    color_eyre::install()?;
    setup_logging();

    let config = PluginConfig::from_env()?;
    tracing::info!(
        version = orbdeck::cli::VERSION,
        uuid = %launch.plugin_uuid,
        mode = ?config.update_mode,
        "Starting plugin"
    );
    if let Some(info) = &launch.info {
        tracing::debug!(%info, "Host info");
    }

    plugin::run(launch, config).await?;
    Ok(())
}
