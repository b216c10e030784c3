use osu_recent_bot::config::Settings;
use osu_recent_bot::messaging::client::initialize_messaging;
use osu_recent_bot::osu::client::Osu;

use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = Settings::new()?;

    // RUST_LOG directives, when set, refine the configured level.
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(settings.get_trace_level()).into())
        .from_env_lossy();
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

    let osu = Osu::from_settings(&settings)?;
    info!("osu! API client ready for {}", osu.base_url());

    info!("Initializing messaging engine.");
    initialize_messaging(&settings, osu).await?;

    Ok(())
}
