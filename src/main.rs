use mallorkayak::config::AppConfig;
use mallorkayak::models::MALLORCA_ZONES;
use mallorkayak::telegram::TelegramNotifier;
use mallorkayak::weather::ForecastClient;
use mallorkayak::{kayak_forecast, report};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mallorkayak={level},info")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

async fn run(config: &AppConfig) -> anyhow::Result<()> {
    tracing::info!("🛶 MallorKayak starting");
    tracing::info!("📍 Zones to analyze: {}", MALLORCA_ZONES.len());
    tracing::info!(
        "📱 Telegram configured: {}",
        if config.delivery.is_some() { "✅" } else { "❌ (test mode)" }
    );

    let client = ForecastClient::new(&config.weather)?;
    let kayak_report = kayak_forecast::generate_report(&client, config, MALLORCA_ZONES).await?;
    let text = report::render(&kayak_report, config.report.top_n);

    // The report always goes to stdout, whatever happens to delivery
    println!("{text}");

    match &config.delivery {
        Some(delivery) => {
            let notifier = TelegramNotifier::new(delivery)?;
            match notifier.send_report(&text).await {
                Ok(()) => tracing::info!("✅ Report sent to Telegram"),
                // Delivery failure is recoverable, the run still succeeds
                Err(e) => tracing::warn!("⚠️ Could not deliver report to Telegram: {e}"),
            }
        }
        None => {
            tracing::info!("⚠️ Telegram not configured, report printed only");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e:#}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging.level);

    if let Err(e) = run(&config).await {
        tracing::error!("❌ Report generation failed: {e:#}");
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }
}
