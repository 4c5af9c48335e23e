use anyhow::Context;
use clap::{Parser, Subcommand};
use adpulse_backend_runtime::{telemetry, BackendServices};
use adpulse_config::{load as load_config, AppConfig};
use adpulse_database::SeedMode;
use adpulse_gateway::{create_router, GatewayState, RealtimeHub};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "adpulse-backend")]
#[command(about = "AdPulse marketing backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Wipe the database and load demo data
    SeedData {
        /// Also load analytics history, AI content, integrations and automation rules
        #[arg(long)]
        advanced: bool,
    },
    /// Delete every row from every table
    ClearData,
    /// Print the row count of every table
    DumpData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,
        Commands::SeedData { advanced } => seed_data(config, advanced).await,
        Commands::ClearData => clear_data(config).await,
        Commands::DumpData => dump_data(config).await,
    }
}

async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    info!("starting AdPulse backend");

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let address = format!("{}:{}", config.http.address, config.http.port);
    let hub = RealtimeHub::new(config.realtime.channel_capacity);
    let state = GatewayState::with_services(services.db_pool, config, services.insights, hub);
    let app = create_router(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(adpulse_backend_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn seed_data(config: AppConfig, advanced: bool) -> anyhow::Result<()> {
    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let mode = if advanced {
        SeedMode::Advanced
    } else {
        SeedMode::Basic
    };
    let report = adpulse_database::seed(&services.db_pool, mode)
        .await
        .context("failed to seed database")?;

    println!("Database seeded ({mode:?}):");
    for (table, count) in &report.counts {
        println!("- {table}: {count}");
    }
    println!("Run 'dump-data' to check the row counts again");
    Ok(())
}

async fn clear_data(config: AppConfig) -> anyhow::Result<()> {
    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    adpulse_database::clear_all(&services.db_pool)
        .await
        .context("failed to clear database")?;

    println!("Database cleared");
    Ok(())
}

async fn dump_data(config: AppConfig) -> anyhow::Result<()> {
    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let counts = adpulse_database::table_counts(&services.db_pool)
        .await
        .context("failed to count rows")?;

    println!("{:<30} {:>8}", "Table", "Rows");
    println!("{}", "-".repeat(39));
    for (table, count) in counts {
        println!("{table:<30} {count:>8}");
    }
    Ok(())
}
