//! Project manager binary - serves the HTTP API over the user service.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_lib::config::GatewayConfig;
use user_service_lib::config::UserServiceConfig;

#[derive(Parser)]
#[command(name = "project-manager")]
#[command(about = "User accounts and authentication API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind host, overrides GATEWAY_HOST
        #[arg(long)]
        host: Option<String>,
        /// Bind port, overrides GATEWAY_PORT
        #[arg(long)]
        port: Option<u16>,
        /// Keep users in memory instead of the database
        #[arg(long)]
        in_memory: bool,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateAction> for user_service_lib::MigrateAction {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => Self::Up,
            MigrateAction::Down => Self::Down,
            MigrateAction::Status => Self::Status,
            MigrateAction::Fresh => Self::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            in_memory,
        } => {
            let mut config = GatewayConfig::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let user_service = if in_memory {
                user_service_lib::in_memory()
            } else {
                user_service_lib::connect(&UserServiceConfig::from_env()).await?
            };

            info!("Starting project manager on http://{}", config.bind_address());
            gateway_lib::run(user_service, config).await?;
        }
        Commands::Migrate { action } => {
            user_service_lib::run_migrations(action.into()).await?;
        }
    }

    Ok(())
}
