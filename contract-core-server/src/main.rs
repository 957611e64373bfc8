//! Contract Core server entry point
//!
//! Configuration is taken from the environment; command-line arguments
//! override it.
//!
//! Usage:
//!   contract-core serve            - Start the API server
//!   contract-core seed             - Load demo clients and templates
//!   contract-core backfill-audits  - Bootstrap audit entries for old rows

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contract_core_api::domain::context::OpContext;
use contract_core_db::store::{ContractStore, MemoryStore};
use contract_core_postgres::repository::db_init;
use contract_core_postgres::PostgresRepositories;
use contract_core_server::seed::seed_demo_data;
use contract_core_server::state::{ApiConfig, AppState};
use contract_core_server::{pdf, server};

/// Contract lifecycle engine
#[derive(Parser, Debug)]
#[command(name = "contract-core")]
#[command(version)]
#[command(about = "Contract drafting, template versioning, and signature tracking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the API server
    Serve {
        /// Listen address (env: CONTRACT_CORE_ADDR)
        #[arg(long, env = "CONTRACT_CORE_ADDR", default_value = "0.0.0.0:8080")]
        addr: String,

        /// Postgres connection string; omitted, the server runs on an
        /// in-memory store seeded with demo data (env: DATABASE_URL)
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Directory for rendered HTML and PDF artifacts
        /// (env: CONTRACT_CORE_ARTIFACTS)
        #[arg(long, env = "CONTRACT_CORE_ARTIFACTS", default_value = "./artifacts")]
        artifacts: PathBuf,

        /// Allow cross-origin requests from any origin
        /// (env: CONTRACT_CORE_CORS)
        #[arg(long, env = "CONTRACT_CORE_CORS")]
        cors: bool,
    },

    /// Load the demo client book and template catalogue into Postgres
    Seed {
        /// Postgres connection string (env: DATABASE_URL)
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },

    /// Write bootstrap audit entries for contracts created before auditing
    BackfillAudits {
        /// Postgres connection string (env: DATABASE_URL)
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        /// Directory for rendered HTML and PDF artifacts
        /// (env: CONTRACT_CORE_ARTIFACTS)
        #[arg(long, env = "CONTRACT_CORE_ARTIFACTS", default_value = "./artifacts")]
        artifacts: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            addr,
            database_url,
            artifacts,
            cors,
        } => {
            let store: Arc<dyn ContractStore> = match database_url {
                Some(url) => Arc::new(connect(&url).await?),
                None => {
                    tracing::warn!(
                        "DATABASE_URL not set; running on an in-memory store with demo data"
                    );
                    let store = MemoryStore::new();
                    seed_demo_data(&store).await?;
                    Arc::new(store)
                }
            };

            let state = AppState::new(store, artifacts, pdf::default_backends());
            let config = ApiConfig {
                addr,
                enable_cors: cors,
            };

            server::run_server(&config, state)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }

        Commands::Seed { database_url } => {
            let repos = connect(&database_url).await?;
            let summary = seed_demo_data(&repos).await?;

            tracing::info!(
                person = %summary.person_id,
                ie_client = %summary.ie_client_id,
                uk_client = %summary.uk_client_id,
                letting_template = %summary.letting_template_id,
                ast_template = %summary.ast_template_id,
                "demo data seeded"
            );
        }

        Commands::BackfillAudits {
            database_url,
            artifacts,
        } => {
            let repos = connect(&database_url).await?;
            let state = AppState::new(Arc::new(repos), artifacts, Vec::new());

            let written = state.service.backfill_audits(&OpContext::system()).await?;
            tracing::info!(written, "audit backfill complete");
        }
    }

    Ok(())
}

/// Connect to Postgres and bring the schema up to date.
async fn connect(database_url: &str) -> anyhow::Result<PostgresRepositories> {
    let repos = PostgresRepositories::connect(database_url).await?;
    db_init::init_database(&repos.pool).await?;
    Ok(repos)
}

/// Initialize logging with tracing
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contract_core_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
