use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use formforge::config::ServerConfig;
use formforge::forms::{FormService, ImportedForm};
use formforge::server::{AppState, create_router};
use formforge::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "formforge")]
#[command(about = "A backend for form-builder applications", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct StorageArgs {
    /// Data directory for the database
    #[arg(long, env = "FORMFORGE_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Database name (the file is <data-dir>/<db-name>.db)
    #[arg(long, env = "FORMFORGE_DB_NAME", default_value = "formforge")]
    db_name: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, env = "FORMFORGE_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, env = "FORMFORGE_PORT", default_value = "8080")]
        port: u16,

        #[command(flatten)]
        storage: StorageArgs,

        /// Maximum number of forms returned by a listing
        #[arg(long, env = "FORMFORGE_LIST_LIMIT", default_value = "100")]
        list_limit: usize,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Initialize the database
    Init {
        #[command(flatten)]
        storage: StorageArgs,
    },

    /// Import form documents exported from an earlier deployment
    Import {
        #[command(flatten)]
        storage: StorageArgs,

        /// JSON file holding an array of form documents
        #[arg(long)]
        file: PathBuf,
    },
}

impl StorageArgs {
    fn config(self) -> ServerConfig {
        ServerConfig {
            data_dir: self.data_dir,
            db_name: self.db_name,
            ..ServerConfig::default()
        }
    }
}

fn open_initialized_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
    let db_path = config.db_path();
    if !db_path.exists() {
        bail!(
            "Database not found at {}. Run 'formforge admin init' first.",
            db_path.display()
        );
    }

    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;
    Ok(store)
}

fn run_init(config: &ServerConfig) -> anyhow::Result<()> {
    config.validate()?;
    config.ensure_data_dir()?;

    let db_path = config.db_path();
    let existed = db_path.exists();

    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;
    store.close()?;

    if existed {
        println!("Database already initialized at {}", db_path.display());
    } else {
        println!("Initialized database at {}", db_path.display());
    }
    Ok(())
}

fn run_import(config: &ServerConfig, file: &Path) -> anyhow::Result<()> {
    let store = Arc::new(open_initialized_store(config)?);
    let forms = FormService::new(store.clone());

    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let documents: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .with_context(|| format!("{} does not hold a JSON array", file.display()))?;

    let mut imported = 0usize;
    for (index, value) in documents.into_iter().enumerate() {
        let doc: ImportedForm = serde_json::from_value(value)
            .with_context(|| format!("Document {index} is not a valid form"))?;
        let form = forms
            .import(doc)
            .with_context(|| format!("Failed to import document {index}"))?;
        info!(id = %form.id, "imported form");
        imported += 1;
    }

    let total = store.count_forms()?;
    store.close()?;

    println!("Imported {imported} form(s); {total} form(s) in store");
    Ok(())
}

async fn run_serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;
    let store: Arc<dyn Store> = Arc::new(open_initialized_store(&config)?);

    let state = Arc::new(AppState::new(Arc::clone(&store), config.list_limit));

    let app = create_router(state);
    let addr = config.socket_addr()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down, closing store");
    store.close()?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("formforge=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Init { storage } => {
                run_init(&storage.config())?;
            }
            AdminCommands::Import { storage, file } => {
                run_import(&storage.config(), &file)?;
            }
        },
        Commands::Serve {
            host,
            port,
            storage,
            list_limit,
        } => {
            let config = ServerConfig {
                host,
                port,
                list_limit,
                ..storage.config()
            };
            run_serve(config).await?;
        }
    }

    Ok(())
}
