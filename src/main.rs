use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;

use yoga_app::cli::create_admin;
use yoga_app::config::ServerConfig;
use yoga_app::logging::init_tracing;
use yoga_app::router::init_router;
use yoga_app::state::{init_app_state, init_in_memory_state};
use yoga_db::{Store, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "yoga-app")]
#[command(about = "Yoga studio session booking API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind address (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides PORT)
        #[arg(short = 'p', long)]
        port: Option<u16>,

        /// Serve from a seeded in-memory store instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
    /// Apply pending database migrations
    Migrate,
    /// Create an administrator account
    CreateAdmin {
        #[arg(short = 'f', long)]
        first_name: String,

        #[arg(short = 'l', long)]
        last_name: String,

        #[arg(short = 'e', long)]
        email: String,

        #[arg(short = 'p', long)]
        password: String,
    },
}

fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let mut server_config = ServerConfig::from_env();

    match cli.command {
        Commands::Serve {
            host,
            port,
            in_memory,
        } => {
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }

            init_tracing(&server_config.log_dir)?;

            let state = if in_memory {
                info!("Using seeded in-memory store");
                init_in_memory_state()?
            } else {
                let state = init_app_state(&database_url()?).await?;
                info!("Connected to PostgreSQL");
                state
            };

            let address = server_config
                .bind_address()
                .with_context(|| format!("Invalid bind address {}", server_config.host))?;
            let listener = tokio::net::TcpListener::bind(address)
                .await
                .with_context(|| format!("Failed to bind {address}"))?;

            info!("🚀 Server running on http://{address}");
            info!("📚 Swagger UI available at http://{address}/swagger-ui");
            info!("📖 Scalar UI available at http://{address}/scalar");

            axum::serve(listener, init_router(state))
                .await
                .context("Server error")?;
        }
        Commands::Migrate => {
            let pool = init_db_pool(&database_url()?).await?;
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
        }
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => {
            let pool = init_db_pool(&database_url()?).await?;
            let store = Store::postgres(pool);
            create_admin(&store, &first_name, &last_name, &email, &password).await?;

            println!("✅ Admin created successfully!");
            println!("   Email: {}", email);
            println!("   Name: {} {}", first_name, last_name);
        }
    }

    Ok(())
}
