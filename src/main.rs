use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edumanage::api::{self, AppState};
use edumanage::config::AppConfig;
use edumanage::error::Error;
use edumanage::session::{FileSessionStorage, Session};
use edumanage::store::Stores;
use edumanage::views::Shell;

#[derive(Parser)]
#[command(name = "edumanage")]
#[command(about = "School management dashboard with simulated data")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with one of the demo accounts
    Login {
        /// Account email
        email: String,

        /// Password (not checked)
        #[arg(short, long, default_value = "")]
        password: String,
    },
    /// Log in through the simulated Google sign-in
    LoginGoogle,
    /// Forget the current session
    Logout,
    /// Print the logged-in user
    Whoami,
    /// Render a dashboard tab for the current session
    Show {
        /// Tab name (dashboard, grades, attendance, calendar, subjects,
        /// reports, weather, settings)
        #[arg(default_value = "dashboard")]
        tab: String,
    },
    /// Serve the stores as a JSON API
    Serve {
        /// Port for HTTP API (defaults to EDUMANAGE_PORT or 17020)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Initialize tracing with output to stderr (for rendering commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "edumanage=info,tower_http=debug".into()),
    );

    if use_stderr {
        // Rendering commands print to stdout, keep it clean
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_session(config: &AppConfig) -> anyhow::Result<Arc<Session>> {
    let storage = match &config.session_path {
        Some(path) => FileSessionStorage::new(path),
        None => FileSessionStorage::open_default()?,
    };
    tracing::debug!(path = %storage.path().display(), "Opening session");
    Ok(Arc::new(Session::open(Arc::new(storage), config.latency)))
}

async fn show(config: &AppConfig, tab: &str) -> anyhow::Result<()> {
    let session = open_session(config)?;
    let mut shell = Shell::new(session, Stores::seeded(config.latency), &config.city);
    shell.select_named(tab);
    print!("{}", shell.render().await);
    Ok(())
}

async fn serve(config: &AppConfig, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting EduManage API on port {}", port);

    let state = AppState::new(Stores::seeded(config.latency), config.latency);
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    tracing::info!("EduManage API listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    let config = AppConfig::from_env();

    match cli.command {
        Some(Commands::Login { email, password }) => {
            let session = open_session(&config)?;
            match session.login(&email, &password).await {
                Ok(user) => println!("Sesión iniciada: {} ({})", user.name, user.role),
                Err(Error::InvalidCredentials) => {
                    anyhow::bail!("Credenciales inválidas para {}", email)
                }
                Err(e) => return Err(e).context("Login failed"),
            }
        }
        Some(Commands::LoginGoogle) => {
            let session = open_session(&config)?;
            let user = session
                .login_with_google()
                .await
                .context("Google login failed")?;
            println!("Sesión iniciada con Google: {} ({})", user.name, user.role);
        }
        Some(Commands::Logout) => {
            open_session(&config)?
                .logout()
                .context("Failed to clear session")?;
            println!("Sesión cerrada");
        }
        Some(Commands::Whoami) => match open_session(&config)?.current_user() {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
            None => println!("No hay sesión iniciada"),
        },
        Some(Commands::Show { tab }) => show(&config, &tab).await?,
        Some(Commands::Serve { port }) => serve(&config, port.unwrap_or(config.port)).await?,
        None => show(&config, "dashboard").await?,
    }

    Ok(())
}
