//! Gymkit Server
//!
//! A pure Rust HTTP server that:
//! - Provides the routines REST API on /api/routines
//! - Provides email/password auth on /api/auth
//! - Redirects unauthenticated navigation to the sign-in page
//! - Serves the web UI as static files
//!
//! The same binary doubles as a CLI client for the API.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod commands;
mod router;
mod server_utils;
mod state;

#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands, ServeArgs};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match cli.command {
        None | Some(Commands::Serve) => serve(cli.serve).await,
        Some(Commands::Routines(cmd)) => commands::handle_routine_command(cmd).await,
        Some(Commands::Login { email, password }) => commands::handle_login(email, password).await,
        Some(Commands::Whoami) => commands::handle_whoami().await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    info!("Gymkit Server v{} starting on port {}...", env!("CARGO_PKG_VERSION"), args.port);

    let state = AppState::from_args(&args);
    let app = router::build_router(state, &args.static_dir);

    let listener = server_utils::create_listener(&args.bind, args.port).await?;
    let addr = listener.local_addr()?;

    info!("Server listening on http://{}", addr);
    info!("API available at http://{}/api/", addr);
    info!("Sign-in page at http://{}{}", addr, args.sign_in_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(server_utils::shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
