use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gymkit",
    about = "Gymkit - routines API server and client",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub serve: ServeArgs,

    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (default if no command specified)")]
    Serve,

    #[command(subcommand, about = "Manage routines through the API")]
    Routines(RoutineCommands),

    #[command(about = "Sign in and print the session token")]
    Login {
        #[arg(long, help = "Account email")]
        email: String,

        #[arg(long, env = "GYMKIT_PASSWORD", help = "Account password")]
        password: String,
    },

    #[command(about = "Show the current session")]
    Whoami,
}

#[derive(clap::Args, Clone, Debug)]
pub struct ServeArgs {
    #[arg(short, long, env = "GYMKIT_PORT", default_value = "8045")]
    pub port: u16,

    #[arg(long, env = "GYMKIT_BIND", default_value = "127.0.0.1")]
    pub bind: String,

    #[arg(long, default_value = "/auth", help = "Public sign-in page")]
    pub sign_in_path: String,

    #[arg(long, default_value = "/api/auth", help = "Auth API prefix, reachable without a session")]
    pub auth_api_prefix: String,

    #[arg(long, default_value = "/_next", help = "Framework asset prefix")]
    pub asset_prefix: String,

    #[arg(long, env = "GYMKIT_STATIC_DIR", default_value = "./web/dist")]
    pub static_dir: String,

    #[arg(
        long,
        env = "GYMKIT_ENABLE_MOCK",
        help = "Seed development routines and inject mocked failures"
    )]
    pub mock: bool,
}

#[derive(Subcommand)]
pub enum RoutineCommands {
    #[command(about = "List routines")]
    List {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Show one routine")]
    Show {
        #[arg(help = "Routine id")]
        slug: String,
    },

    #[command(about = "Create a routine")]
    Create {
        #[arg(help = "Routine name, e.g. \"Leg Day\"")]
        name: String,

        #[arg(short, long, help = "Optional description")]
        description: Option<String>,
    },

    #[command(about = "Rename or re-describe a routine")]
    Update {
        #[arg(help = "Routine id")]
        slug: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    #[command(about = "Delete a routine")]
    Delete {
        #[arg(help = "Routine id")]
        slug: String,
    },
}
