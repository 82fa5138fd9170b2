use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use portal::commands;
use portal_models::user::UserRole;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let config = portal_config::load(&[&cli.config]).context("Failed to load config")?;

    match cli.command {
        Command::Login {
            email,
            password,
            redirect,
        } => commands::login(config, email, password, redirect.as_deref()).await?,
        Command::Register {
            role,
            name,
            email,
            password,
        } => commands::register(config, role.into(), name, email, password).await?,
        Command::Logout => commands::logout(config)?,
        Command::Status => commands::status(config)?,
        Command::Token => commands::token(config)?,
        Command::Guard { route } => commands::guard(config, &route)?,
        Command::CheckConfig { verbose } => {
            verbose.then(|| println!("{config:#?}"));
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Path to the config file
    #[arg(
        long,
        env = "PORTAL_CONFIG",
        default_value = portal_config::DEFAULT_CONFIG_PATH,
        global = true
    )]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and persist the session
    #[command(aliases(["l", "signin"]))]
    Login {
        /// The account email address
        email: String,
        /// The account password
        password: String,
        /// Route to return to after signing in
        #[arg(long)]
        redirect: Option<String>,
    },
    /// Create a new account
    #[command(aliases(["signup"]))]
    Register {
        /// The role of the new account
        #[arg(long, value_enum, default_value_t = RoleArg::Candidate)]
        role: RoleArg,
        /// The display name of the new account
        name: String,
        /// The email address of the new account
        email: String,
        /// The password of the new account
        password: String,
    },
    /// Drop the current session
    #[command(aliases(["signout"]))]
    Logout,
    /// Show the current session
    #[command(aliases(["s", "whoami"]))]
    Status,
    /// Print the current access token
    Token,
    /// Check whether the current session may navigate to a route
    #[command(aliases(["g"]))]
    Guard {
        /// The route to check, e.g. /vagas
        route: String,
    },
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum RoleArg {
    Candidate,
    Company,
    Admin,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Candidate => UserRole::Candidate,
            RoleArg::Company => UserRole::Company,
            RoleArg::Admin => UserRole::Admin,
        }
    }
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}
