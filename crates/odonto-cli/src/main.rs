use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

mod bootstrap;
mod commands;

use bootstrap::{AppBootstrap, Overrides};
use commands::{
    AppointmentAction, ClientAction, ProfessionalAction, TreatmentAction, UserAction,
};

#[derive(Parser)]
#[command(name = "odonto")]
#[command(about = "Odonto - clinic management client", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:3333/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log level filter (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Create an account and sign in with it
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long, default_value = "CLIENT")]
        role: String,
    },
    /// Clinic statistics
    Stats,
    /// Manage clients
    Clients {
        #[command(subcommand)]
        action: ClientAction,
    },
    /// Manage treatments
    Treatments {
        #[command(subcommand)]
        action: TreatmentAction,
    },
    /// Manage appointments
    Appointments {
        #[command(subcommand)]
        action: AppointmentAction,
    },
    /// Manage professionals
    Professionals {
        #[command(subcommand)]
        action: ProfessionalAction,
    },
    /// Manage staff accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let app = AppBootstrap::start(Overrides {
        config: cli.config,
        api_url: cli.api_url,
        log_level: cli.log_level,
    })
    .await?;
    let ctx = &app.context;

    let outcome = match cli.command {
        Commands::Login { email, password } => commands::session::login(ctx, &email, password).await,
        Commands::Logout => commands::session::logout(ctx).await,
        Commands::Whoami => commands::session::whoami(ctx).await,
        Commands::Signup {
            name,
            email,
            password,
            role,
        } => commands::session::signup(ctx, &name, &email, password, &role).await,
        Commands::Stats => commands::dashboard::stats(ctx).await,
        Commands::Clients { action } => commands::clients::run(ctx, action).await,
        Commands::Treatments { action } => commands::treatments::run(ctx, action).await,
        Commands::Appointments { action } => commands::appointments::run(ctx, action).await,
        Commands::Professionals { action } => commands::professionals::run(ctx, action).await,
        Commands::Users { action } => commands::users::run(ctx, action).await,
    };

    Ok(commands::report(outcome))
}
