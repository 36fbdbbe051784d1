use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use wallet_groups::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List wallet groups for a user
    Groups {
        /// Chat user id owning the wallets
        #[arg(short, long)]
        user: i64,
    },
    /// Show balances and render the card for one group
    View {
        #[arg(short, long)]
        user: i64,
        /// Group name, `_ungrouped` or `all`
        group: String,
        /// Directory for rendered cards
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Handle raw callback data such as `wgroup_back`
    Callback {
        #[arg(short, long)]
        user: i64,
        data: String,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

impl From<Commands> for wallet_groups::AppCommand {
    fn from(cmd: Commands) -> wallet_groups::AppCommand {
        match cmd {
            Commands::Groups { user } => wallet_groups::AppCommand::Groups { user_id: user },
            Commands::View { user, group, out } => wallet_groups::AppCommand::View {
                user_id: user,
                group,
                out_dir: out,
            },
            Commands::Callback { user, data, out } => wallet_groups::AppCommand::Callback {
                user_id: user,
                data,
                out_dir: out,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => wallet_groups::cli::setup::setup_at_path(path),
            None => wallet_groups::cli::setup::setup(),
        },
        Some(cmd) => wallet_groups::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
