use clap::{Parser, Subcommand};

use warden_core::auth::password::Argon2Hasher;
use warden_core::seed::Bootstrap;
use warden_core::seed::confirm::{AssumeYes, Confirm, StdinConfirm};
use warden_core::store::{SqlPermissionStore, SqlRoleStore, SqlUserStore};
use warden_core::{Config, WardenError, console, db, logging};

#[derive(Parser)]
#[command(name = "warden")]
#[command(about = "Seed and bootstrap an RBAC dataset: permissions, roles, users")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbCommands,
    },
}

#[derive(Subcommand)]
enum DbCommands {
    /// Run pending migrations
    Migrate,
    /// Seed the RBAC dataset (permissions, then roles, then users)
    Seed {
        /// Answer yes to every stage prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    logging::init_logging();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        console::error(format!("Error in setup: {err}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), WardenError> {
    let config = Config::from_env();

    match cli.command {
        Commands::Db { action } => match action {
            DbCommands::Migrate => {
                let db = db::connect(&config).await?;
                db::run_migrations(&db).await?;
            }
            DbCommands::Seed { yes } => {
                let db = db::connect(&config).await?;
                db::run_migrations(&db).await?;

                let permissions = SqlPermissionStore::new(db.clone());
                let roles = SqlRoleStore::new(db.clone());
                let users = SqlUserStore::new(db.clone());
                let hasher = Argon2Hasher::from_config(&config)?;

                let confirm: Box<dyn Confirm> = if yes || config.assume_yes {
                    Box::new(AssumeYes)
                } else {
                    Box::new(StdinConfirm)
                };

                let bootstrap = Bootstrap {
                    permissions: &permissions,
                    roles: &roles,
                    users: &users,
                    hasher: &hasher,
                    confirm: confirm.as_ref(),
                };
                let report = bootstrap.run().await?;
                tracing::debug!(?report, "bootstrap finished");
            }
        },
    }

    Ok(())
}
