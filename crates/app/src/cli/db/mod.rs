use std::time::Duration;

use clap::{Args, Subcommand};
use shopfront_app::database::DatabaseSettings;

mod migrate;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    Migrate(migrate::MigrateArgs),
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate(args) => migrate::run(args).await,
    }
}

/// Connection arguments shared by database commands.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// `PostgreSQL` host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    db_host: String,

    /// `PostgreSQL` port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    db_port: u16,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "postgres")]
    db_name: String,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "postgres", hide_env_values = true)]
    db_password: String,

    /// `require` enables TLS
    #[arg(long, env = "PGSSLMODE")]
    pgsslmode: Option<String>,
}

impl DatabaseArgs {
    pub(crate) fn settings(&self) -> DatabaseSettings {
        DatabaseSettings {
            host: self.db_host.clone(),
            port: self.db_port,
            name: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            require_tls: self.pgsslmode.as_deref() == Some("require"),
            max_connections: 1,
            min_connections: 0,
            idle_timeout: None,
            acquire_timeout: Some(Duration::from_secs(30)),
            statement_timeout: None,
        }
    }
}
