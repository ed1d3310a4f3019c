//! Command-line interface.
//!
//! Flags override the YAML file and the environment (see
//! [`crate::config::loader`]).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::api::build_schema;
use crate::config::{load_config, ServerConfig};
use crate::db::Database;
use crate::error::Result;
use crate::http::run_http_server;

#[derive(Debug, Parser)]
#[command(name = "authorship", version, about = "Read-only GraphQL API over authors and articles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the GraphQL API over HTTP.
    Serve(ServeArgs),
    /// Drop and recreate the schema, then exit. Destroys all data.
    InitDb(StoreArgs),
    /// Print the GraphQL schema (SDL) and exit.
    Schema,
}

/// Options shared by every command that touches the store.
#[derive(Debug, Clone, Default, Args)]
pub struct StoreArgs {
    /// YAML config file.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Connection string: SQLite path, `file:` URI, or `:memory:`.
    #[arg(long, short = 'd')]
    pub database: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Address to bind, e.g. `0.0.0.0:5000`.
    #[arg(long, short = 'l')]
    pub listen: Option<String>,

    /// Drop and recreate the schema before serving.
    #[arg(long)]
    pub init_db: bool,

    /// Do not serve the GraphiQL explorer.
    #[arg(long)]
    pub no_graphiql: bool,
}

impl StoreArgs {
    /// Merge the store flags over an already loaded config.
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(db) = &self.database {
            config.database = db.clone();
        }
    }
}

impl ServeArgs {
    /// Merge these flags, store flags included, over an already loaded
    /// config.
    pub fn apply(&self, config: &mut ServerConfig) {
        self.store.apply(config);
        if let Some(listen) = &self.listen {
            config.listen = listen.clone();
        }
        if self.init_db {
            config.init_db = true;
        }
        if self.no_graphiql {
            config.graphiql = false;
        }
    }
}

/// Load the config file and environment, then let `merge` lay the
/// command's flags on top. Each flag is applied exactly once.
fn resolve(store: &StoreArgs, merge: impl FnOnce(&mut ServerConfig)) -> Result<ServerConfig> {
    let mut config = load_config(store.config.as_deref())?;
    merge(&mut config);
    Ok(config)
}

/// Run a parsed command line to completion.
pub async fn run(cli: Cli) -> std::result::Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Serve(args) => {
            let config = resolve(&args.store, |config| args.apply(config))?;

            let db = Database::open(&config.database)?;
            if config.init_db {
                db.initialize()?;
            }
            run_http_server(db, &config.listen, config.graphiql).await
        }
        Command::InitDb(args) => {
            let config = resolve(&args, |config| args.apply(config))?;
            Database::open(&config.database)?.initialize()?;
            tracing::info!("initialized schema in {}", config.database);
            Ok(())
        }
        Command::Schema => {
            println!("{}", build_schema().sdl());
            Ok(())
        }
    }
}
