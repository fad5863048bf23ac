reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(sql);
reexport!(logic);
reexport!(query);
reexport!(metadata);
reexport!(correction);
reexport!(session);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlguard", version, about = "Read-only SQL gate for LLM-assisted SQLite analysis")]
struct Cli {
    /// Evidence database, overriding SQLGUARD_DATABASE.
    #[arg(long, global = true)]
    database: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a statement without running it.
    Validate { sql: String },
    /// Validate and run a statement, letting the model correct it once on failure.
    Query { sql: String },
    /// Print the schema context given to the model.
    Schema {
        #[arg(long)]
        no_samples: bool,
    },
    /// Print the chat system prompt for the loaded database.
    Prompt,
    /// Tables, columns and relationships as JSON.
    Diagram,
    /// Search every column of every table for a term.
    Search {
        term: String,
        #[arg(long)]
        case_sensitive: bool,
    },
    /// Integrity-check and hash the database.
    Inspect,
    /// Probe the configured model provider.
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::from_env()?;

    if let Command::Validate { sql } = &cli.command {
        let verdict = validate(sql);
        print_json(&verdict.report())?;
        return Ok(if verdict.is_accepted() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let model = HttpChatModel::from_config(&config)?;
    if let Command::Status = cli.command {
        print_json(&model.status().await)?;
        return Ok(ExitCode::SUCCESS);
    }

    let database = cli.database.or(config.database).ok_or_else(|| {
        Error::InvalidInput("No database loaded (pass --database or set SQLGUARD_DATABASE)".into())
    })?;
    let session = Session::open(database, Arc::new(model), config.schema_cache_capacity).await?;

    match cli.command {
        Command::Query { sql } => {
            let outcome = session.run(&sql).await;
            print_json(&outcome.to_response())?;
            if !outcome.is_completed() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Schema { no_samples } => println!("{}", session.schema_context(!no_samples).await?),
        Command::Prompt => println!("{}", session.system_prompt().await?),
        Command::Diagram => print_json(&session.diagram().await?)?,
        Command::Search {
            term,
            case_sensitive,
        } => print_json(&session.search(&term, case_sensitive).await?)?,
        Command::Inspect => print_json(&serde_json::json!({
            "database": session.database(),
            "sha256": session.sha256(),
        }))?,
        Command::Validate { .. } | Command::Status => {}
    }
    Ok(ExitCode::SUCCESS)
}

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}
