use anyhow::Result;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use treemark_core::alfred::{AlfredItem, AlfredResult};
use treemark_core::runtime::{LOG_ENV, WorkflowConfig};
use treemark_core::workflow::run;

/// Every argument is user text from the launcher, so the usual help and version
/// flags are turned off and hyphen-leading words are accepted as the query.
#[derive(Debug, Parser)]
#[command(
    name = "treemark",
    version,
    about = "Alfred script filter for SourceTree bookmarks",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    #[arg(value_name = "QUERY", allow_hyphen_values = true)]
    query: Option<String>,
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<String>,
}

impl Cli {
    fn into_query(self) -> String {
        self.query.unwrap_or_default()
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let query = match Cli::try_parse() {
        Ok(cli) => cli.into_query(),
        Err(error) => {
            warn!(%error, "failed to parse arguments, using empty query");
            String::new()
        }
    };

    let result = match WorkflowConfig::from_process() {
        Ok(config) => {
            debug!("resolved config\n{}", config.diagnostics());
            run(&config, &query).into_result(&config)
        }
        Err(error) => {
            warn!("{error:#}");
            AlfredResult::single(AlfredItem::message(
                "Error occurred",
                format!("{error:#}"),
            ))
        }
    };

    println!("{}", result.to_pretty_json()?);
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
