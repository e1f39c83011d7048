use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use locale_gate::config::{load_or_default, GateConfig};
use locale_gate::routing::{verify_consistency, LocaleRouter, RuleTable};

#[derive(Parser)]
#[command(name = "locale-cli")]
#[command(about = "Offline tooling for the locale gate", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "LOCALE_GATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the decision for a request path
    Decide {
        /// Request path, e.g. /en-US/services
        path: String,
        /// Raw query string without the leading '?'
        #[arg(short, long)]
        query: Option<String>,
        /// Value of the locale preference cookie
        #[arg(long)]
        cookie: Option<String>,
    },
    /// Print the fallback redirect rule table as JSON
    Rules,
    /// Validate the configuration and the rule table consistency
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = load_or_default(cli.config.as_deref())?;
    let router = LocaleRouter::from_config(&config)?;

    match cli.command {
        Commands::Decide {
            path,
            query,
            cookie,
        } => {
            let decision = router.decide(&path, query.as_deref(), cookie.as_deref());
            println!("{}", serde_json::to_string_pretty(&decision)?);
        }
        Commands::Rules => {
            println!("{}", rule_table(&router, &config).to_json()?);
        }
        Commands::Check => {
            let table = rule_table(&router, &config);
            if let Err(errors) = verify_consistency(&router, &table) {
                for e in &errors {
                    eprintln!("inconsistent: {e}");
                }
                return Ok(ExitCode::FAILURE);
            }
            let summary = json!({
                "status": "ok",
                "default": router.locales().default_locale(),
                "supported": router.locales().iter().collect::<Vec<_>>(),
                "rules": table.rules().len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn rule_table(router: &LocaleRouter, config: &GateConfig) -> RuleTable {
    RuleTable::from_locales(router.locales(), &config.locales.cookie_name)
}
