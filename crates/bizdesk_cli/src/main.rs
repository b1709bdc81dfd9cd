//! `bizdesk` command line entry point.
//!
//! # Responsibility
//! - Expose tax-code checks and a dashboard demo over `bizdesk_core`.
//! - Optionally start core file logging before running a command.

mod demo;

use bizdesk_core::{
    check_character, core_version, default_log_level, init_logging, validate_tax_code, CoreConfig,
    DashboardStatsLoader, LoadOutcome, LogPresenter, LogSurface, NotificationCenter, PeriodKey,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde_json::json;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process;
use std::rc::Rc;
use std::sync::Arc;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Client, invoice and cost desk tools.
#[derive(Parser)]
#[command(name = "bizdesk", version, about = "Client, invoice and cost desk tools")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Italian tax code (codice fiscale) checks
    TaxCode {
        #[command(subcommand)]
        command: TaxCodeCommands,
    },

    /// Run the dashboard against built-in sample data
    Demo {
        #[command(subcommand)]
        command: DemoCommands,
    },

    /// Core configuration helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print CLI and core versions
    Version,
}

#[derive(Subcommand)]
enum TaxCodeCommands {
    /// Validate one or more tax codes; exits 1 if any is invalid
    Validate {
        /// Codes to validate
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Compute the check character for the first 15 characters of a code
    CheckChar {
        /// First 15 characters of the code
        prefix: String,
    },
}

#[derive(Subcommand)]
enum DemoCommands {
    /// Load dashboard statistics for one period
    Dashboard {
        /// Year to load, or `all`
        #[arg(long, default_value = "all")]
        year: String,
        /// Path to a core config JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Load and validate a core config JSON file
    Check {
        /// Path to the config file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
            report_error(&err.to_string(), cli.output);
            process::exit(1);
        }
    }

    let code = match cli.command {
        Commands::TaxCode { command } => match command {
            TaxCodeCommands::Validate { codes } => cmd_validate(&codes, cli.output),
            TaxCodeCommands::CheckChar { prefix } => cmd_check_char(&prefix, cli.output),
        },
        Commands::Demo { command } => match command {
            DemoCommands::Dashboard { year, config } => {
                cmd_demo_dashboard(&year, config.as_deref(), cli.output)
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Check { file } => cmd_config_check(&file, cli.output),
        },
        Commands::Version => cmd_version(cli.output),
    };
    process::exit(code);
}

fn cmd_validate(codes: &[String], output: OutputFormat) -> i32 {
    let results: Vec<_> = codes
        .iter()
        .map(|code| (code, validate_tax_code(code)))
        .collect();
    let invalid = results.iter().filter(|(_, result)| result.is_err()).count();
    info!(
        "event=tax_code_validate module=cli status=ok checked={} invalid={}",
        results.len(),
        invalid
    );

    match output {
        OutputFormat::Text => {
            for (code, result) in &results {
                match result {
                    Ok(valid) => println!("{valid}: valid"),
                    Err(err) => println!("{code}: invalid ({err})"),
                }
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = results
                .iter()
                .map(|(code, result)| match result {
                    Ok(valid) => json!({ "code": valid.as_str(), "valid": true }),
                    Err(err) => json!({ "code": code, "valid": false, "error": err.to_string() }),
                })
                .collect();
            println!("{}", serde_json::Value::Array(entries));
        }
    }

    if invalid == 0 {
        0
    } else {
        1
    }
}

fn cmd_check_char(prefix: &str, output: OutputFormat) -> i32 {
    let Some(check) = check_character(prefix) else {
        report_error(
            &format!("`{prefix}` is not 15 letters or digits"),
            output,
        );
        return 1;
    };
    match output {
        OutputFormat::Text => println!("{check}"),
        OutputFormat::Json => println!(
            "{}",
            json!({
                "prefix": prefix.trim().to_ascii_uppercase(),
                "check_character": check.to_string(),
            })
        ),
    }
    0
}

fn cmd_demo_dashboard(year: &str, config_path: Option<&Path>, output: OutputFormat) -> i32 {
    let period = match PeriodKey::from_selector(year) {
        Ok(period) => period,
        Err(err) => {
            report_error(&err.to_string(), output);
            return 1;
        }
    };
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(message) => {
            report_error(&message, output);
            return 1;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            report_error(&format!("failed to start runtime: {err}"), output);
            return 1;
        }
    };

    let notifications = Rc::new(RefCell::new(NotificationCenter::new(
        config.notifications,
        Box::new(LogSurface),
        Box::new(LogPresenter),
    )));
    let loader = DashboardStatsLoader::new(
        Arc::new(demo::sample_source()),
        Box::new(demo::PrintView::new(output)),
        notifications.clone(),
        config.dashboard,
    );

    let outcome = runtime.block_on(loader.load(period));
    let center = notifications.borrow();
    let posted = center.active();

    match (outcome, output) {
        (LoadOutcome::Applied, OutputFormat::Text) | (LoadOutcome::Failed, OutputFormat::Text) => {
            for notification in &posted {
                println!(
                    "notification [{}] {}",
                    notification.severity.as_str(),
                    notification.message
                );
            }
        }
        (LoadOutcome::Failed, OutputFormat::Json) => {
            if let Some(notification) = posted.first() {
                report_error(&notification.message, output);
            }
        }
        _ => {}
    }

    match outcome {
        LoadOutcome::Applied => 0,
        LoadOutcome::Failed | LoadOutcome::Superseded => 1,
    }
}

fn cmd_config_check(path: &Path, output: OutputFormat) -> i32 {
    match CoreConfig::from_json_file(path) {
        Ok(config) => {
            match output {
                OutputFormat::Text => println!("{}: ok", path.display()),
                OutputFormat::Json => match serde_json::to_string_pretty(&config) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(err) => {
                        report_error(&format!("failed to render config: {err}"), output);
                        return 1;
                    }
                },
            }
            0
        }
        Err(err) => {
            report_error(&err.to_string(), output);
            1
        }
    }
}

fn cmd_version(output: OutputFormat) -> i32 {
    match output {
        OutputFormat::Text => println!(
            "bizdesk {} (core {})",
            env!("CARGO_PKG_VERSION"),
            core_version()
        ),
        OutputFormat::Json => println!(
            "{}",
            json!({ "cli": env!("CARGO_PKG_VERSION"), "core": core_version() })
        ),
    }
    0
}

fn load_config(path: Option<&Path>) -> Result<CoreConfig, String> {
    match path {
        Some(path) => CoreConfig::from_json_file(path).map_err(|err| err.to_string()),
        None => Ok(CoreConfig::default()),
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat) {
    match output {
        OutputFormat::Text => eprintln!("{msg}"),
        OutputFormat::Json => eprintln!("{}", json!({ "error": msg })),
    }
}
