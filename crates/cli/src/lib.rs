pub mod commands;
pub mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use goodscart_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(
    name = "goodscart",
    about = "Goodscart terminal cart",
    long_about = "Render a goods catalog as a shopping cart, apply quantity changes, and inspect totals.",
    after_help = "Examples:\n  goodscart show\n  goodscart simulate +0 +1 -- -1\n  goodscart summary --json +0 +0 inc:2\n  goodscart config"
)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Default, Clone, Args)]
pub struct GlobalArgs {
    #[arg(long, global = true, help = "Path to goodscart.toml")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Path to a JSON catalog (defaults to the demo catalog)")]
    pub catalog: Option<PathBuf>,
    #[arg(long, global = true, help = "Minimum total for free delivery")]
    pub threshold: Option<Decimal>,
    #[arg(long, global = true, help = "Delivery fee shown in the footer")]
    pub fee: Option<Decimal>,
    #[arg(long, global = true, help = "Log level (trace|debug|info|warn|error)")]
    pub log_level: Option<String>,
    #[arg(long, global = true, value_parser = parse_log_format, help = "Log format (compact|pretty|json)")]
    pub log_format: Option<LogFormat>,
}

impl GlobalArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                delivery_threshold: self.threshold,
                delivery_fee: self.fee,
                catalog_path: self.catalog.clone(),
                log_level: self.log_level.clone(),
                log_format: self.log_format,
            },
        }
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    value.parse::<LogFormat>().map_err(|error| error.to_string())
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Render the catalog and an empty cart")]
    Show,
    #[command(about = "Apply cart events in order and render the resulting screen")]
    Simulate {
        #[arg(
            help = "Events: +N / inc:N increases item N, dec:N (or -N after `--`) decreases it"
        )]
        events: Vec<String>,
    },
    #[command(about = "Apply cart events in order and report the cart totals")]
    Summary {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
        #[arg(help = "Events, as for `simulate`")]
        events: Vec<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.global.load_options();

    if let Ok(config) = AppConfig::load(options.clone()) {
        if let Err(error) = logging::init(&config) {
            eprintln!("logging disabled: {error}");
        }
    }

    let result = match cli.command {
        Command::Show => commands::show::run(options),
        Command::Simulate { events } => commands::simulate::run(options, &events),
        Command::Summary { json, events } => commands::summary::run(options, &events, json),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(options) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
