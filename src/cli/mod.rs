mod render;
mod session;

pub use render::{money, render_ledger, render_names, render_total};
pub use session::{Flow, Session};

use std::fs::File;
use std::io::{BufReader, IsTerminal, Read, Write, stdin, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use crate::application::IngredientLedger;
use crate::config::{Config, ConfigManager, OutputFormat};
use crate::domain::{Amount, parse_amount};
use crate::io::{Exporter, Importer};

/// Recipe Cost - ingredient cost calculator
#[derive(Parser)]
#[command(name = "recipe-cost")]
#[command(about = "Add ingredients, price them per kg or per unit, and total the recipe cost")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default)
    Session {
        /// Read session commands from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Price a list of ingredients in one shot
    Price {
        /// CSV file with columns name,quantity,unit_price,type ("-" for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Inline ingredient as NAME:QUANTITY:UNIT_PRICE:TYPE (repeatable)
        #[arg(long = "item", value_parser = parse_item)]
        items: Vec<ItemSpec>,

        /// Output format: table, json, csv (defaults to the configured format)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the configuration file path
    Path,

    /// Print the effective configuration
    Show,
}

/// Ingredient given on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub name: String,
    pub quantity: Amount,
    pub unit_price: Amount,
    pub price_type: String,
}

/// Parse `NAME:QUANTITY:UNIT_PRICE:TYPE`. The name may itself contain colons.
pub fn parse_item(spec: &str) -> Result<ItemSpec, String> {
    let mut parts = spec.rsplitn(4, ':');
    let (Some(price_type), Some(unit_price), Some(quantity), Some(name)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format!(
            "'{}' is not NAME:QUANTITY:UNIT_PRICE:TYPE",
            spec
        ));
    };

    let quantity =
        parse_amount(quantity).map_err(|e| format!("quantity '{}': {}", quantity, e))?;
    let unit_price =
        parse_amount(unit_price).map_err(|e| format!("unit price '{}': {}", unit_price, e))?;

    Ok(ItemSpec {
        name: name.to_string(),
        quantity,
        unit_price,
        price_type: price_type.to_string(),
    })
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let manager = match self.config {
            Some(path) => ConfigManager::with_path(path),
            None => ConfigManager::new(),
        };

        let command = self
            .command
            .unwrap_or(Commands::Session { input: None });

        // Config commands must work even when the file is broken
        if let Commands::Config(ConfigCommands::Path) = command {
            println!("{}", manager.path().display());
            return Ok(());
        }

        let config = manager.load()?;

        match command {
            Commands::Session { input } => run_session_command(&config, input)?,

            Commands::Price {
                input,
                items,
                format,
                output,
            } => run_price_command(&config, input, items, format, output)?,

            Commands::Config(ConfigCommands::Show) => {
                print!("{}", ConfigManager::to_toml(&config)?);
            }

            Commands::Config(ConfigCommands::Path) => unreachable!("handled above"),
        }

        Ok(())
    }
}

fn run_session_command(config: &Config, input: Option<PathBuf>) -> Result<()> {
    let mut out = stdout().lock();

    match input {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("Failed to open session file: {}", path.display()))?;
            Session::new(config).run(BufReader::new(file), &mut out)
        }
        None => {
            let stdin = stdin();
            let interactive = stdin.is_terminal();
            Session::new(config)
                .with_prompt(interactive)
                .run(stdin.lock(), &mut out)
        }
    }
}

fn run_price_command(
    config: &Config,
    input: Option<PathBuf>,
    items: Vec<ItemSpec>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut ledger = IngredientLedger::new();

    // Read CSV rows from the file, or from stdin when nothing else was given
    let reader: Option<Box<dyn Read>> = match input {
        Some(path) if path.as_os_str() == "-" => Some(Box::new(stdin())),
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Some(Box::new(file))
        }
        None if items.is_empty() => Some(Box::new(stdin())),
        None => None,
    };

    if let Some(reader) = reader {
        let result = Importer::new(&mut ledger).import_csv(reader)?;
        debug!(imported = result.imported, "Loaded ingredients from CSV");

        if !result.errors.is_empty() {
            eprintln!("Skipped {} invalid row(s):", result.errors.len());
            for error in &result.errors {
                eprintln!("  Line {}: {}", error.line, error.error);
            }
        }
    }

    for item in items {
        if let Err(e) =
            ledger.add_tagged(item.name.as_str(), item.quantity, item.unit_price, &item.price_type)
        {
            warn!("Skipping item '{}'", item.name);
            eprintln!("  Item '{}': {}", item.name, e);
        }
    }

    let mut writer: Box<dyn Write> = match &output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let display = &config.display;
    match format.unwrap_or(config.defaults.format) {
        OutputFormat::Table => {
            render_ledger(&mut writer, &ledger, display)?;
            writer.flush()?;
        }
        OutputFormat::Csv => {
            Exporter::new(&ledger).export_csv(&mut writer, display.decimals)?;
        }
        OutputFormat::Json => {
            Exporter::new(&ledger).export_json(&mut writer, &display.currency)?;
        }
    }

    if let Some(path) = output {
        eprintln!(
            "Priced {} ingredients, total {} ({})",
            ledger.len(),
            money(ledger.total(), display),
            path.display()
        );
    }

    Ok(())
}
