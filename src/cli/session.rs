//! Interactive ledger session.
//!
//! Reads one command per line, applies it to the session's ledger and
//! re-renders the priced table after every change.

use std::fs::File;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::application::IngredientLedger;
use crate::config::Config;
use crate::domain::{PriceType, parse_amount};
use crate::io::Exporter;

use super::render::{render_ledger, render_names, render_total};

/// One line of session input
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
#[command(name = "session", about = "Recipe cost calculator session")]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Add an ingredient
    #[command(allow_negative_numbers = true)]
    Add {
        /// Ingredient name (quote names containing spaces)
        name: String,

        /// Quantity in grams (kg pricing) or units
        quantity: String,

        /// Price per kg or per unit
        unit_price: String,

        /// Price type: kg, unit
        #[arg(short = 't', long = "type")]
        price_type: Option<String>,
    },

    /// Remove every ingredient with this name
    Remove {
        /// Ingredient name
        name: String,
    },

    /// Show ingredients, prices and the total
    List,

    /// Show the total price
    Total,

    /// Show ingredient names available for removal
    Names,

    /// Export the priced list
    Export {
        /// Export format
        format: ExportFormat,

        /// Output file (printed if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    Csv,
    Json,
}

/// Whether the session keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A session owns its ledger; the ledger lives as long as the session.
pub struct Session<'a> {
    ledger: IngredientLedger,
    config: &'a Config,
    prompt: bool,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            ledger: IngredientLedger::new(),
            config,
            prompt: false,
        }
    }

    /// Print a prompt before reading each line.
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn ledger(&self) -> &IngredientLedger {
        &self.ledger
    }

    /// Process input lines until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "Recipe Cost Calculator (type 'help' for commands)")?;
        self.show_prompt(out)?;

        for line in input.lines() {
            let line = line.context("Failed to read session input")?;
            if self.execute(&line, out)? == Flow::Quit {
                break;
            }
            self.show_prompt(out)?;
        }

        debug!(ingredients = self.ledger.len(), "Session ended");
        Ok(())
    }

    /// Execute a single command line. Validation and usage errors are printed
    /// and do not end the session; only output failures are returned.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let tokens = match split_line(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };
        if tokens.is_empty() || tokens[0].starts_with('#') {
            return Ok(Flow::Continue);
        }

        let command = match SessionLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Covers `help` as well as usage errors
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            SessionCommand::Add {
                name,
                quantity,
                unit_price,
                price_type,
            } => self.add(name, &quantity, &unit_price, price_type.as_deref(), out)?,

            SessionCommand::Remove { name } => {
                let removed = self.ledger.remove(&name);
                if removed == 0 {
                    writeln!(out, "No ingredient named '{}'.", name)?;
                } else {
                    writeln!(out, "Removed {}!", name)?;
                    render_ledger(out, &self.ledger, &self.config.display)?;
                }
            }

            SessionCommand::List => render_ledger(out, &self.ledger, &self.config.display)?,

            SessionCommand::Total => render_total(out, &self.ledger, &self.config.display)?,

            SessionCommand::Names => render_names(out, &self.ledger)?,

            SessionCommand::Export { format, output } => self.export(format, output, out)?,

            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn add<W: Write>(
        &mut self,
        name: String,
        quantity: &str,
        unit_price: &str,
        price_type: Option<&str>,
        out: &mut W,
    ) -> Result<()> {
        let quantity = match parse_amount(quantity) {
            Ok(q) => q,
            Err(e) => {
                writeln!(out, "Error: Invalid quantity '{}': {}", quantity, e)?;
                return Ok(());
            }
        };
        let unit_price = match parse_amount(unit_price) {
            Ok(p) => p,
            Err(e) => {
                writeln!(out, "Error: Invalid unit price '{}': {}", unit_price, e)?;
                return Ok(());
            }
        };

        let result = match price_type {
            Some(tag) => self
                .ledger
                .add_tagged(name, quantity, unit_price, tag)
                .map(|_| ()),
            None => {
                let default: PriceType = self.config.defaults.price_type;
                self.ledger
                    .add(name, quantity, unit_price, default)
                    .map(|_| ())
            }
        };

        match result {
            Ok(_) => {
                writeln!(out, "Ingredient added!")?;
                render_ledger(out, &self.ledger, &self.config.display)?;
            }
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        Ok(())
    }

    fn export<W: Write>(
        &self,
        format: ExportFormat,
        output: Option<PathBuf>,
        out: &mut W,
    ) -> Result<()> {
        match output {
            Some(path) => match self.export_to_file(format, &path) {
                Ok(count) => {
                    writeln!(out, "Exported {} ingredients to {}", count, path.display())?
                }
                Err(e) => writeln!(out, "Error: {:#}", e)?,
            },
            None => {
                let exporter = Exporter::new(&self.ledger);
                let display = &self.config.display;
                match format {
                    ExportFormat::Csv => exporter.export_csv(&mut *out, display.decimals)?,
                    ExportFormat::Json => exporter.export_json(&mut *out, &display.currency)?,
                };
            }
        }
        Ok(())
    }

    fn export_to_file(&self, format: ExportFormat, path: &Path) -> Result<usize> {
        let exporter = Exporter::new(&self.ledger);
        let display = &self.config.display;

        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        let count = match format {
            ExportFormat::Csv => exporter.export_csv(file, display.decimals)?,
            ExportFormat::Json => exporter.export_json(file, &display.currency)?,
        };
        Ok(count)
    }

    fn show_prompt<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        Ok(())
    }
}

/// Split a line into words. Single or double quotes group words containing spaces.
fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err("unterminated quote".to_string());
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_lines(config: &Config, lines: &[&str]) -> (IngredientLedger, String) {
        let mut session = Session::new(config);
        let mut out = Vec::new();
        for line in lines {
            session.execute(line, &mut out).unwrap();
        }
        (session.ledger().clone(), String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_split_line() {
        assert_eq!(
            split_line("add Flour 500 2.00").unwrap(),
            vec!["add", "Flour", "500", "2.00"]
        );
        assert_eq!(
            split_line("add \"Olive oil\" 30  9.5").unwrap(),
            vec!["add", "Olive oil", "30", "9.5"]
        );
        assert_eq!(split_line("add '' 1 1").unwrap(), vec!["add", "", "1", "1"]);
        assert!(split_line("   ").unwrap().is_empty());
        assert!(split_line("add \"Olive oil 30").is_err());
    }

    #[test]
    fn test_add_and_remove() {
        let config = Config::default();
        let (ledger, output) = run_lines(
            &config,
            &[
                "add Flour 500 2.00 --type kg",
                "add Egg 3 0.50 -t unit",
                "remove Flour",
            ],
        );

        assert_eq!(ledger.names(), vec!["Egg"]);
        assert!((ledger.total() - 1.5).abs() < 1e-9);
        assert!(output.contains("Ingredient added!"));
        assert!(output.contains("Removed Flour!"));
    }

    #[test]
    fn test_add_uses_configured_default_type() {
        let mut config = Config::default();
        config.defaults.price_type = PriceType::PerUnit;

        let (ledger, _) = run_lines(&config, &["add Egg 3 0.50"]);
        assert_eq!(ledger.records()[0].price_type, PriceType::PerUnit);
    }

    #[test]
    fn test_empty_name_reports_error_and_continues() {
        let config = Config::default();
        let (ledger, output) = run_lines(&config, &["add \"\" 100 1", "add Sugar 100 1"]);

        assert!(output.contains("Error: Please enter an ingredient name."));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_invalid_numbers_are_reported() {
        let config = Config::default();
        let (ledger, output) = run_lines(
            &config,
            &["add Salt abc 1", "add Salt -5 1", "add Salt 5 1 --type litre"],
        );

        assert!(ledger.is_empty());
        assert!(output.contains("Invalid quantity 'abc'"));
        assert!(output.contains("Invalid quantity '-5'"));
        assert!(output.contains("Unknown price type 'litre'"));
    }

    #[test]
    fn test_remove_unknown_name_is_not_an_error() {
        let config = Config::default();
        let (ledger, output) = run_lines(&config, &["add Egg 3 0.5 -t unit", "remove Milk"]);

        assert_eq!(ledger.len(), 1);
        assert!(output.contains("No ingredient named 'Milk'."));
    }

    #[test]
    fn test_quit_and_exit() {
        let config = Config::default();
        let mut session = Session::new(&config);
        let mut out = Vec::new();

        assert_eq!(session.execute("quit", &mut out).unwrap(), Flow::Quit);
        assert_eq!(session.execute("exit", &mut out).unwrap(), Flow::Quit);
        assert_eq!(session.execute("", &mut out).unwrap(), Flow::Continue);
        assert_eq!(session.execute("# note", &mut out).unwrap(), Flow::Continue);
    }

    #[test]
    fn test_unknown_command_prints_usage() {
        let config = Config::default();
        let (_, output) = run_lines(&config, &["frobnicate"]);
        assert!(output.contains("error:"));
    }

    #[test]
    fn test_run_stops_at_quit() {
        let config = Config::default();
        let mut session = Session::new(&config);
        let mut out = Vec::new();
        let input = "add Egg 3 0.5 -t unit\nquit\nadd Milk 1 1 -t unit\n";

        session.run(input.as_bytes(), &mut out).unwrap();

        assert_eq!(session.ledger().names(), vec!["Egg"]);
    }

    #[test]
    fn test_export_failure_keeps_session_going() {
        let config = Config::default();
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("missing_dir").join("recipe.csv");
        let mut session = Session::new(&config);
        let mut out = Vec::new();
        let input = format!(
            "add Egg 3 0.5 -t unit\nexport csv -o \"{}\"\nadd Milk 1 1 -t unit\ntotal\n",
            missing.display()
        );

        session.run(input.as_bytes(), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Error: Failed to create output file"));
        assert_eq!(session.ledger().names(), vec!["Egg", "Milk"]);
        assert!(output.contains("Total Price: 2.50"));
    }

    #[test]
    fn test_export_json_to_file() {
        let config = Config::default();
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("recipe.json");
        let line = format!("export json -o \"{}\"", path.display());

        let (_, output) = run_lines(&config, &["add Egg 3 0.5 -t unit", &line]);

        assert!(output.contains("Exported 1 ingredients"));
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"Egg\""));
    }

    #[test]
    fn test_export_csv_to_output() {
        let config = Config::default();
        let (_, output) = run_lines(&config, &["add Egg 3 0.5 -t unit", "export csv"]);
        assert!(output.contains("ingredient,quantity,unit_price,type,price"));
        assert!(output.contains("Egg,3,0.5,unit,1.50"));
    }
}
