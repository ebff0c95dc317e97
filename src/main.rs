//! `rusty-table`: locates a table in a workbook and prints it as JSON lines.
//!
//! The first line is the table location, each following line one record.
//! Exits with 2 when no header row matches the definition.
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use glob::Pattern;
use rusty_table::spreadsheet::Criteria;
use rusty_table::spreadsheet::Range;
use rusty_table::table::IterOptions;
use rusty_table::table::TableDefinition;
use rusty_table::table::TableReader;
use std::fs;
use std::io;
use std::io::BufWriter;
use std::io::IsTerminal;
use std::io::Write;

mod cli;
mod logging;

use crate::cli::Cli;
use crate::cli::LogFormatArg;
use crate::logging::init_logging;
use crate::logging::LogConfig;
use crate::logging::LogFormat;

fn main() {
    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli));
    let exit_code = match run(&cli) {
        Ok(true) => 0,
        Ok(false) => {
            eprintln!("error: no table found in '{}'", cli.file);
            2
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    LogConfig::from_verbosity(cli.verbose, cli.quiet)
        .with_format(format)
        .with_ansi(io::stderr().is_terminal())
}

/// Returns false when the table could not be located.
fn run(cli: &Cli) -> Result<bool> {
    let json = fs::read_to_string(&cli.definition)
        .with_context(|| format!("Failed to read table definition '{}'", cli.definition.display()))?;
    let definition = TableDefinition::from_json(&json)
        .with_context(|| format!("Invalid table definition '{}'", cli.definition.display()))?;
    let criteria = criteria_from_cli(cli)?;
    let sheets = rusty_table::read_workbook(&cli.file, &criteria)?;
    tracing::debug!(sheets = sheets.len(), "Loaded workbook {}", cli.file);

    let reader = TableReader::new(&sheets, definition)?;
    let Some(location) = reader.location() else {
        return Ok(false);
    };

    let mut out = BufWriter::new(io::stdout().lock());
    serde_json::to_writer(&mut out, &location)?;
    writeln!(out)?;
    if !cli.locate_only {
        let options = IterOptions {
            as_mapping: !cli.sequences,
            blank_rows: cli.blank_rows.into(),
            on_error: cli.on_error.into(),
        };
        let mut count = 0usize;
        for record in reader.iter(options)? {
            serde_json::to_writer(&mut out, &record?)?;
            writeln!(out)?;
            count += 1;
        }
        tracing::info!(records = count, "Finished reading {}", location.sheet_name);
    }
    out.flush()?;
    Ok(true)
}

fn criteria_from_cli(cli: &Cli) -> Result<Criteria> {
    let patterns = cli
        .sheets
        .iter()
        .map(|pattern| Pattern::new(pattern).with_context(|| format!("Invalid sheet pattern '{pattern}'")))
        .collect::<Result<Vec<_>>>()?;
    let range = cli
        .range
        .as_deref()
        .map(Range::try_from)
        .transpose()
        .context("Invalid --range")?;
    Ok(Criteria {
        sheet_name_patterns: Some(patterns).filter(|patterns| !patterns.is_empty()),
        sheet_limit: cli.sheet_limit,
        range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_from_flags() {
        let cli = Cli::parse_from(["rusty-table", "book.xlsx", "-d", "t.json", "--sheet", "D*", "--range", "B2:F"]);
        let criteria = criteria_from_cli(&cli).unwrap();

        assert!(criteria.accept("Data"));
        assert!(!criteria.accept("Cover"));
        assert_eq!(criteria.range, Some(Range::try_from("B2:F").unwrap()));
        assert_eq!(criteria.sheet_limit, None);

        let cli = Cli::parse_from(["rusty-table", "book.xlsx", "-d", "t.json"]);
        let criteria = criteria_from_cli(&cli).unwrap();
        assert!(criteria.sheet_name_patterns.is_none());
        assert!(criteria.range.is_none());
    }

    #[test]
    fn criteria_rejects_bad_range() {
        let cli = Cli::parse_from(["rusty-table", "book.xlsx", "-d", "t.json", "--range", "1A"]);
        assert!(criteria_from_cli(&cli).is_err());
    }
}
