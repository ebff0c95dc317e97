//! Command line arguments.
use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use rusty_table::table::BlankRows;
use rusty_table::table::OnError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rusty-table",
    version,
    about = "Locate a table inside a spreadsheet and print its records as JSON lines",
    long_about = "Locate a table inside a spreadsheet and print its records as JSON lines.\n\n\
                  The table is described by a JSON definition listing its fields. Sheets are \n\
                  scanned top-down for the first row whose cells match the fields' headers."
)]
pub struct Cli {
    /// Workbook to read (.xlsx, .xlsm, .xlam).
    #[arg(value_name = "FILE")]
    pub file: String,

    /// JSON file with the table definition.
    #[arg(long, short = 'd', value_name = "JSON")]
    pub definition: PathBuf,

    /// Sheet name glob pattern; repeat to select several.
    #[arg(long = "sheet", value_name = "GLOB")]
    pub sheets: Vec<String>,

    /// Maximum number of sheets to search.
    #[arg(long = "sheet-limit", value_name = "N")]
    pub sheet_limit: Option<usize>,

    /// Area of each sheet to search, e.g. `A1:F100`, `B:D` or `3:`.
    #[arg(long, value_name = "A1")]
    pub range: Option<String>,

    /// What to do with blank rows.
    #[arg(long = "blank-rows", value_enum, default_value = "end")]
    pub blank_rows: BlankRowsArg,

    /// What to do with values rejected by a field type.
    #[arg(long = "on-error", value_enum, default_value = "fail")]
    pub on_error: OnErrorArg,

    /// Print records as arrays in field order instead of objects.
    #[arg(long)]
    pub sequences: bool,

    /// Print the table location only.
    #[arg(long = "locate-only")]
    pub locate_only: bool,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Errors only.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BlankRowsArg {
    End,
    Skip,
    Keep,
}

impl From<BlankRowsArg> for BlankRows {
    fn from(arg: BlankRowsArg) -> Self {
        match arg {
            BlankRowsArg::End => BlankRows::End,
            BlankRowsArg::Skip => BlankRows::Skip,
            BlankRowsArg::Keep => BlankRows::Keep,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OnErrorArg {
    /// Stop at the first invalid value
    Fail,
    /// Replace invalid values with null
    Null,
    /// Drop rows holding an invalid value
    Skip,
}

impl From<OnErrorArg> for OnError {
    fn from(arg: OnErrorArg) -> Self {
        match arg {
            OnErrorArg::Fail => OnError::Fail,
            OnErrorArg::Null => OnError::Substitute(None),
            OnErrorArg::Skip => OnError::SkipRow,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parse() {
        let cli = Cli::parse_from([
            "rusty-table",
            "book.xlsx",
            "-d",
            "orders.json",
            "--sheet",
            "Data*",
            "--sheet",
            "Orders",
            "--on-error",
            "null",
            "-vv",
        ]);
        assert_eq!(cli.file, "book.xlsx");
        assert_eq!(cli.sheets, vec!["Data*", "Orders"]);
        assert_eq!(OnError::from(cli.on_error), OnError::Substitute(None));
        assert_eq!(BlankRows::from(cli.blank_rows), BlankRows::End);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.locate_only);
    }
}
