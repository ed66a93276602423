//! sheetquery - query delimited tables with JSON condition trees

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use log::{info, warn};
use sheetquery::catalog::HeaderConverter;
use sheetquery::expression::parse_query;
use sheetquery::reader::{load_delimited, OptionsPatch, ReaderOptions, SheetReader};
use std::fs;
use std::path::PathBuf;

/// Query a delimited table with a JSON condition tree
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Table file, one row per line, first row holding the headers
    table: PathBuf,

    /// Query, e.g. '["or", [["~", "country", {"regex": "^United"}], ["==", "id", 1]]]'
    #[arg(short, long, conflicts_with = "query_file")]
    query: Option<String>,

    /// File holding the query
    #[arg(short = 'f', long)]
    query_file: Option<PathBuf>,

    /// Cell delimiter
    #[arg(short, long, default_value = "\t")]
    delimiter: char,

    /// JSON file with reader options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of leading rows before the body
    #[arg(long)]
    skip_headers: Option<usize>,

    /// Header normalization: lowercase, uppercase, trim or verbatim
    #[arg(long)]
    header_converter: Option<HeaderConverter>,

    /// Field names for output records, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pick: Option<Vec<String>>,

    /// Only compare cells and needles of the same kind
    #[arg(short, long)]
    strict: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Matched rows as JSON records
    Json,
    /// Matched rows as delimited text
    Delimited,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut opts = match &args.config {
        Some(path) => ReaderOptions::load(path)?,
        None => ReaderOptions::default(),
    };
    opts.merge(OptionsPatch {
        skip_headers: args.skip_headers,
        header_converter: args.header_converter,
        pick_fields: args.pick.clone(),
        strict_comparison: args.strict.then_some(true),
    });

    let query = match (&args.query, &args.query_file) {
        (Some(query), _) => query.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read query file {}", path.display()))?,
        (None, None) => bail!("a query is required (--query or --query-file)"),
    };
    let parsed = parse_query(&query).context("Failed to parse query")?;
    if !parsed.deprecations.is_empty() {
        warn!(
            "query uses {} deprecated leaf form(s); write [operator, column, needle] instead",
            parsed.deprecations.len()
        );
    }

    let book = load_delimited(&args.table, args.delimiter)?;
    let reader = SheetReader::with_options(book, opts);
    let found = reader
        .search(&parsed.condition)
        .context("Failed to evaluate query")?;
    info!("{} rows matched", found.len());

    match args.format {
        Format::Json => {
            let records = reader.to_records(&found)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Format::Delimited => {
            let delimiter = args.delimiter.to_string();
            for row in &found {
                let cells: Vec<_> = row.iter().map(|cell| cell.to_text()).collect();
                println!("{}", cells.join(delimiter.as_str()));
            }
        }
    }

    Ok(())
}
