//! bibconv CLI - Convert bibliographic exports
//!
//! ```bash
//! bibconv convert biblio.csv                  # insert statements, one per author
//! bibconv convert biblio.csv --style schema   # create table + double-quoted inserts
//! bibconv authors biblio.csv -d semicolon     # KEY AUTHOR lines
//! bibconv count-lines biblio.csv              # physical line count
//! bibconv feed share.osf.io.xml --format csv  # Atom entries as title,link,author
//! ```

use bibconv::logs::{log_error, log_info, log_success, LOGGER};
use bibconv::{
    convert_records, count_lines_in_file, display_records, ensure_not_input, load_csv,
    open_output, parse_feed_file, summarize, write_entries, AuthorDelimiter, BibError, BibResult,
    Config, CsvLayout, FeedFormat, QuoteStyle, SqlOptions, SqlStyle,
};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bibconv")]
#[command(about = "Convert bibliographic CSV exports and Atom feeds", long_about = None)]
struct Cli {
    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one SQL insert statement per (key, author) pair
    Convert {
        /// Input CSV file
        input: Option<PathBuf>,

        /// Output variant
        #[arg(long, value_enum, default_value_t = SqlStyle::Plain)]
        style: SqlStyle,

        /// Quote character (overrides the style)
        #[arg(long, value_enum)]
        quote: Option<QuoteStyle>,

        /// Emit `create table` first (implied by --style schema)
        #[arg(long)]
        create_table: bool,

        /// Table name (default: data)
        #[arg(short, long)]
        table: Option<String>,

        /// Author separator (default: semicolon-space)
        #[arg(short, long, value_enum)]
        delimiter: Option<AuthorDelimiter>,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print one `KEY AUTHOR` line per (key, author) pair
    Authors {
        /// Input CSV file
        input: Option<PathBuf>,

        /// Author separator (default: semicolon-space)
        #[arg(short, long, value_enum)]
        delimiter: Option<AuthorDelimiter>,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Count the physical lines of a file
    CountLines {
        /// Input file
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract title, link and authors from an Atom feed
    Feed {
        /// Input Atom XML file
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FeedFormat::Summary)]
        format: FeedFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// CSV column selection shared by `convert` and `authors`.
#[derive(Args)]
struct ColumnArgs {
    /// Zero-based column of the record key (default: 0)
    #[arg(long)]
    key_column: Option<usize>,

    /// Zero-based column of the author list (default: 3)
    #[arg(long)]
    authors_column: Option<usize>,

    /// Treat the first row as a header and skip it
    #[arg(long)]
    has_headers: bool,
}

impl ColumnArgs {
    fn layout(&self, config: &Config) -> CsvLayout {
        let defaults = config.layout();
        CsvLayout {
            key_column: self.key_column.unwrap_or(defaults.key_column),
            authors_column: self.authors_column.unwrap_or(defaults.authors_column),
            has_headers: self.has_headers || defaults.has_headers,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> BibResult<()> {
    let config = Config::from_env()?;
    LOGGER.set_quiet(cli.quiet || config.quiet);

    match cli.command {
        Commands::Convert {
            input,
            style,
            quote,
            create_table,
            table,
            delimiter,
            columns,
            output,
        } => {
            let mut options = SqlOptions::for_style(style)
                .with_table(table.unwrap_or_else(|| config.table.clone()))
                .with_delimiter(delimiter.unwrap_or(config.delimiter));
            if let Some(quote) = quote {
                options = options.with_quote(quote);
            }
            options.create_table |= create_table;

            let input = require_input(input)?;
            cmd_convert(&input, &columns.layout(&config), &options, output.as_deref())
        }

        Commands::Authors {
            input,
            delimiter,
            columns,
            output,
        } => {
            let input = require_input(input)?;
            cmd_authors(
                &input,
                &columns.layout(&config),
                delimiter.unwrap_or(config.delimiter),
                output.as_deref(),
            )
        }

        Commands::CountLines { input, output } => {
            let input = require_input(input)?;
            cmd_count_lines(&input, output.as_deref())
        }

        Commands::Feed {
            input,
            format,
            output,
        } => {
            let input = require_input(input)?;
            cmd_feed(&input, format, output.as_deref())
        }
    }
}

fn require_input(input: Option<PathBuf>) -> BibResult<PathBuf> {
    input.ok_or(BibError::MissingArgument("input"))
}

fn cmd_convert(
    input: &Path,
    layout: &CsvLayout,
    options: &SqlOptions,
    output: Option<&Path>,
) -> BibResult<()> {
    ensure_not_input(input, output)?;
    let parsed = load_csv(input, layout)?;

    let mut out = open_output(output)?;
    convert_records(&parsed, options, &mut out)?;
    announce_output(output);
    Ok(())
}

fn cmd_authors(
    input: &Path,
    layout: &CsvLayout,
    delimiter: AuthorDelimiter,
    output: Option<&Path>,
) -> BibResult<()> {
    ensure_not_input(input, output)?;
    let parsed = load_csv(input, layout)?;

    let mut out = open_output(output)?;
    display_records(&parsed, delimiter, &mut out)?;
    announce_output(output);
    Ok(())
}

fn cmd_count_lines(input: &Path, output: Option<&Path>) -> BibResult<()> {
    ensure_not_input(input, output)?;
    let count = count_lines_in_file(input)?;

    let mut out = open_output(output)?;
    writeln!(out, "{}", count)?;
    out.flush()?;
    announce_output(output);
    Ok(())
}

fn cmd_feed(input: &Path, format: FeedFormat, output: Option<&Path>) -> BibResult<()> {
    ensure_not_input(input, output)?;
    log_info(format!("📰 Reading feed: {}", input.display()));
    let entries = parse_feed_file(input)?;

    let summary = summarize(&entries);
    log_success(format!(
        "Collected {} entries ({} complete)",
        summary.entry_count,
        summary.complete_entries()
    ));

    let mut out = open_output(output)?;
    write_entries(&entries, format, &mut out)?;
    out.flush()?;
    announce_output(output);
    Ok(())
}

fn announce_output(path: Option<&Path>) {
    if let Some(p) = path {
        log_success(format!("💾 Output written to: {}", p.display()));
    }
}
