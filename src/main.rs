use clap::{Parser as ClapParser, Subcommand};
use dataquery::cli::{self, CliError, OutputFormat, RenderOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "dataquery")]
#[command(about = "Dataquery - render query descriptions as DQL notation or SQL")]
#[command(version)]
struct Cli {
    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a notation query and render it
    Render {
        /// The notation query, e.g. 'sales[by(region)]' (reads stdin if not provided)
        query: Option<String>,

        /// Rendering to print: dql, sql or both
        #[arg(short, long, default_value = "sql")]
        to: OutputFormat,

        /// Print a JSON object with the table and both renderings
        #[arg(short, long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'dataquery docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render {
            query,
            to,
            json,
            pretty,
        } => run_render(query, to, json, pretty),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_render(
    query: Option<String>,
    format: OutputFormat,
    json: bool,
    pretty: bool,
) -> Result<(), CliError> {
    let query = match query {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = RenderOptions {
        query,
        format,
        json,
        pretty,
    };

    let result = cli::execute_render(&options)?;
    println!("{}", result.to_output(pretty)?);
    Ok(())
}
