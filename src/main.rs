use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use tagtree::{
    error::Result,
    formatter::FormatConfig,
    parser::{ParserConfig, XmlParser},
    utils::{format_xml_with, read_file, write_file},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file path
    #[arg(short, long)]
    file: String,

    /// Output file path
    #[arg(short, long)]
    output: Option<String>,

    /// Spaces of indentation per nesting level
    #[arg(short, long, default_value_t = FormatConfig::default().indent_spaces)]
    indent: usize,

    /// Reject documents that leave elements open
    #[arg(long)]
    strict: bool,

    /// Log node counts after parsing
    #[arg(long)]
    stats: bool,
}

fn main() {
    // Initialize the default subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false) // Don't show target
        .without_time() // Don't show timestamps
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    info!("Reading file: {}", args.file);
    let content = read_file(&args.file)?;

    let config = if args.strict {
        ParserConfig::strict()
    } else {
        ParserConfig::default()
    };
    let document = XmlParser::new(&content)?.with_config(config).parse()?;

    if args.stats {
        let reconciliation = document.kept_nodes();
        let elements = document.descendants(document.root()).len();
        info!(
            "{}: {} elements, {} nodes written",
            args.file,
            elements,
            reconciliation.kept_count()
        );
    }

    let format_config = FormatConfig {
        indent_spaces: args.indent,
    };
    let formatted_output = format_xml_with(&document, &format_config)?;

    if let Some(output_path) = args.output {
        write_file(&output_path, &formatted_output)?;
    } else {
        print!("{}", formatted_output);
    }

    Ok(())
}
