use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "stampscan-cmd")]
#[command(about = "Command-line utility for stamp-ordered collection over record files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect the first page of records in a stamp window
    Collect(CollectArgs),

    /// Display the segment layout of an index built from a record file, or a
    /// single record of it
    Inspect {
        /// Path to the ndjson record file
        #[arg(short, long)]
        records: String,

        /// Maximum number of records per segment
        #[arg(long, default_value_t = utils::DEFAULT_SEGMENT_SIZE)]
        segment_size: usize,

        /// Show the record stored under this identifier instead of the layout
        #[arg(long)]
        identifier: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct CollectArgs {
    /// Path to the ndjson record file
    #[arg(short, long)]
    pub records: String,

    /// Maximum number of records per segment
    #[arg(long, default_value_t = utils::DEFAULT_SEGMENT_SIZE)]
    pub segment_size: usize,

    /// JSON file with collector options, overridden by the flags below
    #[arg(long)]
    pub options: Option<String>,

    /// Maximum number of records to return
    #[arg(short = 'k', long)]
    pub max_docs: Option<usize>,

    /// Count every in-range record instead of stopping after the page is full
    #[arg(long)]
    pub count_hits: bool,

    /// Lowest stamp to collect (inclusive)
    #[arg(long, conflicts_with_all = ["from", "until", "continue_after"])]
    pub start: Option<i64>,

    /// Highest stamp to collect (inclusive)
    #[arg(long, conflicts_with_all = ["from", "until", "continue_after"])]
    pub stop: Option<i64>,

    /// Lowest datestamp to collect, e.g. 2013-01-02T00:00:00Z
    #[arg(long)]
    pub from: Option<String>,

    /// Highest datestamp to collect (inclusive at second granularity)
    #[arg(long)]
    pub until: Option<String>,

    /// Resume after the record with this stamp
    #[arg(long)]
    pub continue_after: Option<i64>,

    /// Only collect records available in this metadata prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Only collect records in one of these sets (can be specified multiple times)
    #[arg(long)]
    pub set: Vec<String>,

    /// Render datestamps with microseconds
    #[arg(long)]
    pub precise: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Collect(args) => commands::collect::run(args),
        Commands::Inspect {
            records,
            segment_size,
            identifier,
        } => commands::inspect::run(records, segment_size, identifier),
    }
}
