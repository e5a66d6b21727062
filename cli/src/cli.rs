use std::path::PathBuf;

/// Districting search CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "districtor", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Search for a districting plan of a county file
    Search(SearchArgs),

    /// Validate a county file and print a summary of its graph
    Inspect(InspectArgs),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum PartyArg { A, B }

#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum OutputFormat { Csv, Json, Text }

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self { OutputFormat::Csv => "csv", OutputFormat::Json => "json", OutputFormat::Text => "txt" }
    }
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Input county file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// JSON search config; flags below override its fields
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Number of districts
    #[arg(short, long)]
    pub districts: Option<usize>,

    /// Minimum district population
    #[arg(long)]
    pub min: Option<i64>,

    /// Maximum district population
    #[arg(long)]
    pub max: Option<i64>,

    /// Party whose margin districts should favor
    #[arg(short, long, value_enum)]
    pub party: Option<PartyArg>,

    /// Districts allowed to disagree with the party
    #[arg(short, long)]
    pub tolerance: Option<usize>,

    /// 0-based index of the unit that seeds the first district
    #[arg(long)]
    pub seed: Option<usize>,

    /// Output plan file, defaults to "<input>.output.<format>"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output plan format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Seconds between progress reports
    #[arg(long, default_value_t = 1.0)]
    pub interval: f64,

    /// Stop reporting progress after this many seconds
    #[arg(long)]
    pub report_for: Option<f64>,

    /// Give up the search after this many seconds
    #[arg(long)]
    pub time_limit: Option<f64>,

    /// Do not report progress
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Input county file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,
}
