use std::{
    fs,
    io::IsTerminal,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result, ensure};
use districtor::{
    Graph, Party, Plan, ProgressSnapshot, ReporterConfig, Search, SearchConfig, SearchOutcome,
    SearchStats, io::counties::read_counties,
};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{Cli, OutputFormat, PartyArg, SearchArgs};

/// Exit code when the search space is exhausted without a plan.
const EXIT_EXHAUSTED: u8 = 2;

/// Exit code when the search was cancelled by its time limit.
const EXIT_CANCELLED: u8 = 3;

pub fn run(cli: &Cli, args: &SearchArgs) -> Result<ExitCode> {
    let config = build_config(args)?;
    let graph = Arc::new(read_counties(&args.input)?);

    if cli.verbose > 0 {
        eprintln!(
            "[search] {} units from {}; {} districts in [{}, {}], party {:?}, tolerance {}",
            graph.node_count(), args.input.display(),
            config.districts, config.min_population, config.max_population,
            config.party, config.tolerance(),
        );
    }

    let mut search = Search::new(graph.clone(), config)?;
    if !args.quiet {
        search = search.with_reporter(ReporterConfig {
            interval: seconds(args.interval, "--interval")?,
            duration: args.report_for.map(|s| seconds(s, "--report-for")).transpose()?,
        });
    }
    if let Some(limit) = args.time_limit {
        search = search.with_time_limit(seconds(limit, "--time-limit")?);
    }

    let spinner = (!args.quiet && cli.verbose < 2 && std::io::stderr().is_terminal()).then(new_spinner);
    let report = search.run(progress_sink(graph.clone(), spinner.clone(), cli.verbose))?;
    if let Some(spinner) = spinner { spinner.finish_and_clear() }

    if cli.verbose > 0 { print_stats(&report.stats) }

    match &report.outcome {
        SearchOutcome::Solved(plan) => {
            let out_path = args.output.clone().unwrap_or_else(|| default_output(&args.input, args.format));
            write_plan(plan, args.format, &out_path)?;
            println!("{}", plan.wins(plan.party()));
            println!("{plan}");
            if cli.verbose > 0 {
                eprintln!("[search] wrote plan to {}", out_path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        SearchOutcome::Exhausted => {
            eprintln!("[search] no plan satisfies the configured bounds and tolerance");
            Ok(ExitCode::from(EXIT_EXHAUSTED))
        }
        SearchOutcome::Cancelled => {
            eprintln!("[search] cancelled after {:.3}s without a plan", report.stats.elapsed.as_secs_f64());
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
    }
}

/// Defaults, then the JSON config file, then command-line flags.
fn build_config(args: &SearchArgs) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::from_json_file(path)?,
        None => SearchConfig::default(),
    };

    if let Some(districts) = args.districts { config.districts = districts }
    if let Some(min) = args.min { config.min_population = min }
    if let Some(max) = args.max { config.max_population = max }
    if let Some(party) = args.party {
        config.party = match party { PartyArg::A => Party::A, PartyArg::B => Party::B };
    }
    if let Some(tolerance) = args.tolerance { config.max_disagreements = Some(tolerance) }
    if let Some(seed) = args.seed { config.seed_unit = seed }

    Ok(config)
}

fn seconds(value: f64, flag: &str) -> Result<Duration> {
    ensure!(value.is_finite() && value > 0.0, "{flag} must be a positive number of seconds");
    Duration::try_from_secs_f64(value).with_context(|| format!("{flag} is too large: {value} seconds"))
}

fn default_output(input: &Path, format: OutputFormat) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(format!(".output.{}", format.extension()));
    PathBuf::from(name)
}

fn write_plan(plan: &Plan, format: OutputFormat, path: &Path) -> Result<()> {
    match format {
        OutputFormat::Csv => plan.write_to_csv(path),
        OutputFormat::Json => plan.write_to_json(path),
        OutputFormat::Text => fs::write(path, format!("{}\n{plan}\n", plan.wins(plan.party())))
            .with_context(|| format!("[search] Failed to write {}", path.display())),
    }
}

fn new_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.dim} [{elapsed}] {msg}") {
        spinner.set_style(style);
    }
    spinner
}

/// Progress callback: spinner message when interactive, one line per tick otherwise.
fn progress_sink(graph: Arc<Graph>, spinner: Option<ProgressBar>, verbose: u8) -> impl FnMut(&ProgressSnapshot) + Send + 'static {
    move |snapshot: &ProgressSnapshot| match &spinner {
        Some(spinner) => {
            let filled = snapshot.districts.iter().filter(|d| !d.is_empty()).count();
            spinner.set_message(format!(
                "{} placements, {}/{} units placed, {} districts open",
                snapshot.attempts, snapshot.placed(), graph.node_count(), filled,
            ));
            spinner.tick();
        }
        None if verbose > 0 => eprintln!("[search] {}", snapshot.describe(&graph)),
        None => {}
    }
}

fn print_stats(stats: &SearchStats) {
    eprintln!(
        "[search] {} placements, {} backtracks, {} district advances, {} memo hits, {} bound prunes, max depth {} in {:.3}s",
        stats.placements, stats.backtracks, stats.district_advances, stats.memo_hits,
        stats.bound_prunes, stats.max_depth, stats.elapsed.as_secs_f64(),
    );
}
