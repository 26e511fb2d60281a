//! Moodtrack CLI
//!
//! Command-line interface for the mood tracker:
//! - Log moods now or for an earlier date
//! - Show history, insights and a chart
//! - Export or clear the stored entries

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use moodtrack::app::HISTORY_LIMIT;
use moodtrack::chart::render_text;
use moodtrack::config::generate_default_config;
use moodtrack::export::default_file_name;
use moodtrack::{
    parse_entry_date, App, AppError, ChartPeriod, ChartPoint, Config, ExportFormat,
    InsightReport, InsightsOutcome, LoggingConfig, Mood, MoodEntry, MoodView, PatternSummary,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "moodtrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal mood tracker with pattern insights")]
#[command(long_about = "Moodtrack records how you feel on a seven-level scale.\nAfter a few days of entries it shows your best and worst weekdays, your weekly trend, and suggestions.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, then ./moodtrack.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory, overrides the config file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log a mood now
    Log {
        /// Mood: 1-7, a key (very_happy) or a name ("Very Happy")
        mood: Option<String>,
        /// Optional note, up to 200 characters
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Add an entry for an earlier date, recorded at noon
    Backfill {
        /// Date: YYYY-MM-DD, today, yesterday, today-N or now-Nd
        date: String,
        /// Mood: 1-7, a key or a name
        mood: String,
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Show history, insights and chart together
    Dashboard {
        /// week or month (default from config)
        #[arg(short, long)]
        period: Option<ChartPeriod>,
    },

    /// Show the most recent entries
    History,

    /// Show pattern insights and suggestions
    Insights {
        /// Seed for suggestion choice
        #[arg(long)]
        seed: Option<u64>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Chart recent entries
    Chart {
        /// week or month (default from config)
        #[arg(short, long)]
        period: Option<ChartPeriod>,
    },

    /// Export all entries
    Export {
        /// csv or json
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
        /// Output file (default: mood_tracker_data_<date>.<ext>, "-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete every entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show storage status
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config problems are reported before the configured subscriber exists
    let config = with_bootstrap_logging(bootstrap_filter(), std::io::stderr, || load_config(&cli))?;

    init_logging(&config.logging);

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let mut app = App::new(&config);
    if app.is_degraded() {
        eprintln!("Warning: storage is unavailable, entries will not be saved after this run.");
    }

    let today = Local::now().date_naive();
    let mut view = TerminalView;

    match run(&mut app, &mut view, cli.command, &config, today) {
        Err(AppError::EmptyDataSet(what)) => {
            println!("No mood data available for {} yet. Log a mood first.", what);
            Ok(())
        }
        other => Ok(other?),
    }
}

fn run(
    app: &mut App,
    view: &mut TerminalView,
    command: Commands,
    config: &Config,
    today: chrono::NaiveDate,
) -> Result<(), AppError> {
    match command {
        Commands::Log { mood, note } => {
            let selection = mood.map(|m| m.parse::<Mood>()).transpose()?;
            let entry = app.log_mood(selection, &note)?;
            println!("Saved: {}", format_entry(&entry));
        }

        Commands::Backfill { date, mood, note } => {
            let date = parse_entry_date(&date, today)?;
            let mood: Mood = mood.parse()?;
            let entry = app.add_backdated(date, mood, &note)?;
            println!("Saved: {}", format_entry(&entry));
        }

        Commands::Dashboard { period } => {
            let period = period.unwrap_or(config.chart.default_period);
            app.refresh(view, period, today)?;
        }

        Commands::History => {
            view.render_history(&app.history()?);
        }

        Commands::Insights { seed, json } => {
            if let Some(seed) = seed {
                app.set_seed(seed);
            }
            let outcome = app.insights()?;

            if json {
                print_json(&outcome);
            } else {
                match outcome {
                    InsightsOutcome::Ready { summary, report } => {
                        view.render_insights(&summary, &report)
                    }
                    InsightsOutcome::Hidden {
                        distinct_days,
                        required,
                    } => view.hide_insights(distinct_days, required),
                }
            }
        }

        Commands::Chart { period } => {
            let period = period.unwrap_or(config.chart.default_period);
            let points = app.chart(period, today)?;
            view.render_chart(period, &points);
        }

        Commands::Export { format, output } => {
            let body = app.export(format)?;
            let path = output.unwrap_or_else(|| PathBuf::from(default_file_name(format, today)));

            if path.as_os_str() == "-" {
                print!("{}", body);
            } else {
                std::fs::write(&path, body).map_err(|e| AppError::Export(e.into()))?;
                println!("Exported to {}", path.display());
            }
        }

        Commands::Clear { yes } => {
            if !yes && !confirm("Delete all mood entries? This cannot be undone. [y/N] ") {
                println!("Cancelled.");
                return Ok(());
            }
            app.clear_all()?;
            println!("All mood entries deleted.");
        }

        Commands::Status { json } => {
            let status = app.status()?;

            if json {
                print_json(&status);
            } else {
                println!("Moodtrack v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!(
                    "Storage: {}{}",
                    status.backend,
                    if status.degraded { " (degraded, not persisted)" } else { "" }
                );
                println!("  Data dir: {}", config.storage.data_path().display());
                println!("  Key: {}", status.key);
                println!("  Entries: {}", status.entries);
                if let (Some(oldest), Some(newest)) = (status.oldest, status.newest) {
                    println!("  Range: {} to {}", oldest, newest);
                }
                println!();
                println!(
                    "Insights: {} of {} distinct days",
                    status.distinct_days, status.required_days
                );
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Load the config file named on the command line, or the default one
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }
    Ok(config)
}

/// Filter for logging emitted while the config is loaded
fn bootstrap_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moodtrack=warn"))
}

/// Run `f` with a temporary subscriber writing plain lines to `make_writer`
fn with_bootstrap_logging<W, T>(filter: EnvFilter, make_writer: W, f: impl FnOnce() -> T) -> T
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(make_writer)
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, f)
}

/// Initialize tracing to stderr
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("moodtrack={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn confirm(prompt: &str) -> bool {
    print!("{}", prompt);
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

fn format_entry(entry: &MoodEntry) -> String {
    let mut line = format!(
        "{} {} {} {}",
        entry.date().format("%a, %d %b %Y"),
        entry.exact_time(),
        entry.mood().emoji(),
        entry.mood().display_name()
    );
    if entry.has_note() {
        line.push_str(&format!(" \"{}\"", entry.note()));
    }
    line
}

/// Plain terminal output
struct TerminalView;

impl MoodView for TerminalView {
    fn render_history(&mut self, entries: &[MoodEntry]) {
        if entries.is_empty() {
            println!("No mood data recorded yet.");
            return;
        }

        println!("Recent entries (last {}):", HISTORY_LIMIT);
        for entry in entries {
            println!("  {}", format_entry(entry));
        }
    }

    fn render_insights(&mut self, summary: &PatternSummary, report: &InsightReport) {
        println!(
            "Average mood: {:.1} ({}) over {} entries",
            summary.rounded_overall_average(),
            summary.overall_label(),
            summary.entry_count
        );
        println!();

        println!("Insights:");
        for line in &report.insights {
            println!("  - {}", line);
        }

        if let Some(note) = &report.theory_note {
            println!();
            println!("{}", note);
        }

        println!();
        println!("Suggestions:");
        for suggestion in &report.suggestions {
            println!("  - {}", suggestion.text);
        }
    }

    fn hide_insights(&mut self, distinct_days: usize, required: usize) {
        println!(
            "Insights appear after {} days of entries ({} so far). Keep logging!",
            required, distinct_days
        );
    }

    fn render_chart(&mut self, period: ChartPeriod, points: &[ChartPoint]) {
        if points.is_empty() {
            println!("No entries in the past {}.", period);
            return;
        }

        println!("Mood over the past {}:", period);
        print!("{}", render_text(points));
    }
}
