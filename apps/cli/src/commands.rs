//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use joblens_core::{BatchConfig, ProgressReporter, run_batch};
use joblens_shared::{AppConfig, JobRecord, ScrapeConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// joblens — scrape job listings into structured, trust-classified records.
#[derive(Parser)]
#[command(
    name = "joblens",
    version,
    about = "Scrape job listing pages into trust-classified records with harvested contacts.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Scrape one or more job listing URLs and export a CSV.
    Scrape {
        /// Listing URLs to scrape.
        urls: Vec<String>,

        /// File with one URL per line (combined with positional URLs).
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// CSV output path.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Hire-rate threshold (0–100) for the high-trust flag.
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,

        /// Follow client-profile links to harvest additional contacts.
        #[arg(long)]
        enrich: bool,

        /// Maximum concurrent fetches.
        #[arg(short, long)]
        concurrency: Option<u32>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "joblens=info",
        1 => "joblens=debug",
        _ => "joblens=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Scrape {
            urls,
            file,
            out,
            threshold,
            enrich,
            concurrency,
        } => cmd_scrape(urls, file, out, threshold, enrich, concurrency).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Scrape command
// ---------------------------------------------------------------------------

async fn cmd_scrape(
    mut urls: Vec<String>,
    file: Option<PathBuf>,
    out: Option<PathBuf>,
    threshold: Option<u8>,
    enrich: bool,
    concurrency: Option<u32>,
) -> Result<()> {
    let config = load_config()?;

    // URL list: positional args first, then file lines
    if let Some(path) = file {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| eyre!("cannot read URL file '{}': {e}", path.display()))?;
        urls.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(String::from),
        );
    }

    if urls.is_empty() {
        return Err(eyre!("no URLs given: pass them as arguments or via --file"));
    }

    // CLI flags override config file values
    let mut scrape = ScrapeConfig::from(&config);
    if let Some(t) = threshold {
        scrape.hire_rate_threshold = t;
    }
    if let Some(c) = concurrency {
        scrape.concurrency = c;
    }
    if enrich {
        scrape.enrich_profiles = true;
    }
    scrape.validate()?;

    let out_path = out.unwrap_or_else(|| PathBuf::from(&config.defaults.output));

    info!(
        jobs = urls.len(),
        threshold = scrape.hire_rate_threshold,
        enrich = scrape.enrich_profiles,
        out = %out_path.display(),
        "starting scrape"
    );

    let batch = BatchConfig {
        urls,
        scrape,
    };

    let reporter = CliProgress::new();
    let records = run_batch(&batch, &reporter).await?;

    joblens_export::write_csv(&records, &out_path)?;

    let errors = records.iter().filter(|r| r.is_error()).count();
    let high_trust = records.iter().filter(|r| r.is_high_trust).count();

    println!();
    println!("  Scrape finished!");
    println!("  Jobs:       {}", records.len());
    println!("  High trust: {high_trust}");
    println!("  Errors:     {errors}");
    println!("  Output:     {}", out_path.display());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn job_scraped(&self, url: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Scraped [{current}/{total}] {url}"));
    }

    fn done(&self, _records: &[JobRecord]) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
