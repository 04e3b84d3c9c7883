use clap::Parser;
use colored::Colorize;
use miette::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use quadrant::config::{CollisionPolicy, Config};
use quadrant::report::{ReportFormat, Reporter};
use quadrant::watch::{FileWatcher, DEFAULT_DEBOUNCE_MS};
use quadrant::{load_modules, GenerationReport, Generator};

/// quadrant - Generate Kotlin constants for every activity in an Android project
#[derive(Parser, Debug)]
#[command(name = "quadrant")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project root (the directory holding settings.gradle[.kts])
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for the generated source, relative to the project root
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Name of the generated Kotlin object
    #[arg(long)]
    container_name: Option<String>,

    /// Package of the generated file
    #[arg(long)]
    package_name: Option<String>,

    /// Patterns to exclude from manifest discovery (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Fail on constant name collisions instead of qualifying them
    #[arg(long)]
    strict: bool,

    /// Discover and parse modules in parallel
    #[arg(long)]
    parallel: bool,

    /// Print the generated source instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Report file (for json format)
    #[arg(long)]
    report_output: Option<PathBuf>,

    /// Watch mode - regenerate whenever manifests or build scripts change
    #[arg(long)]
    watch: bool,

    /// Debounce window for watch mode, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("quadrant v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    if cli.watch {
        run_watch_mode(&config, &cli)
    } else {
        run_generation(&config, &cli)
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        // Try to load from default locations
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    if let Some(dir) = &cli.output_dir {
        config.output_directory = dir.clone();
    }
    if let Some(name) = &cli.container_name {
        config.container_name = name.clone();
    }
    if let Some(package) = &cli.package_name {
        config.package_name = package.clone();
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if cli.strict {
        config.collision_policy = CollisionPolicy::Strict;
    }
    if cli.parallel {
        config.parallel = true;
    }

    config.validate()?;
    Ok(config)
}

/// One full run: discover modules, generate, report
fn generate_once(config: &Config, root: &Path, dry_run: bool) -> Result<GenerationReport> {
    info!("Discovering modules in {}", root.display());
    let modules = load_modules(root, config)?;

    let generator = Generator::new(config, root);
    let report = if dry_run {
        generator.dry_run(&modules)?
    } else {
        generator.generate(&modules)?
    };
    Ok(report)
}

fn run_generation(config: &Config, cli: &Cli) -> Result<()> {
    // Dry run owns stdout for the generated source
    if cli.dry_run
        && !cli.quiet
        && matches!(cli.format, OutputFormat::Json)
        && cli.report_output.is_none()
    {
        return Err(miette::miette!(
            "--dry-run prints the generated source to stdout; pass --report-output <FILE> for the JSON report"
        ));
    }

    let report = generate_once(config, &cli.path, cli.dry_run)?;

    if cli.dry_run {
        print!("{}", report.source);
    }

    if !cli.quiet {
        Reporter::new(cli.format.clone().into(), cli.report_output.clone())
            .with_verbose(cli.verbose)
            .report(&report)?;
    }

    Ok(())
}

fn run_watch_mode(config: &Config, cli: &Cli) -> Result<()> {
    // notify reports absolute paths
    let root = cli.path.canonicalize().unwrap_or_else(|_| cli.path.clone());
    let watcher = FileWatcher::new(config, &root).with_debounce_ms(cli.debounce_ms);

    let config = config.clone();
    let reporter = Reporter::new(cli.format.clone().into(), cli.report_output.clone())
        .with_verbose(cli.verbose);
    let quiet = cli.quiet;

    watcher
        .watch(move || {
            match generate_once(&config, &root, false) {
                Ok(report) => {
                    if !quiet {
                        if let Err(e) = reporter.report(&report) {
                            eprintln!("{}: {}", "Report error".red(), e);
                        }
                    }
                    println!();
                    println!("{}", "✓ Generation complete. Waiting for changes...".green());
                }
                Err(e) => {
                    eprintln!("{}: {:?}", "Generation error".red(), e);
                }
            }
            true // Keep watching
        })
        .map_err(|e| miette::miette!("Watch error: {}", e))?;

    Ok(())
}
