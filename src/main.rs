use clap::{Parser, Subcommand};
use folio_motion::{config, output, simulate};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "folio-motion")]
#[command(about = "Interactive behavior layer for single-page portfolio sites")]
#[command(long_about = "\
Interactive behavior layer for single-page portfolio sites

Drives the loading overlay, sticky header, mobile menu, typewriter, scroll
reveals, card cascades and stat counters of a portfolio page. The page is
modeled as an in-memory document on a virtual clock, so every run is
deterministic.

Configuration (all keys optional, merged over stock defaults):

  [elements]     ids of the wired elements (loader, header, hamburger, ...)
  [loader]       message cycle and removal timing
  [header]       scroll thresholds and nav offsets
  [typewriter]   phrases and typing speed
  [reveal]       observer threshold, margin, target classes, card cascades
  [counter]      count-up steps and tick
  [parallax]     hero parallax (off by default)
  [contact]      contact-form fields and notices
  [lazy_images]  deferred image attribute

Run 'folio-motion gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Behavior config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Flags for the `simulate` command.
#[derive(clap::Args, Clone)]
struct SimulateArgs {
    /// Comma-separated scroll offsets applied one step apart
    #[arg(long)]
    scroll: Option<String>,

    /// Virtual time between scrolls and clicks, in ms
    #[arg(long, default_value_t = 500)]
    step_ms: u64,

    /// Virtual time of the page load event, in ms
    #[arg(long, default_value_t = 1500)]
    load_at: u64,

    /// Element id to click after scrolling (repeatable)
    #[arg(long = "click")]
    clicks: Vec<String>,

    /// Virtual time to let animations settle at the end, in ms
    #[arg(long, default_value_t = 3000)]
    settle_ms: u64,

    /// Print the trace as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scripted session on the demo portfolio and print every change
    Simulate(SimulateArgs),
    /// Load and validate the config, then print a summary
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Simulate(args) => {
            let config = config::load_config(cli.config.as_deref())?;
            let mut scenario = simulate::Scenario {
                load_at: args.load_at,
                step_ms: args.step_ms,
                clicks: args.clicks,
                settle_ms: args.settle_ms,
                ..simulate::Scenario::default()
            };
            if let Some(list) = &args.scroll {
                scenario.scrolls = simulate::parse_scrolls(list)?;
            }
            let sim = simulate::run_scenario(config, &scenario)?;
            let ended_at = sim.now();
            if args.json {
                println!("{}", serde_json::to_string_pretty(sim.trace())?);
            } else {
                output::print_trace(sim.trace(), ended_at);
            }
        }
        Command::Check => {
            let config = config::load_config(cli.config.as_deref())?;
            if let Some(path) = &cli.config {
                println!("==> Checking {}", path.display());
            } else {
                println!("==> Checking stock defaults");
            }
            output::print_config_summary(&config);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
