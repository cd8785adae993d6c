#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use traj_viewer::{export_cmd, results_cmd};

#[derive(Parser, Debug)]
#[command(name = "traj-viewer")]
#[command(about = "Trajectory log analyzer and static site exporter", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set TRAJ_VIEWER_LOG)
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a results summary table for one or more log roots
    Results {
        /// Log root directories to analyze
        #[arg(required = true, value_name = "LOG_DIR")]
        log_dirs: Vec<std::path::PathBuf>,
        /// Also write the summary as CSV to this file
        #[arg(long)]
        csv: Option<std::path::PathBuf>,
    },

    /// Export a log root as a static HTML site
    Export {
        /// Root directory for log files
        #[arg(long)]
        log_dir: std::path::PathBuf,
        /// Output directory for the static site
        #[arg(long, short)]
        output: std::path::PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("TRAJ_VIEWER_LOG").unwrap_or_else(|_| {
        if verbose {
            "traj_viewer=debug".to_string()
        } else {
            "traj_viewer=info".to_string()
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Results { log_dirs, csv } => results_cmd::run(log_dirs, csv),
        Commands::Export { log_dir, output } => export_cmd::run(log_dir, output),
    };

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
