use clap::Parser;
use gitdash::commands::{execute_dashboard, execute_snapshot_dump};
use gitdash::core::{logging, print_error, print_hint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitdash")]
#[command(about = "A terminal dashboard for the git repository you are in")]
#[command(version)]
struct Cli {
    /// Path inside the repository to show
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Configuration file in JSON (YAML files such as .gitdash.yaml are not read)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the initial snapshot as JSON and exit
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_file) = logging::init(cli.debug) {
        if cli.debug {
            print_hint(&format!("Logging to {}", log_file.display()));
        }
    }

    let result = if cli.json {
        execute_snapshot_dump(&cli.path, cli.config.as_deref())
    } else {
        execute_dashboard(&cli.path, cli.config.as_deref())
    };

    if let Err(e) = result {
        log::error!("{e}");
        print_error(&e.to_string());
        if e.is_fatal() {
            print_hint("Run gitdash inside a git repository or pass --path <dir>");
        }
        std::process::exit(1);
    }
}
