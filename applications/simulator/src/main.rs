/// Wave Simulator - command-script driver for the playback simulation
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wave_simulator::{CommandInput, LibraryInput, Session, SimulatorConfig};

#[derive(Parser)]
#[command(name = "wave-sim")]
#[command(about = "Wave music playback simulator", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "WAVE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command script against a library
    Run {
        /// Library fixture (JSON)
        #[arg(short, long)]
        library: PathBuf,
        /// Command script (JSON)
        #[arg(short = 'i', long)]
        commands: PathBuf,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a library fixture and print what it contains
    Check {
        /// Library fixture (JSON)
        #[arg(short, long)]
        library: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = SimulatorConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Run {
            library,
            commands,
            output,
        } => run(&config, &library, &commands, output.as_deref())?,
        Commands::Check { library } => check(&library)?,
    }

    Ok(())
}

fn run(
    config: &SimulatorConfig,
    library: &Path,
    commands: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let library = LibraryInput::from_path(library)
        .and_then(|input| input.build())
        .with_context(|| format!("Failed to load library {}", library.display()))?;
    let script = CommandInput::load_script(commands)
        .with_context(|| format!("Failed to read commands {}", commands.display()))?;

    let mut session = Session::new(library, config.analytics.clone());
    let outputs = session.run(&script)?;
    let json = serde_json::to_string_pretty(&outputs)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} results to {}", outputs.len(), path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn check(library: &Path) -> anyhow::Result<()> {
    let library = LibraryInput::from_path(library)
        .and_then(|input| input.build())
        .with_context(|| format!("Failed to load library {}", library.display()))?;

    println!("Listeners:   {}", library.users.len());
    println!("Creators:    {}", library.catalog.creators().len());
    println!("Items:       {}", library.catalog.items().len());
    println!("Collections: {}", library.catalog.collections().len());

    Ok(())
}
