//! Point d'entrée CLI pour plot-report

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Extraire les informations de parcelle d'exports KML de levé
#[derive(Parser)]
#[command(name = "plot-report")]
#[command(author, version)]
#[command(about = "Extraire champs, coordonnées et contour de parcelle depuis des exports KML")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration: preset (cy) ou chemin vers un JSON
    #[arg(long, global = true, env = "PLOT_REPORT_CONFIG", default_value = "cy")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config = plot_report::Config::resolve(&cli.config)?;

    match cli.command {
        Commands::Extract { path, json } => {
            info!(path = %path.display(), "Extraction");
            cli::cmd_extract(&path, json, &config).await?;
        }
        Commands::Render { path, output } => {
            info!(path = %path.display(), output = %output.display(), "Rendu du contour");
            cli::cmd_render(&path, &output, &config).await?;
        }
        Commands::Export { path, output, jobs } => {
            info!(path = %path.display(), output = %output.display(), "Export des bundles");
            cli::cmd_export(&path, &output, jobs, &config).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
