use anyhow::Context;
use clap::{Parser, Subcommand};
use school_tripper::config::{load_env_files, Settings};
use school_tripper::places::PlaceResolver;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// School Tripper: plan where a class sleeps and eats.
///
/// Finds hostels for a destination, estimates room prices, lists nearby
/// restaurants and suggests a five-item menu for each.
///
/// Examples:
///   tripper plan --country Hungary --city Budapest
///   tripper plan --country magyarorszag --city szeged --date 2026-05-14
///   tripper resolve "budapst"
///   tripper serve --port 8080
#[derive(Parser)]
#[command(name = "tripper", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    settings: Settings,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full search for a destination and print the plan as JSON.
    Plan {
        /// Country name, any spelling the places API understands.
        #[arg(long)]
        country: String,

        /// City name.
        #[arg(long)]
        city: String,

        /// Trip date (YYYY-MM-DD).
        #[arg(long, short = 'd')]
        date: Option<String>,
    },

    /// Correct a free-text place name.
    Resolve {
        #[arg(index = 1)]
        text: String,
    },

    /// Serve the front end and its JSON API.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, short = 'p', default_value_t = 8080)]
        port: u16,
    },
}

fn main() -> anyhow::Result<()> {
    let env_files = load_env_files();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("school_tripper=info,tripper=info")),
        )
        .with_writer(std::io::stderr)
        .init();
    debug!(?env_files, "loaded env files");

    let cli = Cli::parse();

    match cli.command {
        Command::Plan { country, city, date } => {
            let mut planner = cli.settings.build_planner()?;

            let country = planner
                .set_country(&country)
                .country
                .with_context(|| format!("Could not resolve country '{}'", country))?;
            let city = planner
                .set_city(&city)
                .city
                .with_context(|| format!("Could not resolve city '{}'", city))?;
            if let Some(d) = date {
                if planner.set_date(&d).date.is_none() {
                    anyhow::bail!("Invalid date '{}': expected YYYY-MM-DD", d);
                }
            }

            eprintln!("  {} {}, {}", "\u{1F4CD}", city, country);
            let plan = planner.plan();
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }

        Command::Resolve { text } => {
            let places = cli.settings.places_client()?;
            let place = PlaceResolver::new(places)
                .resolve(&text)
                .with_context(|| format!("Could not resolve '{}'", text))?;
            eprintln!("  {} {}", "\u{1F4CD}", place);
            println!("{}", serde_json::to_string_pretty(&place)?);
        }

        Command::Serve { host, port } => {
            let planner = cli.settings.build_planner()?;
            let runtime = tokio::runtime::Runtime::new().context("Cannot start async runtime")?;
            runtime.block_on(school_tripper::server::start(planner, &host, port))?;
        }
    }

    Ok(())
}
