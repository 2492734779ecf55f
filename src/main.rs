//! `game-rec`: browse the game catalog and ask for similar games.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use game_recommender::{
    initialize, Catalog, CatalogFilter, Distribution, Engine, EngineConfig, EngineError, Result,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "game-rec",
    version,
    about = "Explore a video game catalog and get content-based recommendations",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "GAME_REC_DATA",
        value_name = "CSV",
        default_value = "games_dataset_clean.csv",
        help = "Catalog CSV file"
    )]
    data: PathBuf,

    #[arg(long, global = true, value_name = "TOML", help = "Engine configuration file")]
    config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format"
    )]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List games similar to TITLE
    Recommend(RecommendCmd),
    /// Print the (filtered) catalog
    List(FilterArgs),
    /// Count games per genre, platform or release year
    Stats(StatsCmd),
    /// Build the engine and write a CBOR snapshot
    Build(BuildCmd),
}

#[derive(Args, Debug)]
struct RecommendCmd {
    #[arg(value_name = "TITLE", help = "Exact (case-sensitive) game name")]
    title: String,

    #[arg(short, long, help = "Number of recommendations [default: config default_top_k]")]
    k: Option<usize>,

    #[arg(long, value_name = "FILE", help = "Load a prebuilt snapshot instead of the CSV")]
    snapshot: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long = "platform", value_name = "PLATFORM", help = "Keep this platform (repeatable)")]
    platforms: Vec<String>,

    #[arg(long = "year", value_name = "YEAR", help = "Keep this release year (repeatable)")]
    years: Vec<String>,

    #[arg(long = "genre", value_name = "GENRE", help = "Keep this genre(s) value (repeatable)")]
    genres: Vec<String>,

    #[arg(long, value_name = "TEXT", help = "Case-insensitive name search")]
    search: Option<String>,
}

impl From<FilterArgs> for CatalogFilter {
    fn from(args: FilterArgs) -> Self {
        CatalogFilter {
            platforms: args.platforms,
            years: args.years,
            genres: args.genres,
            search: args.search,
        }
    }
}

#[derive(Args, Debug)]
struct StatsCmd {
    #[arg(value_enum)]
    by: StatsBy,

    #[command(flatten)]
    filter: FilterArgs,
}

#[derive(Args, Debug)]
struct BuildCmd {
    #[arg(long, value_name = "FILE", help = "Snapshot output path")]
    out: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StatsBy {
    Genre,
    Platform,
    Year,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(EngineError::NotFound(title)) => {
            eprintln!("no match: no game named {title:?}");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_toml_path(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Recommend(cmd) => {
            let engine = match &cmd.snapshot {
                Some(path) => load_snapshot(path)?,
                None => initialize(Catalog::from_csv_path(&cli.data)?, &config)?,
            };
            let k = cmd.k.unwrap_or(engine.config().default_top_k);
            let recs = engine.recommend_scored(&cmd.title, k)?;
            if recs.is_empty() {
                warn!(title = %cmd.title, "catalog has no other games to recommend");
            }
            match cli.format {
                OutputFormat::Text => {
                    println!("Search Result :");
                    for rec in &recs {
                        println!("{rec}");
                    }
                }
                OutputFormat::Json => print_json(&recs)?,
            }
        }
        Command::List(filter) => {
            let catalog = Catalog::from_csv_path(&cli.data)?;
            let view = catalog.filter(&filter.into());
            match cli.format {
                OutputFormat::Text => {
                    println!(
                        "{:<40} {:<16} {:>4}  {:<24} {:>5}",
                        "name", "platform", "year", "genre(s)", "score"
                    );
                    for r in view.iter() {
                        let score = r.score.map(|s| format!("{s:.0}")).unwrap_or_default();
                        println!(
                            "{:<40} {:<16} {:>4}  {:<24} {:>5}",
                            r.name, r.platform, r.release_year, r.genres, score
                        );
                    }
                    println!("{} of {} games", view.len(), catalog.len());
                }
                OutputFormat::Json => print_json(&view.iter().collect::<Vec<_>>())?,
            }
        }
        Command::Stats(cmd) => {
            let catalog = Catalog::from_csv_path(&cli.data)?;
            let view = catalog.filter(&cmd.filter.into());
            let dist: Distribution = match cmd.by {
                StatsBy::Genre => view.genre_distribution(),
                StatsBy::Platform => view.platform_distribution(),
                StatsBy::Year => view.year_distribution(),
            };
            match cli.format {
                OutputFormat::Text => print!("{dist}"),
                OutputFormat::Json => print_json(&dist)?,
            }
        }
        Command::Build(cmd) => {
            let engine = initialize(Catalog::from_csv_path(&cli.data)?, &config)?;
            let file = File::create(&cmd.out)?;
            engine.to_cbor_writer(BufWriter::new(file))?;
            info!(path = %cmd.out.display(), rows = engine.len(), "snapshot written");
        }
    }
    Ok(())
}

fn load_snapshot(path: &Path) -> Result<Engine> {
    Engine::from_cbor_reader(BufReader::new(File::open(path)?))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{text}");
    Ok(())
}
