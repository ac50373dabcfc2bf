use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use marquee::catalog::browse;
use marquee::catalog::loader::load_catalog;
use marquee::config::Config;
use marquee::engine::recommender::{Recommender, DEFAULT_TOP_N};
use marquee::output::terminal;
use marquee::posters::client::TmdbClient;

/// Marquee: content-based movie recommendations.
///
/// Finds movies similar to one you name by comparing genres, keywords,
/// cast, and crew across the whole catalog — no ratings history needed.
#[derive(Parser)]
#[command(name = "marquee", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to the given movie id
    Recommend {
        /// Catalog id of the movie to start from
        id: i64,

        /// How many recommendations to show
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },

    /// Browse the catalog with search, genre filter, and pagination
    Browse {
        /// Case-insensitive title search
        #[arg(long)]
        query: Option<String>,

        /// Only show movies in this genre
        #[arg(long)]
        genre: Option<String>,

        /// Page number (20 movies per page)
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// List every genre in the catalog
    Genres,

    /// Fetch poster URLs from TMDB for the catalog
    Posters {
        /// Max movies to fetch posters for
        #[arg(long)]
        limit: Option<usize>,

        /// Number of concurrent TMDB requests (default: 8)
        #[arg(long, default_value = "8")]
        concurrency: usize,
    },

    /// Show catalog statistics
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("marquee=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Recommend { id, top_n } => {
            let catalog = load_catalog(&config.dataset_path)?;
            let recommender = Recommender::new(catalog)?;

            let Some(query) = recommender.movie(id) else {
                anyhow::bail!(
                    "Movie id {id} is not in the catalog. Try `marquee browse` to find one."
                );
            };

            info!(id, top_n, "Computing recommendations");
            let recommendations = recommender.get_recommendations(id, top_n)?;
            terminal::display_recommendations(query, &recommendations);
        }

        Commands::Browse { query, genre, page } => {
            let catalog = load_catalog(&config.dataset_path)?;
            let results = browse::browse(&catalog, query.as_deref(), genre.as_deref(), page);
            terminal::display_browse_page(&results, query.as_deref(), genre.as_deref());
        }

        Commands::Genres => {
            let catalog = load_catalog(&config.dataset_path)?;
            let genres = browse::all_genres(&catalog);
            println!("\n{}", format!("=== {} genres ===", genres.len()).bold());
            for genre in genres {
                println!("  {genre}");
            }
        }

        Commands::Posters { limit, concurrency } => {
            config.require_tmdb()?;
            let catalog = load_catalog(&config.dataset_path)?;

            let mut client = TmdbClient::new(
                &config.tmdb_api_key,
                &config.tmdb_api_url,
                &config.image_base_url,
            )?;

            let ids: Vec<i64> = catalog
                .iter()
                .filter_map(|movie| movie.poster_id)
                .take(limit.unwrap_or(usize::MAX))
                .collect();

            println!("Fetching poster URLs for {} movies...", ids.len());
            let resolved = client.fetch_posters(&ids, concurrency).await;
            println!(
                "{} of {} posters resolved ({} lookups cached)",
                resolved,
                ids.len(),
                client.cache_size()
            );
        }

        Commands::Status => {
            let catalog = load_catalog(&config.dataset_path)?;
            let genres = browse::all_genres(&catalog);
            let with_posters = catalog
                .iter()
                .filter(|movie| movie.poster_id.is_some())
                .count();

            println!("Catalog: {}", config.dataset_path);
            println!("  Movies: {}", catalog.len());
            println!("  Genres: {}", genres.len());
            println!("  With poster ids: {with_posters}");
        }
    }

    Ok(())
}
