use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dataset::MovieCorpus;
use engine::SimilarityEngine;
use history::{DEFAULT_MIN_RATING, sample_favorite};
use resolver::{DEFAULT_NEIGHBORS, MATCH_THRESHOLD, Recommendation, TitleResolver};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Seed used when no title is given and the ratings log yields nothing
const FALLBACK_TITLE: &str = "The Dark Knight";

/// TagRecs - Content-Based Movie Recommendations
#[derive(Parser)]
#[command(name = "tag-recs")]
#[command(about = "Movie recommendations from TF-IDF tag similarity", long_about = None)]
struct Cli {
    /// Path to the movie metadata CSV
    #[arg(long, default_value = "tmdb_5000_movies.csv")]
    movies: PathBuf,

    /// Path to the movie credits CSV
    #[arg(long, default_value = "tmdb_5000_credits.csv")]
    credits: PathBuf,

    /// Path to a personal ratings log CSV, used to seed recommendations
    #[arg(long, default_value = "ratings.csv")]
    ratings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Title to seed from; defaults to a favorite from the ratings log
        #[arg(long)]
        title: Option<String>,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_NEIGHBORS)]
        count: usize,
    },

    /// Resolve a query against the catalog
    Search {
        /// Movie title to search for (fuzzy match)
        #[arg(long)]
        title: String,
    },

    /// Show catalog statistics
    Stats,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load and join the two catalog files (this may take a moment)
    println!(
        "Loading movie dataset from {} and {}...",
        cli.movies.display(),
        cli.credits.display()
    );
    let start = Instant::now();
    let corpus = MovieCorpus::load_from_files(&cli.movies, &cli.credits)
        .context("Failed to load movie dataset")?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        corpus.len(),
        start.elapsed()
    );

    // Vectorize and precompute the all-pairs similarity matrix
    let start = Instant::now();
    let engine = SimilarityEngine::build(&corpus);
    println!(
        "{} Built similarity engine ({} features) in {:?}",
        "✓".green(),
        engine.vocabulary_len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { title, count } => {
            handle_recommend(&engine, &cli.ratings, title, count)?
        }
        Commands::Search { title } => handle_search(&engine, &title)?,
        Commands::Stats => handle_stats(&corpus, &engine)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &SimilarityEngine,
    ratings_path: &Path,
    title: Option<String>,
    count: usize,
) -> Result<()> {
    let resolver = TitleResolver::new(engine);

    // Seed preference order: explicit flag, then a well-rated title from
    // the ratings log, then the stock fallback
    let seed = match title {
        Some(title) => title,
        None => {
            let watched = HashSet::new();
            match sample_favorite(ratings_path, DEFAULT_MIN_RATING, &watched) {
                Some(favorite) => {
                    println!("Seeding from your ratings log: {}", favorite.bold());
                    favorite
                }
                None => {
                    println!(
                        "No usable ratings log; falling back to {}",
                        FALLBACK_TITLE.bold()
                    );
                    FALLBACK_TITLE.to_string()
                }
            }
        }
    };

    let Some(found) = resolver.closest_match(&seed) else {
        println!(
            "{}",
            format!("No close match for '{}' in the catalog.", seed).yellow()
        );
        return Ok(());
    };
    let matched = engine.title_at(found.position).unwrap_or(seed.as_str());

    let recommendations = resolver.neighbors(found.position, count);
    print_recommendations(matched, &recommendations);

    Ok(())
}

/// Handle the 'search' command
fn handle_search(engine: &SimilarityEngine, title: &str) -> Result<()> {
    let resolver = TitleResolver::new(engine);

    let Some(found) = resolver.closest_match(title) else {
        println!(
            "{}",
            format!(
                "No catalog title scores above {} for '{}'.",
                MATCH_THRESHOLD, title
            )
            .yellow()
        );
        return Ok(());
    };

    let matched = engine.title_at(found.position).unwrap_or(title);
    println!(
        "{} {} (match score {:.1})",
        "Best match:".bold().blue(),
        matched,
        found.score
    );

    // Short similarity preview so the match can be sanity-checked
    let preview = resolver.neighbors(found.position, 3);
    if !preview.is_empty() {
        println!("Similar:");
        for rec in &preview {
            println!("  - {} (similarity {:.3})", rec.title, rec.score);
        }
    }

    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(corpus: &MovieCorpus, engine: &SimilarityEngine) -> Result<()> {
    let records = corpus.records();
    let total_tags: usize = records
        .iter()
        .map(|record| record.tags.split_whitespace().count())
        .sum();
    let avg_tags = if records.is_empty() {
        0.0
    } else {
        total_tags as f32 / records.len() as f32
    };

    print!("{}", "Catalog statistics:\n".bold().blue());
    print!("{}Movies: {}\n", "• ".green(), engine.len());
    print!(
        "{}Vocabulary features: {}\n",
        "• ".green(),
        engine.vocabulary_len()
    );
    print!(
        "{}Similarity matrix cells: {}\n",
        "• ".green(),
        engine.len() * engine.len()
    );
    print!("{}Average tags per movie: {:.1}\n", "• ".cyan(), avg_tags);

    Ok(())
}

/// Helper function to format and print a ranked recommendation list
fn print_recommendations(matched: &str, recommendations: &[Recommendation]) {
    print!("{}", format!("Movies like {}:\n", matched).bold().blue());
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} (similarity {:.3})",
            (rank + 1).to_string().green(),
            rec.title,
            rec.score
        );
    }
}
