use std::{path::Path, time::Duration};

pub mod cli;
use cli::{ChartArgs, CollectorArgs};

mod clients;
pub use clients::imdb_client::{ImdbClient, MOVIEMETER_URL};

mod extractors;
pub use extractors::movie_extractor::MovieExtractor;

mod model;
pub use model::{
    genre_aggregate::{GenreAggregate, GenreAverage},
    movie::{MovieRecord, GENRE_PLACEHOLDER, NAME_PLACEHOLDER, RATING_PLACEHOLDER},
};

mod persisters;
pub use persisters::csv_writer::CsvWriter;

mod aggregators;
pub use aggregators::genre_aggregator::{GenreAggregator, GenreRatings};

mod charts;
pub use charts::bar_chart::BarChartRenderer;

pub mod error;
pub use error::{Error, Result};

pub mod logging;

/// Fetches the ranking page and saves its movies as CSV.
pub async fn run_collector(args: &CollectorArgs) -> Result<Vec<MovieRecord>> {
    let client = ImdbClient::new(Duration::from_secs(args.timeout_secs))?;
    let html = client.get_html_from_url(&args.url).await?;

    let movies = save_movies_from_html(&html, &args.output)?;

    log::info!(
        "Saved {} movies to {}",
        movies.len(),
        args.output.display()
    );
    Ok(movies)
}

/// Extracts the movie list from an already fetched page and writes the CSV.
/// Nothing is written when the page cannot be parsed.
pub fn save_movies_from_html(html: &str, file_name: &Path) -> Result<Vec<MovieRecord>> {
    let movies = MovieExtractor::extract_movies_from_html(html)?;
    log::debug!("Extracted {} movies from structured data", movies.len());

    CsvWriter::save_movies_to_csv(&movies, file_name)?;
    Ok(movies)
}

/// Averages the ratings of a collected CSV per genre and plots them.
pub fn run_chart(args: &ChartArgs) -> Result<Vec<GenreAverage>> {
    let ratings = GenreAggregator::aggregate_from_path(&args.input)?;
    let averages = ratings.averages();

    for average in &averages {
        log::info!(
            "{}: average {:.2} over {} movies",
            average.genre,
            average.average_rating,
            ratings.get(&average.genre).map(|a| a.count).unwrap_or(0)
        );
    }

    let renderer = BarChartRenderer::with_font(args.width, args.height, args.font.as_deref());
    renderer.render(&averages, &args.output)?;

    log::info!(
        "Chart saved to {}{}",
        args.output.display(),
        if renderer.is_labeled() { "" } else { " without labels" }
    );
    Ok(averages)
}
