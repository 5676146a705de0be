use std::path::PathBuf;

use clap::Parser;

use crate::charts::bar_chart::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Scrapes the IMDb "most popular movies" chart into a CSV file
#[derive(Parser, Debug, Clone)]
#[clap(name = "moviemeter-collect")]
pub struct CollectorArgs {
    /// Page holding the application/ld+json movie list
    #[clap(long, default_value = crate::clients::imdb_client::MOVIEMETER_URL)]
    pub url: String,

    /// CSV file to write, replaced if it exists
    #[clap(long, value_name = "FILE", default_value = "filmes.csv")]
    pub output: PathBuf,

    /// Give up on the page request after this many seconds
    #[clap(long, default_value = "30")]
    pub timeout_secs: u64,
}

/// Plots the average rating per genre of a collected CSV file
#[derive(Parser, Debug, Clone)]
#[clap(name = "moviemeter-chart")]
pub struct ChartArgs {
    /// CSV file produced by moviemeter-collect
    #[clap(long, value_name = "FILE", default_value = "filmes.csv")]
    pub input: PathBuf,

    /// Image to write, replaced if it exists
    #[clap(long, value_name = "FILE", default_value = "genre_ratings.png")]
    pub output: PathBuf,

    #[clap(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    #[clap(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// TrueType font for labels; common system fonts are tried otherwise
    #[clap(long, value_name = "TTF")]
    pub font: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_defaults_match_fixed_paths() {
        let args = CollectorArgs::parse_from(["moviemeter-collect"]);

        assert_eq!(args.url, "https://www.imdb.com/chart/moviemeter/");
        assert_eq!(args.output, PathBuf::from("filmes.csv"));
        assert_eq!(args.timeout_secs, 30);
    }

    #[test]
    fn chart_defaults_match_fixed_paths() {
        let args = ChartArgs::parse_from(["moviemeter-chart"]);

        assert_eq!(args.input, PathBuf::from("filmes.csv"));
        assert_eq!(args.output, PathBuf::from("genre_ratings.png"));
        assert_eq!((args.width, args.height), (800, 600));
        assert_eq!(args.font, None);
    }

    #[test]
    fn chart_options_override_defaults() {
        let args = ChartArgs::parse_from([
            "moviemeter-chart",
            "--input",
            "in.csv",
            "--width",
            "1024",
            "--font",
            "/tmp/font.ttf",
        ]);

        assert_eq!(args.input, PathBuf::from("in.csv"));
        assert_eq!(args.width, 1024);
        assert_eq!(args.height, 600);
        assert_eq!(args.font, Some(PathBuf::from("/tmp/font.ttf")));
    }
}
