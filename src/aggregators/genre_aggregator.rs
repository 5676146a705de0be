use std::{collections::HashMap, fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{
    error::{Error, Result},
    model::{
        genre_aggregate::{GenreAggregate, GenreAverage},
        movie::MovieRecord,
    },
};

/// Outcome of one pass over the CSV. Aggregates keep the order in which
/// their genre was first seen.
#[derive(Debug, Default)]
pub struct GenreRatings {
    aggregates: Vec<GenreAggregate>,
    index: HashMap<String, usize>,
    pub rows_read: usize,
    pub skipped_rows: usize,
}

impl GenreRatings {
    /// Credits the full rating to every genre; a two-genre row counts once
    /// for each of them.
    pub fn record<'a>(&mut self, genres: impl IntoIterator<Item = &'a str>, rating: f64) {
        for genre in genres {
            match self.index.get(genre) {
                Some(&i) => self.aggregates[i].add(rating),
                None => {
                    self.index.insert(genre.to_string(), self.aggregates.len());
                    self.aggregates.push(GenreAggregate::new(genre, rating));
                }
            }
        }
    }

    pub fn get(&self, genre: &str) -> Option<&GenreAggregate> {
        self.index.get(genre).map(|&i| &self.aggregates[i])
    }

    pub fn averages(&self) -> Vec<GenreAverage> {
        self.aggregates.iter().map(GenreAggregate::average).collect()
    }

    pub fn len(&self) -> usize {
        self.aggregates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }
}

pub struct GenreAggregator {}

impl GenreAggregator {
    pub fn aggregate_from_path(file_name: &Path) -> Result<GenreRatings> {
        log::info!("Reading movies from {}", file_name.display());
        let file = File::open(file_name)?;
        GenreAggregator::aggregate_from_reader(file)
    }

    /// Folds the CSV rows into per-genre aggregates. Rows whose rating is not
    /// a number are logged and left out; read errors abort the scan.
    pub fn aggregate_from_reader<R: Read>(reader: R) -> Result<GenreRatings> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            log::warn!("CSV has no header row, there is nothing to aggregate");
            return Ok(GenreRatings::default());
        }
        let genre_idx = GenreAggregator::column_index(&headers, MovieRecord::genre_column())?;
        let rating_idx = GenreAggregator::column_index(&headers, MovieRecord::rating_column())?;

        let mut ratings = GenreRatings::default();
        for record in rdr.records() {
            let record = record?;
            ratings.rows_read += 1;

            let rating = match GenreAggregator::parse_rating(record.get(rating_idx)) {
                Some(rating) => rating,
                None => {
                    log::warn!(
                        "Invalid rating found in row {}, skipping it: {:?}",
                        GenreAggregator::line_of(&record),
                        record
                    );
                    ratings.skipped_rows += 1;
                    continue;
                }
            };

            let genres = GenreAggregator::split_genres(record.get(genre_idx).unwrap_or(""));
            if genres.is_empty() {
                log::debug!(
                    "Row {} has no genre, nothing to credit",
                    GenreAggregator::line_of(&record)
                );
            }
            ratings.record(genres, rating);
        }

        log::info!(
            "Read {} rows, skipped {}, found {} genres",
            ratings.rows_read,
            ratings.skipped_rows,
            ratings.len()
        );
        Ok(ratings)
    }

    pub fn split_genres(field: &str) -> Vec<&str> {
        field
            .split(',')
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
            .collect()
    }

    fn parse_rating(field: Option<&str>) -> Option<f64> {
        field?.parse::<f64>().ok().filter(|rating| rating.is_finite())
    }

    fn column_index(headers: &StringRecord, column: &str) -> Result<usize> {
        headers.iter().position(|h| h == column).ok_or_else(|| {
            Error::parse(format!(
                "CSV header {:?} has no '{}' column",
                headers, column
            ))
        })
    }

    fn line_of(record: &StringRecord) -> u64 {
        record.position().map(|p| p.line()).unwrap_or(0)
    }
}
