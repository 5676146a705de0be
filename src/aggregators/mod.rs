pub mod genre_aggregator;
