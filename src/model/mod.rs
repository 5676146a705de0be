pub mod genre_aggregate;
pub mod movie;
