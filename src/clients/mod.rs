pub mod imdb_client;
