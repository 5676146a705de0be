pub const NAME_PLACEHOLDER: &str = "Nome não disponível";
pub const GENRE_PLACEHOLDER: &str = "Gênero não disponível";
pub const RATING_PLACEHOLDER: &str = "Nota não disponível";

/// One entry of the ranking page. `genre` may hold several genres joined by
/// commas and `rating` is kept as the text found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub name: String,
    pub genre: String,
    pub rating: String,
}

impl MovieRecord {
    pub fn new(name: impl Into<String>, genre: impl Into<String>, rating: impl Into<String>) -> Self {
        MovieRecord {
            name: name.into(),
            genre: genre.into(),
            rating: rating.into(),
        }
    }

    pub fn to_csvable_array(&self) -> [&str; 3] {
        [&self.name, &self.genre, &self.rating]
    }

    /// Header line as written by the collector. The padding after each comma
    /// is part of the file format; readers trim it.
    pub fn csv_header_line() -> &'static str {
        "Nome, Gênero, Nota"
    }

    pub fn genre_column() -> &'static str {
        "Gênero"
    }

    pub fn rating_column() -> &'static str {
        "Nota"
    }
}
