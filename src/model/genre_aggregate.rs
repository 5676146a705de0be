/// Running total and count behind one genre's average rating.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreAggregate {
    pub genre: String,
    pub total_rating: f64,
    pub count: u32,
}

impl GenreAggregate {
    /// Aggregates only come into existence with their first rating, so
    /// `count` is never zero.
    pub fn new(genre: impl Into<String>, first_rating: f64) -> Self {
        GenreAggregate {
            genre: genre.into(),
            total_rating: first_rating,
            count: 1,
        }
    }

    pub fn add(&mut self, rating: f64) {
        self.total_rating += rating;
        self.count += 1;
    }

    pub fn average(&self) -> GenreAverage {
        GenreAverage {
            genre: self.genre.clone(),
            average_rating: self.total_rating / f64::from(self.count),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreAverage {
    pub genre: String,
    pub average_rating: f64,
}
