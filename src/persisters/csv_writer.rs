use std::{fs, io::Write, path::Path};

use csv::{QuoteStyle, WriterBuilder};

use crate::{error::Result, model::movie::MovieRecord};

pub struct CsvWriter {}

impl CsvWriter {
    /// Serializes everything before touching the file, so a failure never
    /// leaves a half-written CSV behind. Existing files are overwritten.
    pub fn save_movies_to_csv(movies: &[MovieRecord], file_name: &Path) -> Result<()> {
        let contents = CsvWriter::movies_to_csv(movies)?;
        fs::write(file_name, contents)?;

        log::debug!("Wrote {} movies to {}", movies.len(), file_name.display());
        Ok(())
    }

    /// Every value is quoted; embedded quotes are doubled.
    pub fn movies_to_csv(movies: &[MovieRecord]) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        writeln!(buffer, "{}", MovieRecord::csv_header_line())?;

        let mut wrt = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .has_headers(false)
            .from_writer(buffer);
        for movie in movies {
            wrt.write_record(movie.to_csvable_array())?;
        }

        Ok(wrt.into_inner().map_err(|e| e.into_error())?)
    }
}
