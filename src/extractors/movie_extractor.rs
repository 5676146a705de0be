use select::{
    document::Document,
    predicate::{And, Attr, Name},
};
use serde_json::Value;

use crate::{
    error::{Error, Result},
    model::movie::{MovieRecord, GENRE_PLACEHOLDER, NAME_PLACEHOLDER, RATING_PLACEHOLDER},
};

const LD_JSON_TYPE: &str = "application/ld+json";

#[derive(Debug)]
pub struct MovieExtractor {}

impl MovieExtractor {
    pub fn extract_movies_from_html(html_body: &str) -> Result<Vec<MovieRecord>> {
        let ld_json = MovieExtractor::extract_ld_json(html_body)
            .ok_or_else(|| Error::parse("page has no application/ld+json script element"))?;

        let structured_data: Value = serde_json::from_str(&ld_json)
            .map_err(|e| Error::parse(format!("structured data is not valid JSON: {}", e)))?;

        MovieExtractor::extract_movies_from_structured_data(&structured_data)
    }

    /// Text of the first linked-data script on the page.
    pub fn extract_ld_json(html_body: &str) -> Option<String> {
        Document::from(html_body)
            .find(And(Name("script"), Attr("type", LD_JSON_TYPE)))
            .map(|n| n.text())
            .next()
    }

    pub fn extract_movies_from_structured_data(structured_data: &Value) -> Result<Vec<MovieRecord>> {
        let list_items = match structured_data.get("itemListElement") {
            None | Some(Value::Null) => {
                return Err(Error::parse(
                    "structured data has no 'itemListElement' property",
                ))
            }
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(Error::parse(format!(
                    "'itemListElement' is not a list: {}",
                    other
                )))
            }
        };

        Ok(list_items
            .iter()
            .map(MovieExtractor::extract_movie_from_list_item)
            .collect())
    }

    fn extract_movie_from_list_item(list_item: &Value) -> MovieRecord {
        let item = list_item.get("item").filter(|item| item.is_object());

        let name = item
            .and_then(|item| item.get("name"))
            .and_then(MovieExtractor::value_as_text)
            .unwrap_or_else(|| NAME_PLACEHOLDER.to_string());

        let genre = item
            .and_then(|item| item.get("genre"))
            .and_then(MovieExtractor::value_as_text)
            .unwrap_or_else(|| GENRE_PLACEHOLDER.to_string());

        let rating = item
            .and_then(|item| item.get("aggregateRating"))
            .and_then(|aggregate| aggregate.get("ratingValue"))
            .and_then(MovieExtractor::value_as_text)
            .unwrap_or_else(|| RATING_PLACEHOLDER.to_string());

        MovieRecord { name, genre, rating }
    }

    /// Flattens a scalar or a list of scalars into text. Empty and null values
    /// count as absent so the caller falls back to its placeholder.
    fn value_as_text(value: &Value) -> Option<String> {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(values) => values
                .iter()
                .filter_map(MovieExtractor::value_as_text)
                .collect::<Vec<_>>()
                .join(","),
            Value::Null | Value::Object(_) => return None,
        };

        Some(text).filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_with_ld_json(ld_json: &str) -> String {
        format!(
            "<html><head><title>Most popular movies</title>\
             <script type=\"application/ld+json\">{}</script></head>\
             <body><h1>Chart</h1></body></html>",
            ld_json
        )
    }

    #[test]
    fn extracts_name_genre_and_rating_from_each_list_item() {
        let html = page_with_ld_json(
            r#"{"@type":"ItemList","itemListElement":[
                {"@type":"ListItem","item":{"name":"Dune","genre":"Action, Adventure","aggregateRating":{"ratingValue":8.5}}},
                {"@type":"ListItem","item":{"name":"Past Lives","genre":"Drama","aggregateRating":{"ratingValue":7.8}}}
            ]}"#,
        );

        let movies = MovieExtractor::extract_movies_from_html(&html).unwrap();

        assert_eq!(
            movies,
            vec![
                MovieRecord::new("Dune", "Action, Adventure", "8.5"),
                MovieRecord::new("Past Lives", "Drama", "7.8"),
            ]
        );
    }

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let data = json!({"itemListElement": [
            {"item": {"name": "Unrated"}},
            {"item": {"genre": "Horror", "aggregateRating": {}}},
            {"position": 3},
            {"item": {"name": "", "genre": null, "aggregateRating": {"ratingValue": 6}}}
        ]});

        let movies = MovieExtractor::extract_movies_from_structured_data(&data).unwrap();

        assert_eq!(
            movies,
            vec![
                MovieRecord::new("Unrated", GENRE_PLACEHOLDER, RATING_PLACEHOLDER),
                MovieRecord::new(NAME_PLACEHOLDER, "Horror", RATING_PLACEHOLDER),
                MovieRecord::new(NAME_PLACEHOLDER, GENRE_PLACEHOLDER, RATING_PLACEHOLDER),
                MovieRecord::new(NAME_PLACEHOLDER, GENRE_PLACEHOLDER, "6"),
            ]
        );
    }

    #[test]
    fn genre_list_is_joined_with_commas() {
        let data = json!({"itemListElement": [
            {"item": {"name": "Alien", "genre": ["Horror", "Sci-Fi"], "aggregateRating": {"ratingValue": "8.5"}}}
        ]});

        let movies = MovieExtractor::extract_movies_from_structured_data(&data).unwrap();

        assert_eq!(movies, vec![MovieRecord::new("Alien", "Horror,Sci-Fi", "8.5")]);
    }

    #[test]
    fn uses_the_first_ld_json_script() {
        let html = "<html><head>\
            <script type=\"text/javascript\">var x = 1;</script>\
            <script type=\"application/ld+json\">{\"itemListElement\":[]}</script>\
            <script type=\"application/ld+json\">{\"other\":true}</script>\
            </head></html>";

        assert_eq!(
            MovieExtractor::extract_ld_json(html).as_deref(),
            Some("{\"itemListElement\":[]}")
        );
        assert_eq!(MovieExtractor::extract_movies_from_html(html).unwrap(), vec![]);
    }

    #[test]
    fn page_without_ld_json_is_a_parse_error() {
        let html = "<html><body><script>var data = {};</script></body></html>";

        let err = MovieExtractor::extract_movies_from_html(html).unwrap_err();

        assert!(err.is_parse(), "unexpected error: {:?}", err);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let html = page_with_ld_json("{\"itemListElement\": [");

        let err = MovieExtractor::extract_movies_from_html(&html).unwrap_err();

        assert!(err.is_parse(), "unexpected error: {:?}", err);
    }

    #[test]
    fn missing_or_malformed_item_list_is_a_parse_error() {
        for data in [json!({"name": "chart"}), json!({"itemListElement": null}), json!({"itemListElement": "nope"})] {
            let err = MovieExtractor::extract_movies_from_structured_data(&data).unwrap_err();
            assert!(err.is_parse(), "unexpected error for {}: {:?}", data, err);
        }
    }
}
