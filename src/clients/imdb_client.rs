use std::time::Duration;

use reqwest::{header, Client};

use crate::error::Result;

pub const MOVIEMETER_URL: &str = "https://www.imdb.com/chart/moviemeter/";

#[derive(Debug, Clone)]
pub struct ImdbClient {
    client: Client,
}

impl ImdbClient {
    /// IMDb answers 403 to the default reqwest user agent, so requests go out
    /// looking like a desktop browser.
    pub fn new(timeout: Duration) -> Result<Self> {
        let user_agent = header::HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3");
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    pub async fn get_html_from_url(&self, url: &str) -> Result<String> {
        log::info!("Fetching page {}", url);

        let resp = self.client.get(url).send().await?.error_for_status()?;
        log::debug!("Received status {} from {}", resp.status(), url);

        let html = resp.text().await?;
        log::debug!("Read {} bytes of html from {}", html.len(), url);

        Ok(html)
    }
}
