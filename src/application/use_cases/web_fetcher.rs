use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::FetchConfig;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::info;

static BLOCK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p, article, div").unwrap());

pub struct WebFetcher {
    client: Client,
}

impl WebFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::FetchError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// GET `url` and return the text of its block-level elements.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let parsed = url::Url::parse(url.trim())
            .map_err(|e| AppError::FetchError(format!("Invalid URL: {}", e)))?;

        let response = self
            .client
            .get(parsed.as_str())
            .send()
            .await
            .map_err(|e| AppError::FetchError(format!("Failed to fetch URL: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::FetchError(format!(
                "HTTP error {}: {}",
                response.status(),
                parsed
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::FetchError(format!("Failed to read response body: {}", e)))?;

        let text = Self::block_text(&html);
        info!(url = %parsed, chars = text.len(), "Fetched page");
        Ok(text)
    }

    /// Text of every `p`, `article` and `div` in document order, joined by
    /// a single space. Nested blocks contribute their text once per match.
    pub fn block_text(html: &str) -> String {
        let document = Html::parse_document(html);

        document
            .select(&BLOCK_SELECTOR)
            .map(|element| element.text().collect::<String>())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> WebFetcher {
        WebFetcher::new(&FetchConfig::default()).unwrap()
    }

    #[test]
    fn test_block_text_collects_blocks_in_order() {
        let html = "<html><head><title>T</title></head><body>\
                    <h1>Heading</h1><p>First para.</p><article>Story</article>\
                    <span>skip</span><p>Second <b>bold</b></p></body></html>";
        assert_eq!(
            WebFetcher::block_text(html),
            "First para. Story Second bold"
        );
    }

    #[test]
    fn test_block_text_repeats_nested_blocks() {
        let html = "<div>outer <p>inner</p></div>";
        assert_eq!(WebFetcher::block_text(html), "outer inner inner");
    }

    #[tokio::test]
    async fn test_fetch_text_from_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/article"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<p>Hello</p><p>there</p>", "text/html"),
            )
            .mount(&server)
            .await;

        let text = fetcher()
            .fetch_text(&format!("{}/article", server.uri()))
            .await
            .unwrap();
        assert_eq!(text, "Hello there");
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher()
            .fetch_text(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FetchError(_)));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_is_fetch_error() {
        let err = fetcher().fetch_text("not a url").await.unwrap_err();
        assert!(matches!(err, AppError::FetchError(_)));
    }
}
