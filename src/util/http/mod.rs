use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use reqwest::Client;

use crate::{config, logging};

pub mod element;
pub mod user_agent;

/// Builds the reqwest client shared by every request of the crawler.
///
/// The rustls `ring` provider is installed on first use; later calls keep the
/// provider that is already installed.
pub fn build_client(settings: &config::Scraper) -> Result<Client> {
    let _ = rustls::crypto::ring::default_provider().install_default();

    Client::builder()
        // ===== 壓縮 =====
        .brotli(true)
        .gzip(true)
        .zstd(true)
        // ===== 超時設置 =====
        .connect_timeout(settings.connect_timeout())
        .timeout(settings.timeout())
        // ===== TCP =====
        .tcp_nodelay(true)
        .tcp_keepalive(Duration::from_secs(60))
        // ===== 連接池 =====
        .pool_max_idle_per_host(settings.concurrency.max(1))
        .pool_idle_timeout(Duration::from_secs(90))
        // ===== Cookie 和重定向 =====
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::limited(5))
        // ===== Headers =====
        .referer(true)
        .user_agent(user_agent::gen_random_ua())
        .build()
        .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))
}

/// Performs an HTTP GET request and returns the response as text.
///
/// A response whose status is not 2xx is treated as an error, the same as a
/// transport failure. No retry is attempted.
pub async fn get_text(client: &Client, url: &str) -> Result<String> {
    let start = Instant::now();
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|why| anyhow!("Failed to GET:{} because {:?}", url, why))?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("GET:{} responded with {}", url, status));
    }

    let text = response
        .text()
        .await
        .map_err(|why| anyhow!("Error parsing response text from {}: {:?}", url, why))?;

    logging::debug_file_async(format!(
        "GET:{} {} {} ms",
        url,
        status,
        start.elapsed().as_millis()
    ));

    Ok(text)
}

#[cfg(test)]
mod tests {
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    #[tokio::test]
    async fn test_get_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote/AAPL/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let client = build_client(&config::Scraper::default()).expect("client");
        let text = get_text(&client, &format!("{}/quote/AAPL/", server.uri()))
            .await
            .expect("text");

        assert_eq!(text, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_get_text_rejects_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_client(&config::Scraper::default()).expect("client");
        let result = get_text(&client, &format!("{}/quote/NOPE/", server.uri())).await;

        assert!(result.is_err());
    }
}
