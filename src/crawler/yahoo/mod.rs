//! # Yahoo 財經採集模組
//!
//! 從報價頁 `<base_url>/<symbol>/` 擷取公司名稱、成交價、漲跌幅與漲跌。
//! 版面相關的 CSS selector 全部來自 [`config::Selectors`]。

use anyhow::Result;
use concat_string::concat_string;
use reqwest::Client;

use crate::{config, util};

use self::quote::QuoteSelectors;

/// 即時報價採集子模組
pub mod quote;

/// Yahoo 財經採集器
pub struct Yahoo {
    client: Client,
    base_url: String,
    selectors: QuoteSelectors,
}

impl Yahoo {
    /// selector 設定有誤時回傳錯誤
    pub fn new(app: &config::App) -> Result<Self> {
        let selectors = QuoteSelectors::compile(&app.selectors)?;
        Ok(Self::with_client(
            util::http::build_client(&app.scraper)?,
            &app.scraper.base_url,
            selectors,
        ))
    }

    pub fn with_client(client: Client, base_url: &str, selectors: QuoteSelectors) -> Self {
        Yahoo {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            selectors,
        }
    }
}

/// 網址由前綴與代碼直接串接而成，不做任何跳脫
fn quote_url(base_url: &str, symbol: &str) -> String {
    concat_string!(base_url, "/", symbol, "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_url() {
        assert_eq!(
            quote_url("https://finance.yahoo.com/quote", "AAPL"),
            "https://finance.yahoo.com/quote/AAPL/"
        );
        assert_eq!(
            quote_url("https://finance.yahoo.com/quote", "NQ=F"),
            "https://finance.yahoo.com/quote/NQ=F/"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let _ = rustls::crypto::ring::default_provider().install_default();
        let yahoo = Yahoo::with_client(
            Client::new(),
            "https://finance.yahoo.com/quote/",
            quote::tests::defaults(),
        );
        assert_eq!(yahoo.base_url, "https://finance.yahoo.com/quote");
    }

    #[test]
    fn test_new_rejects_malformed_selector() {
        let mut app = config::App::default();
        app.selectors.price = "fin-streamer[data-field=".to_string();

        let err = Yahoo::new(&app).err().expect("malformed selector must fail");
        assert!(err.to_string().contains("selectors.price"));
    }
}
