use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::{
    config,
    crawler::{
        yahoo::{self, Yahoo},
        QuoteSource,
    },
    declare::Quote,
    logging,
    util::http::{self, element},
};

#[async_trait]
impl QuoteSource for Yahoo {
    fn quote_url(&self, symbol: &str) -> String {
        yahoo::quote_url(&self.base_url, symbol)
    }

    async fn fetch_page(&self, symbol: &str) -> Result<String> {
        let url = self.quote_url(symbol);
        logging::info_file_async(format!("Visiting: {}", url));
        http::get_text(&self.client, &url).await
    }

    fn parse(&self, html: &str) -> Result<Quote> {
        extract(html, &self.selectors)
    }
}

/// 已編譯的報價頁 selector
///
/// 啟動時由 [`config::Selectors`] 編譯一次，設定錯誤時直接回傳錯誤，
/// 不會等到每一頁擷取時才失敗。
#[derive(Debug, Clone)]
pub struct QuoteSelectors {
    version: String,
    container_css: String,
    container: Selector,
    company: Selector,
    price: Selector,
    change: Selector,
    change_value: Selector,
}

impl QuoteSelectors {
    pub fn compile(selectors: &config::Selectors) -> Result<Self> {
        let parse = |field: &str, css: &str| {
            element::selector(css).with_context(|| {
                format!(
                    "Invalid selectors.{} in selectors version {}",
                    field, selectors.version
                )
            })
        };

        Ok(QuoteSelectors {
            version: selectors.version.clone(),
            container_css: selectors.container.clone(),
            container: parse("container", &selectors.container)?,
            company: parse("company", &selectors.company)?,
            price: parse("price", &selectors.price)?,
            change: parse("change", &selectors.change)?,
            change_value: parse("change_value", &selectors.change_value)?,
        })
    }
}

/// 從報價頁擷取公司名稱、成交價、漲跌幅、漲跌
///
/// 只取第一個符合 `container` 的區塊。公司名稱或成交價為空白時視為擷取失敗，
/// 漲跌幅與漲跌則不做任何檢查。
pub fn extract(html: &str, selectors: &QuoteSelectors) -> Result<Quote> {
    let document = Html::parse_document(html);
    let section = element::first(&document, &selectors.container).ok_or_else(|| {
        anyhow!(
            "The quote container({}) not found, selectors version {}",
            selectors.container_css,
            selectors.version
        )
    })?;

    let quote = Quote::new(
        element::child_text(&section, &selectors.company),
        element::child_text(&section, &selectors.price),
        element::child_text(&section, &selectors.change),
        element::child_text(&section, &selectors.change_value),
    );

    if quote.company.is_empty() || quote.price.is_empty() {
        return Err(anyhow!(
            "Failed to extract stock data, company:{:?} price:{:?}",
            quote.company,
            quote.price
        ));
    }

    Ok(quote)
}
