use anyhow::Result;
use async_trait::async_trait;

use crate::declare::Quote;

/// 雅虎財經
pub mod yahoo;

/// 報價來源
///
/// 抓取 (`fetch_page`) 與解析 (`parse`) 分開，讓排程可以分辨是哪個階段失敗。
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// 回傳代碼對應的報價頁網址
    fn quote_url(&self, symbol: &str) -> String;

    /// 取得代碼對應的報價頁 HTML
    async fn fetch_page(&self, symbol: &str) -> Result<String>;

    /// 從報價頁 HTML 擷取報價資料
    fn parse(&self, html: &str) -> Result<Quote>;
}
