use std::{
    fmt,
    path::Path,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use futures::{stream, StreamExt};

use crate::{collector::Collector, crawler::QuoteSource, export, logging};

/// 單一代碼失敗的階段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 連線失敗或 HTTP 狀態碼不是 2xx
    Fetch,
    /// 頁面缺少公司名稱或成交價
    Extract,
}

#[derive(Debug, Clone)]
pub struct Failure {
    pub symbol: String,
    pub kind: FailureKind,
    pub reason: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} failed: {}", self.symbol, self.kind, self.reason)
    }
}

/// 一次執行的結果摘要
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub records: usize,
    pub failures: Vec<Failure>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn failed(&self, kind: FailureKind) -> Vec<&str> {
        self.failures
            .iter()
            .filter(|f| f.kind == kind)
            .map(|f| f.symbol.as_str())
            .collect()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "records:{} fetch failures:{} extract failures:{} elapsed:{} ms",
            self.records,
            self.failed(FailureKind::Fetch).len(),
            self.failed(FailureKind::Extract).len(),
            self.elapsed.as_millis()
        )
    }
}

/// 抓取所有代碼的報價頁並擷取資料
///
/// 最多同時進行 `concurrency` 個請求，結果依 `symbols` 的順序放入新的 [`Collector`]。
/// 失敗的代碼只記錄下來，不會中斷這次的執行。
pub async fn collect(
    source: &dyn QuoteSource,
    symbols: &[String],
    concurrency: usize,
) -> (Collector, Vec<Failure>) {
    let mut collector = Collector::with_capacity(symbols.len());
    let mut failures = Vec::new();

    let mut pages = stream::iter(symbols.iter().cloned())
        .map(|symbol| async move {
            let page = source.fetch_page(&symbol).await;
            (symbol, page)
        })
        .buffered(concurrency.max(1));

    while let Some((symbol, page)) = pages.next().await {
        let html = match page {
            Ok(html) => html,
            Err(why) => {
                logging::error_file_async(format!("Error: {:?}", why));
                failures.push(Failure {
                    symbol,
                    kind: FailureKind::Fetch,
                    reason: why.to_string(),
                });
                continue;
            }
        };

        match source.parse(&html) {
            Ok(quote) => collector.push(quote),
            Err(why) => {
                logging::warn_file_async(format!(
                    "Failed to extract stock data from {} because {:?}",
                    source.quote_url(&symbol),
                    why
                ));
                failures.push(Failure {
                    symbol,
                    kind: FailureKind::Extract,
                    reason: why.to_string(),
                });
            }
        }
    }

    (collector, failures)
}

/// 執行一次完整的抓取、擷取、收集、匯出
///
/// 只有寫檔失敗會回傳錯誤。寫檔在 blocking 執行緒上進行，不佔用 async worker。
pub async fn execute(
    source: &dyn QuoteSource,
    symbols: &[String],
    concurrency: usize,
    output: &Path,
) -> Result<RunReport> {
    let start = Instant::now();
    let (collector, failures) = collect(source, symbols, concurrency).await;

    if collector.is_empty() {
        logging::warn_file_async("No quote was collected in this run".to_string());
    }

    let records = collector.len();
    let path = output.to_path_buf();
    tokio::task::spawn_blocking(move || export::write_csv(&path, collector.records()))
        .await
        .context("The CSV export task was aborted")??;

    let report = RunReport {
        records,
        failures,
        elapsed: start.elapsed(),
    };

    logging::info_file_async(format!("Wrote {} {}", output.display(), report));
    for failure in &report.failures {
        logging::debug_file_async(failure.to_string());
    }

    Ok(report)
}
