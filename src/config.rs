use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use anyhow::{Context, Result};
use config::{Config as config_config, File as config_file};
use serde::{Deserialize, Serialize};

use crate::logging;

const CONFIG_PATH: &str = "app.json";

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct App {
    pub scraper: Scraper,
    pub selectors: Selectors,
    pub export: Export,
    pub scheduler: Schedule,
}

const QUOTE_BASE_URL: &str = "QUOTE_BASE_URL";
const QUOTE_CONCURRENCY: &str = "QUOTE_CONCURRENCY";
const QUOTE_CONNECT_TIMEOUT_SECS: &str = "QUOTE_CONNECT_TIMEOUT_SECS";
const QUOTE_TIMEOUT_SECS: &str = "QUOTE_TIMEOUT_SECS";

/// 抓取報價頁面相關的設定
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Scraper {
    /// 報價頁的網址前綴，實際網址為 `<base_url>/<symbol>/`
    pub base_url: String,
    /// 同一輪最多同時進行的請求數
    pub concurrency: usize,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for Scraper {
    fn default() -> Self {
        Scraper {
            base_url: "https://finance.yahoo.com/quote".to_string(),
            concurrency: 5,
            connect_timeout_secs: 8,
            timeout_secs: 15,
        }
    }
}

impl Scraper {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 報價頁面的 CSS selector
///
/// 網站改版時只需要調整這裡，`version` 用來標示目前對應的版面。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Selectors {
    pub version: String,
    /// 包住整個報價區塊的容器
    pub container: String,
    pub company: String,
    pub price: String,
    pub change: String,
    pub change_value: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Selectors {
            version: "yf-1s1umie".to_string(),
            container: "section.container.yf-1s1umie".to_string(),
            company: "h1.yf-xxbei9".to_string(),
            price: "fin-streamer[data-field='regularMarketPrice']".to_string(),
            change: "fin-streamer[data-field='regularMarketChangePercent']".to_string(),
            change_value: "fin-streamer[data-field='regularMarketChange']".to_string(),
        }
    }
}

const QUOTE_OUTPUT_PATH: &str = "QUOTE_OUTPUT_PATH";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Export {
    /// CSV 輸出路徑，相對於目前的工作目錄
    pub path: PathBuf,
}

impl Default for Export {
    fn default() -> Self {
        Export {
            path: PathBuf::from("stocks.csv"),
        }
    }
}

const QUOTE_CRON: &str = "QUOTE_CRON";
const QUOTE_RUN_ON_START: &str = "QUOTE_RUN_ON_START";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Schedule {
    /// sec min hour day-of-month month day-of-week
    pub cron: String,
    /// 啟動時先執行一次，不等第一個排程時間
    pub run_on_start: bool,
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule {
            cron: "0 * * * * *".to_string(),
            run_on_start: true,
        }
    }
}

impl App {
    /// 有設定檔時讀取設定檔，否則使用預設值，最後再以 env 覆蓋
    pub fn get() -> Result<Self> {
        let config_path = config_path();
        let app = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            App::default()
        };

        Ok(app.override_with_env())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        config_config::builder()
            .add_source(config_file::from(path))
            .build()
            .and_then(|c| c.try_deserialize::<App>())
            .with_context(|| format!("Failed to read the config file {}", path.display()))
    }

    /// 將來自於 env 的設定值覆蓋掉設定檔上的設定值
    fn override_with_env(self) -> Self {
        self.override_with(|key| env::var(key).ok())
    }

    fn override_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(QUOTE_BASE_URL) {
            self.scraper.base_url = url;
        }

        if let Some(n) = parse_var(&lookup, QUOTE_CONCURRENCY) {
            self.scraper.concurrency = n;
        }

        if let Some(secs) = parse_var(&lookup, QUOTE_CONNECT_TIMEOUT_SECS) {
            self.scraper.connect_timeout_secs = secs;
        }

        if let Some(secs) = parse_var(&lookup, QUOTE_TIMEOUT_SECS) {
            self.scraper.timeout_secs = secs;
        }

        if let Some(path) = lookup(QUOTE_OUTPUT_PATH) {
            self.export.path = PathBuf::from(path);
        }

        if let Some(cron) = lookup(QUOTE_CRON) {
            self.scheduler.cron = cron;
        }

        if let Some(run_on_start) = parse_var(&lookup, QUOTE_RUN_ON_START) {
            self.scheduler.run_on_start = run_on_start;
        }

        self
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Debug,
{
    let raw = lookup(key)?;
    match T::from_str(raw.trim()) {
        Ok(v) => Some(v),
        Err(why) => {
            logging::error_file_async(format!(
                "Ignore {}={} because {:?}",
                key, raw, why
            ));
            None
        }
    }
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}
