use std::{env, path::PathBuf, sync::Arc};

use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;

use crate::{
    config,
    crawler::QuoteSource,
    logging,
    pipeline::{self, RunReport},
};

/// 一次排程觸發的結果
#[derive(Debug)]
pub enum Tick {
    Completed(RunReport),
    /// 上一次的執行尚未結束或服務已在關閉中
    Skipped,
    /// 寫檔失敗，服務將停止
    Failed,
}

/// 定時抓取報價並輸出 CSV 的工作
///
/// 同一時間只允許一次執行，前一次尚未完成時觸發的排程會被略過，
/// 確保寫檔完成後才會開始下一次的抓取。
pub struct QuoteJob {
    source: Arc<dyn QuoteSource>,
    symbols: Vec<String>,
    concurrency: usize,
    output: PathBuf,
    running: Mutex<()>,
    shutdown: CancellationToken,
    fatal: OnceCell<String>,
}

impl QuoteJob {
    pub fn new(source: Arc<dyn QuoteSource>, symbols: Vec<String>, app: &config::App) -> Self {
        QuoteJob {
            source,
            symbols,
            concurrency: app.scraper.concurrency,
            output: app.export.path.clone(),
            running: Mutex::new(()),
            shutdown: CancellationToken::new(),
            fatal: OnceCell::new(),
        }
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// 造成服務停止的錯誤
    pub fn fatal(&self) -> Option<&str> {
        self.fatal.get().map(String::as_str)
    }

    pub async fn tick(&self) -> Tick {
        if self.shutdown.is_cancelled() {
            return Tick::Skipped;
        }

        let _running = match self.running.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                logging::warn_file_async(
                    "The previous run is still in progress, skip this tick".to_string(),
                );
                return Tick::Skipped;
            }
        };

        match pipeline::execute(
            self.source.as_ref(),
            &self.symbols,
            self.concurrency,
            &self.output,
        )
        .await
        {
            Ok(report) => Tick::Completed(report),
            Err(why) => {
                logging::error_file_async(format!("Failed to export quotes because {:?}", why));
                let _ = self.fatal.set(format!("{:?}", why));
                self.shutdown.cancel();
                Tick::Failed
            }
        }
    }

    /// 等待執行中的工作完成
    async fn wait_idle(&self) {
        let _running = self.running.lock().await;
    }
}

/// 啟動排程
pub async fn start(
    sched: &JobScheduler,
    job: Arc<QuoteJob>,
    schedule: &config::Schedule,
) -> Result<()> {
    sched.add(create_job(&schedule.cron, job.clone())?).await?;
    sched.start().await?;

    if schedule.run_on_start {
        tokio::spawn(async move {
            job.tick().await;
        });
    }

    let msg = format!(
        "QuoteCrawler 已啟動 cron:{} Rust OS/Arch: {}/{}",
        schedule.cron,
        env::consts::OS,
        env::consts::ARCH
    );
    logging::info_file_async(msg);

    Ok(())
}

/// 啟動排程後阻塞，直到收到 Ctrl-C 或寫檔失敗
///
/// 收到 Ctrl-C 時會等目前的執行完成後才關閉排程；因寫檔失敗而停止時回傳錯誤。
pub async fn serve(job: Arc<QuoteJob>, schedule: &config::Schedule) -> Result<()> {
    let mut sched = JobScheduler::new().await?;
    start(&sched, job.clone(), schedule).await?;

    let shutdown = job.shutdown_token();
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            logging::info_file_async("Received Ctrl-C, shutting down".to_string());
            shutdown.cancel();
        }
        _ = shutdown.cancelled() => {}
    }

    job.wait_idle().await;
    sched.shutdown().await?;

    match job.fatal() {
        Some(why) => Err(anyhow!("QuoteCrawler stopped because {}", why)),
        None => {
            logging::info_file_async("QuoteCrawler 已停止".to_string());
            Ok(())
        }
    }
}

fn create_job(cron_expr: &str, job: Arc<QuoteJob>) -> Result<Job> {
    Ok(Job::new_async(cron_expr, move |_uuid, _l| {
        let job = job.clone();
        Box::pin(async move {
            if let Tick::Completed(report) = job.tick().await {
                logging::debug_file_async(format!("tick completed, {}", report));
            }
        })
    })?)
}
