use std::sync::Arc;

use anyhow::Result;

use crate::{crawler::yahoo::Yahoo, scheduler::QuoteJob};

pub mod collector;
pub mod config;
pub mod crawler;
pub mod declare;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod scheduler;
pub mod ticker;
pub mod util;

#[cfg(all(target_os = "linux", target_env = "musl"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let app = config::App::get()?;
    logging::debug_file_async(format!("SETTINGS: {:#?}", app));

    let source = Arc::new(Yahoo::new(&app)?);
    let job = Arc::new(QuoteJob::new(source, ticker::symbols(), &app));

    scheduler::serve(job, &app.scheduler).await
}
