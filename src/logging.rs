use std::{fmt::Write as _, thread};

use chrono::{format::DelayedFormat, DateTime, Local};
use crossbeam_channel::{unbounded, Sender};
use once_cell::sync::Lazy;

use self::rotate::Rotate;

pub mod rotate;

/// 日誌檔存放的目錄
const LOG_DIR: &str = "log";
/// 累積到這個大小才寫入檔案一次
const BATCH_SIZE: usize = 4096;

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("default"));

pub struct Logger {
    writer: Sender<LogMessage>,
}

impl Logger {
    pub fn new(log_name: &str) -> Self {
        Self::with_pattern(format!("{}/%Y-%m-%d-{}.log", LOG_DIR, log_name))
    }

    /// `fn_pattern` 為 chrono 的格式字串，例如 "log/%Y-%m-%d-app.log"
    pub fn with_pattern(fn_pattern: String) -> Self {
        let (tx, rx) = unbounded::<LogMessage>();

        // 寫入檔案的操作使用另一個線程處理
        thread::spawn(move || {
            let mut rotate = Rotate::new(fn_pattern);
            let mut line = String::with_capacity(BATCH_SIZE);

            for received in &rx {
                if writeln!(
                    &mut line,
                    "{} {} {}",
                    received.created_at.format("%F %X%.6f"),
                    received.level,
                    received.msg
                )
                .is_err()
                {
                    continue;
                }

                if rx.is_empty() || line.len() >= BATCH_SIZE {
                    if let Err(why) = rotate.write_msg(received.created_at, line.as_bytes()) {
                        error_console(format!(
                            "Failed to write to log file({}). because:{:?}\r\nmsg:{}",
                            rotate.current_file(),
                            why,
                            line
                        ));
                    }

                    rotate.flush();
                    line.clear();
                }
            }
        });

        Logger { writer: tx }
    }

    pub fn info(&self, log: String) {
        self.send(log::Level::Info, log);
    }

    pub fn warn(&self, log: String) {
        self.send(log::Level::Warn, log);
    }

    pub fn error(&self, log: String) {
        self.send(log::Level::Error, log);
    }

    pub fn debug(&self, log: String) {
        self.send(log::Level::Debug, log);
    }

    fn send(&self, level: log::Level, msg: String) {
        let message = LogMessage::new(level, msg);
        if level <= log::Level::Info {
            println!(
                "{} {} {}",
                message.created_at.format("%Y-%m-%d %H:%M:%S.%3f"),
                message.level,
                message.msg
            );
        }

        if let Err(why) = self.writer.send(message) {
            error_console(why.to_string());
        }
    }
}

pub struct LogMessage {
    pub level: log::Level,
    pub msg: String,
    pub created_at: DateTime<Local>,
}

impl LogMessage {
    pub fn new(level: log::Level, msg: String) -> Self {
        LogMessage {
            level,
            msg,
            created_at: Local::now(),
        }
    }
}

pub fn info_file_async(log: String) {
    LOGGER.info(log);
}

pub fn warn_file_async(log: String) {
    LOGGER.warn(log);
}

pub fn error_file_async(log: String) {
    LOGGER.error(log);
}

pub fn debug_file_async(log: String) {
    LOGGER.debug(log);
}

pub fn error_console(log: String) {
    println!(
        "{} Error {}",
        DelayedFormat::to_string(&Local::now().format("%Y-%m-%d %H:%M:%S.%3f")),
        log
    );
}

#[cfg(test)]
mod tests {
    use std::{fs, time::Duration};

    use super::*;

    #[test]
    fn test_logger_writes_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pattern = dir
            .path()
            .join("%Y-%m-%d-test.log")
            .to_string_lossy()
            .to_string();
        let logger = Logger::with_pattern(pattern.clone());

        logger.info("Visiting: https://example.com/quote/AAPL/".to_string());
        logger.debug("debug only goes to the file".to_string());

        let path = Local::now().format(&pattern).to_string();
        let mut content = String::new();
        for _ in 0..50 {
            content = fs::read_to_string(&path).unwrap_or_default();
            if content.contains("debug only") {
                break;
            }
            thread::sleep(Duration::from_millis(20));
        }

        assert!(content.contains("INFO Visiting: https://example.com/quote/AAPL/"));
        assert!(content.contains("DEBUG debug only goes to the file"));
    }
}
