use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local};
use rayon::prelude::*;

use crate::logging;

/// 預設單檔最大大小：10 MB
const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;
/// 預設保留天數：7 天
const DEFAULT_MAX_AGE_DAYS: u64 = 7;

/// 依日期與檔案大小輪轉的日誌檔
///
/// 每天使用一個新檔案，同一天超過 `max_size` 時改寫入 `name.1.log`、`name.2.log`...
pub struct Rotate {
    /// 檔名模式，例如 "log/%Y-%m-%d-name.log"
    fn_pattern: String,
    /// 當前基礎檔名（不含 generation，由日期決定）
    cur_base_fn: String,
    /// 當前完整檔名（含 generation）
    cur_fn: String,
    out_fh: Option<BufWriter<File>>,
    /// 當前世代編號，只增不減
    generation: u32,
    max_size: u64,
    current_size: u64,
    max_age: Duration,
}

impl Rotate {
    pub fn new(fn_pattern: String) -> Self {
        Self::with_options(fn_pattern, DEFAULT_MAX_SIZE, DEFAULT_MAX_AGE_DAYS)
    }

    /// * `max_size` - 單檔最大大小 (bytes)
    /// * `max_age_days` - 日誌保留天數
    pub fn with_options(fn_pattern: String, max_size: u64, max_age_days: u64) -> Self {
        Rotate {
            fn_pattern,
            cur_base_fn: String::new(),
            cur_fn: String::new(),
            out_fh: None,
            generation: 0,
            max_size,
            current_size: 0,
            max_age: Duration::from_secs(max_age_days * 24 * 60 * 60),
        }
    }

    /// 寫入日誌訊息，自動處理換日與大小超限的輪轉
    pub fn write_msg(&mut self, now: DateTime<Local>, msg: &[u8]) -> Result<()> {
        let base_fn = now.format(&self.fn_pattern).to_string();

        // 日期變更：重設 generation
        if base_fn != self.cur_base_fn || self.out_fh.is_none() {
            self.generation = 0;
            self.cur_base_fn = base_fn;
            self.open_new_file()?;
            self.cleanup_old_files();
        }

        if self.current_size > 0 && self.current_size + msg.len() as u64 > self.max_size {
            self.generation += 1;
            self.open_new_file()?;
        }

        let writer = self
            .out_fh
            .as_mut()
            .ok_or_else(|| anyhow!("The log file {} is not opened", self.cur_fn))?;
        writer.write_all(msg)?;
        self.current_size += msg.len() as u64;

        Ok(())
    }

    pub fn flush(&mut self) {
        if let Some(writer) = self.out_fh.as_mut() {
            if let Err(why) = writer.flush() {
                logging::error_console(format!("Failed to flush log file. because:{:?}", why));
            }
        }
    }

    pub fn current_file(&self) -> &str {
        &self.cur_fn
    }

    /// generation = 0: "log/2025-02-03-app.log"
    /// generation = 2: "log/2025-02-03-app.2.log"
    fn generate_full_fn(base_fn: &str, generation: u32) -> String {
        if generation == 0 {
            return base_fn.to_string();
        }

        let path = Path::new(base_fn);
        let parent = path.parent().unwrap_or(Path::new(""));
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("log");
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("log");

        parent
            .join(format!("{}.{}.{}", stem, generation, ext))
            .to_string_lossy()
            .to_string()
    }

    fn open_new_file(&mut self) -> Result<()> {
        self.flush();

        let filename = Self::generate_full_fn(&self.cur_base_fn, self.generation);
        if let Some(parent) = Path::new(&filename).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&filename)?;

        self.current_size = file.metadata().map(|m| m.len()).unwrap_or(0);
        self.out_fh = Some(BufWriter::with_capacity(4096, file));
        self.cur_fn = filename;

        Ok(())
    }

    /// 清理同目錄下超過保留期限的 .log 檔
    fn cleanup_old_files(&self) {
        let files = match Self::files_in_directory(&self.cur_fn) {
            Ok(files) => files,
            Err(why) => {
                logging::error_console(format!(
                    "Failed to list files in the log directory because {:?}",
                    why
                ));
                return;
            }
        };

        let cut_off = match SystemTime::now().checked_sub(self.max_age) {
            Some(t) => t,
            None => return,
        };

        let to_unlink: Vec<PathBuf> = files
            .into_iter()
            .filter(|file| file.extension().is_some_and(|ext| ext == "log"))
            .filter(|file| {
                fs::metadata(file)
                    .and_then(|m| m.modified())
                    .is_ok_and(|modified| modified <= cut_off)
            })
            .collect();

        to_unlink
            .par_iter()
            .with_min_len(num_cpus::get())
            .for_each(|unlink| {
                if let Err(why) = fs::remove_file(unlink) {
                    logging::error_console(format!(
                        "couldn't remove the file({}). because {:?}",
                        unlink.display(),
                        why
                    ));
                }
            });
    }

    fn files_in_directory<P: AsRef<Path>>(file_path: P) -> Result<Vec<PathBuf>, io::Error> {
        let parent_dir = match file_path.as_ref().parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(parent_dir)? {
            files.push(entry?.path());
        }

        Ok(files)
    }
}

impl Drop for Rotate {
    fn drop(&mut self) {
        self.flush();
    }
}
