use std::path::Path;

use anyhow::{Context, Result};

use crate::declare::{Quote, QuoteField};

/// 將報價寫入 CSV，檔案已存在時直接覆蓋
///
/// 第一列固定為 `Company,Price,Change,Change-Value`，即使沒有任何報價。
/// 無法建立檔案時回傳錯誤，由呼叫端決定是否中止程式。
pub fn write_csv(path: &Path, quotes: &[Quote]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;

    wtr.write_record(QuoteField::header())
        .context("Failed to write CSV header")?;

    for quote in quotes {
        wtr.write_record(quote.to_record())
            .with_context(|| format!("Failed to write CSV record {:?}", quote))?;
    }

    wtr.flush()
        .with_context(|| format!("Failed to flush CSV file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn quote(company: &str, price: &str, change: &str, change_value: &str) -> Quote {
        Quote::new(
            company.to_string(),
            price.to_string(),
            change.to_string(),
            change_value.to_string(),
        )
    }

    #[test]
    fn test_header_only_when_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("stocks.csv");

        write_csv(&path, &[]).expect("write");

        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "Company,Price,Change,Change-Value\n"
        );
    }

    #[test]
    fn test_quotes_fields_when_needed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("stocks.csv");

        write_csv(
            &path,
            &[quote("Gold", "2,650.10", "(+0.35%)", "+9.20")],
        )
        .expect("write");

        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "Company,Price,Change,Change-Value\nGold,\"2,650.10\",(+0.35%),+9.20\n"
        );
    }

    #[test]
    fn test_overwrites_previous_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("stocks.csv");

        write_csv(
            &path,
            &[
                quote("Apple Inc.", "150.00", "1.2%", "+1.80"),
                quote("Silver", "31.20", "-0.5%", "-0.16"),
            ],
        )
        .expect("first write");
        write_csv(&path, &[quote("Gold", "2650", "0.1%", "+2.5")]).expect("second write");

        let content = fs::read_to_string(&path).expect("read");
        assert_eq!(content.lines().count(), 2);
        assert_eq!(
            content,
            "Company,Price,Change,Change-Value\nGold,2650,0.1%,+2.5\n"
        );
    }

    #[test]
    fn test_unwritable_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("stocks.csv");

        let err = write_csv(&path, &[]).unwrap_err();
        assert!(err.to_string().contains("Failed to create CSV file"));
    }
}
