use crate::declare::Quote;

/// 單次執行期間收集到的報價，依加入的順序保存
///
/// 每次排程都會建立新的 `Collector`，不跨執行共用。
#[derive(Debug, Default)]
pub struct Collector {
    records: Vec<Quote>,
}

impl Collector {
    pub fn new() -> Self {
        Collector::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Collector {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, quote: Quote) {
        self.records.push(quote);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Quote] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(company: &str) -> Quote {
        Quote::new(company.to_string(), "1".to_string(), String::new(), String::new())
    }

    #[test]
    fn test_keeps_insertion_order_and_duplicates() {
        let mut c = Collector::new();
        assert!(c.is_empty());

        c.push(quote("B"));
        c.push(quote("A"));
        c.push(quote("B"));

        assert_eq!(c.len(), 3);
        let names: Vec<&str> = c.records().iter().map(|q| q.company.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "B"]);
    }
}
