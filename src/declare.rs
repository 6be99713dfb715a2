use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// 報價輸出欄位，順序即為 CSV 欄位的順序
#[derive(PartialEq, Eq, Debug, Copy, Clone, EnumIter, IntoStaticStr)]
pub enum QuoteField {
    /// 公司名稱
    Company,
    /// 成交價
    Price,
    /// 漲跌幅
    Change,
    /// 漲跌
    #[strum(serialize = "Change-Value")]
    ChangeValue,
}

impl QuoteField {
    /// 欄位於 CSV 標頭中的名稱
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// CSV 標頭列 `Company,Price,Change,Change-Value`
    pub fn header() -> Vec<&'static str> {
        Self::iter().map(|f| f.name()).collect()
    }
}

/// 單一報價頁面擷取出的資料，所有欄位皆保留網頁上的原始文字
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Quote {
    pub company: String,
    pub price: String,
    pub change: String,
    pub change_value: String,
}

impl Quote {
    pub fn new(company: String, price: String, change: String, change_value: String) -> Self {
        Quote {
            company,
            price,
            change,
            change_value,
        }
    }

    pub fn field(&self, field: QuoteField) -> &str {
        match field {
            QuoteField::Company => &self.company,
            QuoteField::Price => &self.price,
            QuoteField::Change => &self.change,
            QuoteField::ChangeValue => &self.change_value,
        }
    }

    /// 依 [`QuoteField`] 的順序輸出一列資料
    pub fn to_record(&self) -> Vec<&str> {
        QuoteField::iter().map(|f| self.field(f)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        assert_eq!(
            QuoteField::header(),
            vec!["Company", "Price", "Change", "Change-Value"]
        );
    }

    #[test]
    fn test_to_record_follows_header_order() {
        let q = Quote::new(
            "Apple Inc.".to_string(),
            "150.00".to_string(),
            "1.2%".to_string(),
            "+1.80".to_string(),
        );

        assert_eq!(q.to_record(), vec!["Apple Inc.", "150.00", "1.2%", "+1.80"]);
        assert_eq!(q.field(QuoteField::ChangeValue), "+1.80");
    }
}
