/// 每次排程要抓取報價的代碼，包含個股、期貨、外匯、指數與原物料
pub const TICKERS: [&str; 45] = [
    "PFE",
    "ALTM",
    "NQ=F",
    "GEV",
    "1211.HK",
    "ES=F",
    "MSTR",
    "BTC-USD",
    "ASML",
    "^VIX",
    "EH",
    "LGMK",
    "AMD",
    "LAC",
    "LYFT",
    "RIO",
    "IBRX",
    "BENF",
    "AAPL",
    "OKLO",
    "ASML.AS",
    "PEP",
    "SHOP",
    "IVZ",
    "ADTX",
    "CLSK",
    "TIGR",
    "RACE",
    "WIMI",
    "GBP/USD",
    "USD/JPY",
    "Bitcoin USD",
    "XRP USD",
    "FTSE 100",
    "Nikkei 225",
    "Silver",
    "Gold",
    "VIX",
    "10-Yr Bond",
    "EUR/USD",
    "Crude Oil",
    "Russell 2000 Futures",
    "Nasdaq Futures",
    "Dow Futures",
    "S&P Futures",
];

/// 將固定清單轉為可在執行期間傳遞的擁有權字串
pub fn symbols() -> Vec<String> {
    TICKERS.iter().map(|s| s.to_string()).collect()
}
