use rand::Rng;

/// 報價頁面對行動裝置會回傳不同的版面，所以只模擬桌面瀏覽器
const DESKTOP_OS: [&str; 8] = [
    "Windows NT 10.0; Win64; x64",
    "Windows NT 10.0; WOW64",
    "Windows NT 11.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "Macintosh; Intel Mac OS X 13_6_1",
    "Macintosh; Intel Mac OS X 14_4_1",
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux x86_64",
];

const CHROME_VERSIONS: [&str; 12] = [
    "133.0.6943.98",
    "133.0.6943.60",
    "132.0.6834.110",
    "132.0.6834.83",
    "131.0.6778.108",
    "131.0.6778.85",
    "130.0.6723.117",
    "130.0.6723.92",
    "129.0.6668.89",
    "128.0.6613.138",
    "127.0.6533.119",
    "126.0.6478.182",
];

const FIREFOX_VERSIONS: [&str; 10] = [
    "135.0", "134.0", "133.0", "132.0", "131.0", "130.0", "129.0", "128.0", "127.0", "126.0",
];

const EDGE_VERSIONS: [&str; 8] = [
    "133.0.3065.69",
    "133.0.3065.59",
    "132.0.2957.140",
    "132.0.2957.115",
    "131.0.2903.112",
    "131.0.2903.86",
    "130.0.2849.80",
    "129.0.2792.89",
];

fn pick<'a>(items: &[&'a str]) -> &'a str {
    items[rand::rng().random_range(0..items.len())]
}

fn gen_chrome_ua() -> String {
    let version = pick(&CHROME_VERSIONS);
    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
        pick(&DESKTOP_OS),
        version
    )
}

fn gen_firefox_ua() -> String {
    let version = pick(&FIREFOX_VERSIONS);
    let os = pick(&DESKTOP_OS).replace("_", ".");
    format!(
        "Mozilla/5.0 ({}; rv:{}) Gecko/20100101 Firefox/{}",
        os, version, version
    )
}

fn gen_edge_ua() -> String {
    // Edge 只在 Windows 與 macOS 上
    let os = pick(&DESKTOP_OS[..6]);
    let edge = pick(&EDGE_VERSIONS);
    let chrome = format!("{}.0.0.0", edge.split('.').next().unwrap_or("133"));
    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36 Edg/{}",
        os, chrome, edge
    )
}

/// 產生隨機的桌面瀏覽器 User-Agent
pub fn gen_random_ua() -> String {
    match rand::rng().random_range(0..10) {
        0..=5 => gen_chrome_ua(),
        6..=7 => gen_firefox_ua(),
        _ => gen_edge_ua(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ua_formats() {
        for _ in 0..100 {
            let ua = gen_random_ua();
            assert!(ua.starts_with("Mozilla/5.0 ("), "{}", ua);
            assert!(!ua.contains("Mobile"), "{}", ua);
        }
    }

    #[test]
    fn test_edge_ua_keeps_major_version() {
        let ua = gen_edge_ua();
        let edge = ua.rsplit("Edg/").next().unwrap();
        let major = edge.split('.').next().unwrap();
        assert!(ua.contains(&format!("Chrome/{}.0.0.0", major)), "{}", ua);
    }
}
