//! Display formatting for counts, money, rates and dates.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Follower and view counts are shown in units of 万 (ten thousand).
pub fn wan(value: f64) -> String {
    format!("{:.1}万", value / 10_000.0)
}

pub fn currency_wan(value: f64) -> String {
    format!("¥{}", wan(value))
}

/// Backend rates are already percentages (`8.5` means 8.5%).
pub fn percent(value: f64) -> String {
    format!("{value}%")
}

pub fn roi(value: f64) -> String {
    format!("{value}x")
}

pub fn out_of_100(value: f64) -> String {
    format!("{value}/100")
}

pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `2024-03-07` becomes `03-07`; anything unparseable keeps its last five characters.
pub fn date_tick(date: &str) -> String {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%m-%d").to_string(),
        Err(_) => {
            let chars: Vec<char> = date.chars().collect();
            chars[chars.len().saturating_sub(5)..].iter().collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareRow {
    pub name: String,
    pub value: f64,
    pub share: String,
}

/// Distribution entries with whole-percent shares, largest first.
pub fn shares(distribution: &BTreeMap<String, f64>) -> Vec<ShareRow> {
    let total: f64 = distribution.values().sum();
    let mut rows: Vec<ShareRow> = distribution
        .iter()
        .map(|(name, value)| {
            let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            ShareRow {
                name: name.clone(),
                value: *value,
                share: format!("{pct:.0}%"),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    rows
}
