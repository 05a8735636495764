//! Number, time and filter helpers for watchlist rows.

use chrono::{DateTime, Local, TimeZone};

use crate::backend::MarketQuote;

const MISSING: &str = "—";

/// Insert `,` every three digits of the integer part.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn currency_prefix(vs_currency: &str) -> Option<&'static str> {
    match vs_currency {
        "usd" => Some("$"),
        "eur" => Some("€"),
        "gbp" => Some("£"),
        "jpy" => Some("¥"),
        _ => None,
    }
}

/// Prices of 1 and above get two decimals; smaller prices keep up to eight
/// so sub-cent coins stay readable.
pub fn format_price(price: Option<f64>, vs_currency: &str) -> String {
    let Some(price) = price.filter(|p| p.is_finite()) else {
        return MISSING.to_string();
    };
    let sign = if price < 0.0 { "-" } else { "" };
    let abs = price.abs();
    let body = if abs >= 1.0 {
        let text = format!("{abs:.2}");
        let (int, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        format!("{}.{frac}", group_digits(int))
    } else {
        let text = format!("{abs:.8}");
        let trimmed = text.trim_end_matches('0');
        if trimmed.len() < 4 {
            format!("{abs:.2}")
        } else {
            trimmed.to_string()
        }
    };
    match currency_prefix(vs_currency) {
        Some(prefix) => format!("{sign}{prefix}{body}"),
        None => format!("{sign}{body} {}", vs_currency.to_uppercase()),
    }
}

pub fn format_percent(change: Option<f64>) -> String {
    match change.filter(|c| c.is_finite()) {
        Some(c) => format!("{c:+.2}%"),
        None => MISSING.to_string(),
    }
}

/// Whole-number rendering with thousands separators (market cap, supply).
pub fn format_grouped(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => {
            let rounded = format!("{:.0}", v.abs());
            let sign = if v < 0.0 && rounded != "0" { "-" } else { "" };
            format!("{sign}{}", group_digits(&rounded))
        }
        None => MISSING.to_string(),
    }
}

/// RFC 3339 timestamp as a local `h:mm AM/PM` clock time.
pub fn format_updated(last_updated: Option<&str>) -> String {
    format_updated_in(last_updated, &Local)
}

fn format_updated_in<Tz: TimeZone>(last_updated: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    last_updated
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(tz).format("%-I:%M %p").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Case-insensitive substring match on name or code; a blank filter matches all.
pub fn matches_filter(quote: &MarketQuote, filter: &str) -> bool {
    let q = filter.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    quote.name.to_lowercase().contains(&q) || quote.symbol.to_lowercase().contains(&q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn quote(name: &str, symbol: &str) -> MarketQuote {
        MarketQuote {
            id: name.to_lowercase(),
            symbol: symbol.into(),
            name: name.into(),
            current_price: None,
            price_change_percentage_24h: None,
            last_updated: None,
        }
    }

    #[test]
    fn prices() {
        assert_eq!(format_price(Some(64000.5), "usd"), "$64,000.50");
        assert_eq!(format_price(Some(1.0), "eur"), "€1.00");
        assert_eq!(format_price(Some(0.00001234), "usd"), "$0.00001234");
        assert_eq!(format_price(Some(0.5), "usd"), "$0.50");
        assert_eq!(format_price(Some(1234567.891), "chf"), "1,234,567.89 CHF");
        assert_eq!(format_price(None, "usd"), "—");
        assert_eq!(format_price(Some(f64::NAN), "usd"), "—");
    }

    #[test]
    fn percents() {
        assert_eq!(format_percent(Some(1.234)), "+1.23%");
        assert_eq!(format_percent(Some(-0.5)), "-0.50%");
        assert_eq!(format_percent(None), "—");
    }

    #[test]
    fn grouped() {
        assert_eq!(format_grouped(Some(19_700_000.4)), "19,700,000");
        assert_eq!(format_grouped(Some(999.0)), "999");
        assert_eq!(format_grouped(Some(1000.0)), "1,000");
        assert_eq!(format_grouped(None), "—");
    }

    #[test]
    fn updated_clock_time() {
        assert_eq!(format_updated_in(Some("2024-05-01T15:04:00.000Z"), &Utc), "3:04 PM");
        assert_eq!(format_updated_in(Some("2024-05-01T00:30:00Z"), &Utc), "12:30 AM");
        assert_eq!(format_updated_in(Some("yesterday"), &Utc), "—");
        assert_eq!(format_updated_in(None, &Utc), "—");
    }

    #[test]
    fn filter_on_name_or_code() {
        let btc = quote("Bitcoin", "btc");
        assert!(matches_filter(&btc, ""));
        assert!(matches_filter(&btc, "  COIN "));
        assert!(matches_filter(&btc, "BT"));
        assert!(!matches_filter(&btc, "eth"));
    }
}
