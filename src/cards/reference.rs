//! Static stock reference table and symbol roster.
//!
//! Figures are stored the way they arrive from the data export: prices with a
//! currency prefix, market cap and volume as comma-grouped integers, and a
//! free-text sector label. Parsing is lenient; anything unreadable is zero.

use super::card::CardStats;
use super::sector::Sector;

/// One row of the reference table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StockRecord {
    pub symbol: &'static str,
    pub name: &'static str,
    pub price: &'static str,
    pub market_cap: &'static str,
    pub volume: &'static str,
    pub sector: &'static str,
}

macro_rules! stock {
    ($symbol:literal, $name:literal, $price:literal, $cap:literal, $volume:literal, $sector:literal) => {
        StockRecord {
            symbol: $symbol,
            name: $name,
            price: $price,
            market_cap: $cap,
            volume: $volume,
            sector: $sector,
        }
    };
}

pub const STOCK_TABLE: &[StockRecord] = &[
    stock!("AAPL", "Apple Inc.", "$189.84", "2,952,000,000,000", "52,164,500", "Technology"),
    stock!("MSFT", "Microsoft Corporation", "$415.50", "3,088,000,000,000", "21,500,000", "Technology"),
    stock!("ORCL", "Oracle Corporation", "$118.20", "325,000,000,000", "8,400,000", "Technology"),
    stock!("GOOGL", "Alphabet Inc.", "$171.95", "2,130,000,000,000", "25,000,000", "Communication Services"),
    stock!("META", "Meta Platforms, Inc.", "$493.50", "1,250,000,000,000", "14,000,000", "Communication Services"),
    stock!("NFLX", "Netflix, Inc.", "$640.25", "275,000,000,000", "3,200,000", "Communication Services"),
    stock!("AMZN", "Amazon.com, Inc.", "$183.15", "1,905,000,000,000", "38,000,000", "Consumer Cyclical"),
    stock!("TSLA", "Tesla, Inc.", "$177.29", "565,000,000,000", "95,000,000", "Consumer Cyclical"),
    stock!("F", "Ford Motor Company", "$12.15", "48,500,000,000", "48,000,000", "Consumer Cyclical"),
    stock!("WMT", "Walmart Inc.", "$60.42", "486,000,000,000", "15,600,000", "Consumer Defensive"),
    stock!("KO", "The Coca-Cola Company", "$62.80", "270,000,000,000", "12,300,000", "Consumer Defensive"),
    stock!("PG", "The Procter & Gamble Company", "$165.30", "389,000,000,000", "6,700,000", "Consumer Defensive"),
    stock!("XOM", "Exxon Mobil Corporation", "$118.45", "470,000,000,000", "17,200,000", "Energy"),
    stock!("CVX", "Chevron Corporation", "$158.90", "292,000,000,000", "7,900,000", "Energy"),
    stock!("NEE", "NextEra Energy, Inc.", "$71.60", "147,000,000,000", "10,100,000", "Utilities"),
    stock!("DUK", "Duke Energy Corporation", "$98.75", "76,000,000,000", "3,100,000", "Utilities"),
    stock!("CAT", "Caterpillar Inc.", "$352.10", "172,000,000,000", "2,600,000", "Industrials"),
    stock!("BA", "The Boeing Company", "$181.40", "111,000,000,000", "6,900,000", "Industrials"),
    stock!("LIN", "Linde plc", "$436.20", "210,000,000,000", "1,900,000", "Basic Materials"),
    stock!("FCX", "Freeport-McMoRan Inc.", "$51.30", "73,700,000,000", "13,400,000", "Basic Materials"),
    stock!("PLD", "Prologis, Inc.", "$108.60", "100,500,000,000", "4,200,000", "Real Estate"),
    stock!("AMT", "American Tower Corporation", "$196.80", "91,900,000,000", "2,300,000", "Real Estate"),
    stock!("JPM", "JPMorgan Chase & Co.", "$198.45", "570,000,000,000", "9,100,000", "Financial Services"),
    stock!("V", "Visa Inc.", "$276.30", "555,000,000,000", "6,400,000", "Financial Services"),
    stock!("BAC", "Bank of America Corporation", "$37.60", "294,000,000,000", "35,000,000", "Financial Services"),
    stock!("JNJ", "Johnson & Johnson", "$152.10", "366,000,000,000", "7,200,000", "Healthcare"),
    stock!("UNH", "UnitedHealth Group Incorporated", "$492.60", "453,000,000,000", "3,800,000", "Healthcare"),
    stock!("PFE", "Pfizer Inc.", "$27.40", "155,000,000,000", "34,000,000", "Healthcare"),
    stock!("NVDA", "NVIDIA Corporation", "$903.60", "2,259,000,000,000", "41,000,000", "Semiconductors"),
    stock!("AMD", "Advanced Micro Devices, Inc.", "$158.40", "256,000,000,000", "52,000,000", "Semiconductors"),
    stock!("INTC", "Intel Corporation", "$30.85", "131,000,000,000", "46,000,000", "Semiconductors"),
];

/// Symbols sampled during deck construction.
pub const ROSTER: &[&str] = &[
    "AAPL", "MSFT", "ORCL", "GOOGL", "META", "NFLX", "AMZN", "TSLA", "F", "WMT", "KO", "PG",
    "XOM", "CVX", "NEE", "DUK", "CAT", "BA", "LIN", "FCX", "PLD", "AMT", "JPM", "V", "BAC",
    "JNJ", "UNH", "PFE", "NVDA", "AMD", "INTC",
];

/// Look up a symbol (case-insensitive).
#[must_use]
pub fn lookup(symbol: &str) -> Option<&'static StockRecord> {
    STOCK_TABLE
        .iter()
        .find(|record| record.symbol.eq_ignore_ascii_case(symbol.trim()))
}

/// Parse a currency string like `"$1,234.56"`.
#[must_use]
pub fn parse_currency(raw: &str) -> f64 {
    parse_grouped(raw.trim().trim_start_matches('$'))
}

/// Parse a comma-grouped number like `"2,952,000,000"`.
#[must_use]
pub fn parse_grouped(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

impl StockRecord {
    /// Parsed market stats for this row.
    #[must_use]
    pub fn stats(&self) -> CardStats {
        CardStats {
            price: parse_currency(self.price),
            market_cap: parse_grouped(self.market_cap),
            volume: parse_grouped(self.volume),
        }
    }

    /// Parsed sector, or the fallback sector for an unknown label.
    #[must_use]
    pub fn sector(&self) -> Sector {
        Sector::from_label(self.sector).unwrap_or(Sector::FALLBACK)
    }
}

/// Static stats for a symbol. Unknown symbols yield zeroed stats.
#[must_use]
pub fn generate_random_stats(symbol: &str) -> CardStats {
    lookup(symbol).map(StockRecord::stats).unwrap_or_default()
}
