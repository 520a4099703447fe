//! Offline data source used when the backend is unreachable: a small fixed
//! asset catalog for search and a simulated price walk for refreshes. All
//! price fields produced here are placeholders, not market data.

use rand::Rng;
use rust_decimal::Decimal;

use crate::constants::DECIMAL_PRECISION;
use crate::holdings::AssetClass;
use crate::market_data::market_data_model::QuoteSummary;

const CATALOG: &[(&str, &str, AssetClass, Option<&str>)] = &[
    ("AAPL", "Apple Inc.", AssetClass::Stock, Some("NASDAQ")),
    ("GOOGL", "Alphabet Inc.", AssetClass::Stock, Some("NASDAQ")),
    ("MSFT", "Microsoft Corporation", AssetClass::Stock, Some("NASDAQ")),
    ("AMZN", "Amazon.com Inc.", AssetClass::Stock, Some("NASDAQ")),
    ("TSLA", "Tesla Inc.", AssetClass::Stock, Some("NASDAQ")),
    ("BTC", "Bitcoin", AssetClass::Crypto, None),
    ("ETH", "Ethereum", AssetClass::Crypto, None),
    ("SOL", "Solana", AssetClass::Crypto, None),
    ("EURUSD", "Euro / US Dollar", AssetClass::Forex, None),
    ("GBPUSD", "British Pound / US Dollar", AssetClass::Forex, None),
    ("SPY", "SPDR S&P 500 ETF", AssetClass::Etf, Some("NYSE")),
    ("QQQ", "Invesco QQQ Trust", AssetClass::Etf, Some("NASDAQ")),
    ("SPX", "S&P 500 Index", AssetClass::Index, None),
];

/// Case-insensitive substring search over the fixed catalog, annotated with
/// randomized placeholder prices.
pub fn search(query: &str, classes: Option<&[AssetClass]>) -> Vec<QuoteSummary> {
    let needle = query.to_lowercase();
    CATALOG
        .iter()
        .filter(|(symbol, name, class, _)| {
            let class_matches = classes.map_or(true, |wanted| wanted.contains(class));
            class_matches
                && (symbol.to_lowercase().contains(&needle)
                    || name.to_lowercase().contains(&needle))
        })
        .map(|(symbol, name, class, exchange)| {
            let (price, change, change_percent) = mock_quote_fields();
            QuoteSummary {
                symbol: symbol.to_string(),
                name: name.to_string(),
                asset_class: *class,
                exchange: exchange.map(|e| e.to_string()),
                price,
                price_change: change,
                price_change_percent: change_percent,
            }
        })
        .collect()
}

/// One step of the simulated price walk: `price * (1 + U(-5%, +5%))`.
/// Returns the new price plus the implied change fields.
pub fn simulated_walk(price: Decimal) -> (Decimal, Decimal, Decimal) {
    let drift: f64 = rand::thread_rng().gen_range(-0.05..0.05);
    let factor = Decimal::ONE + Decimal::from_f64_retain(drift).unwrap_or_default();
    let new_price = (price * factor).round_dp(DECIMAL_PRECISION);
    let change = new_price - price;
    let change_percent = if price.is_zero() {
        Decimal::ZERO
    } else {
        (change / price * Decimal::ONE_HUNDRED).round_dp(DECIMAL_PRECISION)
    };
    (new_price, change, change_percent)
}

fn mock_quote_fields() -> (Decimal, Decimal, Decimal) {
    let mut rng = rand::thread_rng();
    let price: f64 = rng.gen_range(5.0..500.0);
    let change_percent: f64 = rng.gen_range(-5.0..5.0);
    let change = price * change_percent / 100.0;
    (
        Decimal::from_f64_retain(price).unwrap_or_default().round_dp(2),
        Decimal::from_f64_retain(change).unwrap_or_default().round_dp(2),
        Decimal::from_f64_retain(change_percent)
            .unwrap_or_default()
            .round_dp(2),
    )
}
