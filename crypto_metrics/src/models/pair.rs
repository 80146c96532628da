use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PairParseError {
    #[error("Invalid pair {input:?}: expected \"<coin-id>/<vs-currency>\" (e.g. \"bitcoin/usd\")")]
    MissingSeparator { input: String },

    #[error("Invalid pair {input:?}: {side} side is empty")]
    EmptySide { input: String, side: &'static str },
}

/// A trading pair in CoinGecko terms: a coin id and a quote ("vs") currency.
///
/// Parsed from the `"bitcoin/usd"` form; both sides are lowercased, matching
/// how the CoinGecko API expects them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinPair {
    /// CoinGecko coin id (e.g. `bitcoin`, `ethereum`).
    pub base: String,
    /// Quote currency (e.g. `usd`, `eur`).
    pub quote: String,
}

impl CoinPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into().to_lowercase(),
            quote: quote.into().to_lowercase(),
        }
    }

    /// A filesystem- and worksheet-safe label, e.g. `bitcoin-usd`.
    pub fn slug(&self) -> String {
        format!("{}-{}", self.base, self.quote)
    }
}

impl FromStr for CoinPair {
    type Err = PairParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s.split_once('/').ok_or_else(|| PairParseError::MissingSeparator {
            input: s.to_string(),
        })?;

        let base = base.trim();
        let quote = quote.trim();
        if base.is_empty() {
            return Err(PairParseError::EmptySide {
                input: s.to_string(),
                side: "base",
            });
        }
        if quote.is_empty() {
            return Err(PairParseError::EmptySide {
                input: s.to_string(),
                side: "quote",
            });
        }

        Ok(Self::new(base, quote))
    }
}

impl fmt::Display for CoinPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_lowercases() {
        let pair: CoinPair = "Bitcoin/USD".parse().unwrap();
        assert_eq!(pair.base, "bitcoin");
        assert_eq!(pair.quote, "usd");
        assert_eq!(pair.to_string(), "bitcoin/usd");
        assert_eq!(pair.slug(), "bitcoin-usd");
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(matches!(
            "bitcoinusd".parse::<CoinPair>(),
            Err(PairParseError::MissingSeparator { .. })
        ));
    }

    #[test]
    fn rejects_empty_sides() {
        assert!(matches!(
            "/usd".parse::<CoinPair>(),
            Err(PairParseError::EmptySide { side: "base", .. })
        ));
        assert!(matches!(
            "bitcoin/ ".parse::<CoinPair>(),
            Err(PairParseError::EmptySide { side: "quote", .. })
        ));
    }
}
