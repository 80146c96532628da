use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::pair::CoinPair;

/// Universal parameters for requesting a historical price range.
///
/// The end of the range is always "now"; providers clip the span to whatever
/// their API allows (14 days for the keyless CoinGecko range endpoint), so a
/// `start` far in the past is a request for "as much as you can give me".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RangeRequest {
    /// The pair to fetch (e.g. `bitcoin/usd`).
    pub pair: CoinPair,

    /// Start of the requested range (inclusive, UTC).
    pub start: DateTime<Utc>,
}
