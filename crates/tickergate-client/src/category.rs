use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://api.polygon.io";

// fixed query parameters, per category; callers cannot override these
const RESULT_LIMIT: &str = "10";
const ORDER: &str = "desc";
const FINANCIALS_SORT: &str = "filing_date";
const NEWS_SORT: &str = "published_utc";

/// The four supported data kinds. A `Category` decides both the upstream
/// endpoint queried and how the payload is reshaped into an [`Envelope`].
///
/// [`Envelope`]: crate::envelope::Envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Financials,
    News,
    Overview,
    Price,
}

impl Category {
    pub const VALID_SET: &'static str = "financials, news, overview, price";

    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "financials" => Some(Self::Financials),
            "news" => Some(Self::News),
            "overview" => Some(Self::Overview),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Financials => "financials",
            Self::News => "news",
            Self::Overview => "overview",
            Self::Price => "price",
        }
    }

    /// Upstream URL for `ticker`; expects the ticker already uppercased.
    pub fn endpoint(&self, ticker: &str) -> String {
        match self {
            Self::Financials => format!(
                "{BASE_URL}/vX/reference/financials?ticker={ticker}&limit={RESULT_LIMIT}&order={ORDER}&sort={FINANCIALS_SORT}"
            ),
            Self::News => format!(
                "{BASE_URL}/v2/reference/news?ticker={ticker}&limit={RESULT_LIMIT}&order={ORDER}&sort={NEWS_SORT}"
            ),
            Self::Overview => format!("{BASE_URL}/v3/reference/tickers/{ticker}"),
            Self::Price => format!("{BASE_URL}/v2/aggs/ticker/{ticker}/prev?adjusted=true"),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
