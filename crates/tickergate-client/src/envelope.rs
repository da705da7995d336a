use crate::category::Category;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The uniform response wrapper returned to callers, whatever the category.
///
/// ```json
/// {
///     "ticker": "AAPL",
///     "category": "news",
///     "data": [ ... ],
///     "count": 10,
///     "next_page_token": "https://api.polygon.io/v2/reference/news?cursor=..."
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub ticker: String,
    pub category: Category,
    pub data: Value,
    pub count: u64,
    pub next_page_token: Option<String>,
}

impl Envelope {
    /// Reshape a raw upstream payload into the envelope. Each category has
    /// its own rule; the envelope shape never varies.
    pub fn reshape(ticker: String, category: Category, payload: Value) -> Self {
        let (data, count, next_page_token) = match category {
            // list-shaped: pass the results through, defaulting to an empty
            // list when the provider sends none
            Category::Financials | Category::News => {
                let count = payload.get("count").and_then(Value::as_u64).unwrap_or(0);
                let next = payload
                    .get("next_url")
                    .and_then(Value::as_str)
                    .map(String::from);
                let results = match payload {
                    Value::Object(mut map) => {
                        map.remove("results").unwrap_or(Value::Array(vec![]))
                    }
                    _ => Value::Array(vec![]),
                };
                (results, count, next)
            }

            // single resource: unwrap the nested object, or fall back to the
            // payload itself
            Category::Overview => {
                let record = match payload {
                    Value::Object(mut map) => match map.remove("results") {
                        Some(record) => record,
                        None => Value::Object(map),
                    },
                    other => other,
                };
                (record, 1, None)
            }

            // aggregate: the whole payload, untouched
            Category::Price => {
                let count = payload
                    .get("resultsCount")
                    .and_then(Value::as_u64)
                    .unwrap_or(0);
                (payload, count, None)
            }
        };

        Self {
            ticker,
            category,
            data,
            count,
            next_page_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn news_passes_results_count_and_token_through() {
        let payload = json!({
            "count": 2,
            "results": [ {"title": "a"}, {"title": "b"} ],
            "next_url": "https://api.polygon.io/v2/reference/news?cursor=abc",
            "status": "OK"
        });
        let env = Envelope::reshape("AAPL".to_string(), Category::News, payload);

        assert_eq!(env.data, json!([{"title": "a"}, {"title": "b"}]));
        assert_eq!(env.count, 2);
        assert_eq!(
            env.next_page_token.as_deref(),
            Some("https://api.polygon.io/v2/reference/news?cursor=abc")
        );
    }

    #[test]
    fn financials_default_to_an_empty_list() {
        let payload = json!({ "status": "OK" });
        let env = Envelope::reshape("AAPL".to_string(), Category::Financials, payload);

        assert_eq!(env.data, json!([]));
        assert_eq!(env.count, 0);
        assert_eq!(env.next_page_token, None);
    }

    #[test]
    fn overview_unwraps_the_nested_record() {
        let payload = json!({ "results": { "name": "Apple Inc." } });
        let env = Envelope::reshape("AAPL".to_string(), Category::Overview, payload);

        assert_eq!(env.data, json!({ "name": "Apple Inc." }));
        assert_eq!(env.count, 1);
        assert_eq!(env.next_page_token, None);
    }

    #[test]
    fn overview_falls_back_to_the_raw_payload() {
        let payload = json!({ "name": "Apple Inc.", "market": "stocks" });
        let env = Envelope::reshape("AAPL".to_string(), Category::Overview, payload.clone());

        assert_eq!(env.data, payload);
        assert_eq!(env.count, 1);
    }

    #[test]
    fn price_keeps_the_entire_payload() {
        let payload = json!({
            "ticker": "MSFT",
            "resultsCount": 1,
            "results": [ { "c": 420.0, "o": 415.5, "v": 1000 } ],
            "status": "OK"
        });
        let env = Envelope::reshape("MSFT".to_string(), Category::Price, payload.clone());

        assert_eq!(env.data, payload);
        assert_eq!(env.count, 1);
        assert_eq!(env.next_page_token, None);
    }

    #[test]
    fn reshaping_is_deterministic() {
        let payload = json!({ "count": 1, "results": [ {"title": "a"} ] });
        let first = Envelope::reshape("AAPL".to_string(), Category::News, payload.clone());
        let second = Envelope::reshape("AAPL".to_string(), Category::News, payload);

        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }
}
