use crate::category::Category;
use crate::envelope::Envelope;
use crate::error::GatewayError;
use log::{debug, error};
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;

/// Environment variable holding the provider credential.
pub const API_KEY_VAR: &str = "POLYGON_API_KEY";

// advisory freshness window; the provider's edge may reuse a response this old
const FRESHNESS: &str = "max-age=300";

/// Check the query-string inputs, in order: ticker present and non-empty,
/// category present, category recognized. First failing check wins. Returns
/// the uppercased ticker and parsed category.
pub fn validate_request(
    ticker: Option<&str>,
    category: Option<&str>,
) -> Result<(String, Category), GatewayError> {
    let ticker = ticker
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(GatewayError::MissingParameter("ticker"))?;

    let category = category
        .filter(|c| !c.is_empty())
        .ok_or(GatewayError::MissingParameter("category"))?;

    let category = Category::parse(category).ok_or_else(|| GatewayError::InvalidParameter {
        given: category.to_string(),
    })?;

    Ok((ticker.to_uppercase(), category))
}

pub trait ClientPolygonExt {
    fn market_data(
        &self,
        ticker: &str,
        category: Category,
    ) -> impl Future<Output = Result<Envelope, GatewayError>> + Send;
}

impl ClientPolygonExt for Client {
    /// Fetch `category` data for `ticker` from Polygon and reshape it into
    /// an [`Envelope`]. One GET per call; no retry.
    async fn market_data(&self, ticker: &str, category: Category) -> Result<Envelope, GatewayError> {
        // credential is checked before any network attempt
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(GatewayError::ConfigurationError)?;

        let ticker = ticker.to_uppercase();
        let url = category.endpoint(&ticker);
        debug!("[{ticker}] fetching {category} | URL: {url}");

        // the key rides both the query string and the bearer header; the
        // provider accepts either
        let response = self
            .get(&url)
            .query(&[("apiKey", api_key.as_str())])
            .bearer_auth(&api_key)
            .header(CACHE_CONTROL, FRESHNESS)
            .send()
            .await
            .map_err(|e| {
                error!("[{ticker}] failed to fetch {category} response | ERROR: {e}");
                GatewayError::FetchFailed(e.to_string())
            })?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let failure = upstream_failure(status, &body);
            error!("[{ticker}] {category} upstream rejected the request | {failure}");
            return Err(failure);
        }

        let payload: Value = response.json().await.map_err(|e| {
            error!("[{ticker}] failed to transform {category} response | ERROR: {e}");
            GatewayError::FetchFailed(e.to_string())
        })?;

        if let Some(failure) = embedded_error(&payload) {
            error!("[{ticker}] {category} payload carried an error marker | {failure}");
            return Err(failure);
        }

        Ok(Envelope::reshape(ticker, category, payload))
    }
}

/// Map a non-2xx upstream response to an error mirroring its status, with a
/// message pulled from the body when one is there.
fn upstream_failure(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(Value::as_str)
                .map(String::from)
        })
        .unwrap_or_else(|| format!("upstream responded with status {status}"));

    GatewayError::UpstreamError { status, message }
}

/// A 2xx payload can still flag bad input with `status == "ERROR"`. Held at
/// 400 regardless of the wire status, for compatibility with existing
/// callers.
fn embedded_error(payload: &Value) -> Option<GatewayError> {
    if payload.get("status").and_then(Value::as_str) != Some("ERROR") {
        return None;
    }

    let message = payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("upstream reported an error")
        .to_string();

    Some(GatewayError::UpstreamError {
        status: 400,
        message,
    })
}
