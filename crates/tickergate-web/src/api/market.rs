use actix_web::{get, http::StatusCode, web, HttpResponse, Responder};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tickergate_client::prelude::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Query string of the data route. Both fields arrive optional so the
/// gateway, not the framework, produces the 400 messages.
#[derive(Debug, Deserialize)]
pub struct DataQuery {
    ticker: Option<String>,
    category: Option<String>,
}

/// Market data for one ticker symbol, in a uniform envelope
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
#[utoipa::path(
    get,
    path = "/data",
    params(
        ("ticker" = Option<String>, Query, description = "Stock ticker symbol, any case"),
        ("category" = Option<String>, Query, description = "One of: financials, news, overview, price")
    ),
    responses(
        (
            status = 200, description = "Uniform envelope around the provider payload",
            content_type = "application/json",
            example = json!({
                "ticker": "AAPL",
                "category": "overview",
                "data": { "name": "Apple Inc." },
                "count": 1,
                "next_page_token": null
            })
        ),
        (status = 400, description = "Missing or invalid parameter, or upstream-reported input error"),
        (status = 500, description = "Credential not configured, or fetch/parse failure")
    )
)]
#[get("/data")]
pub async fn data(query: web::Query<DataQuery>, client: web::Data<Client>) -> impl Responder {
    // fail fast on the query string, before any upstream call
    let (ticker, category) =
        match validate_request(query.ticker.as_deref(), query.category.as_deref()) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("rejected request: {e}");
                return error_response(&e);
            }
        };

    match client.get_ref().market_data(&ticker, category).await {
        Ok(envelope) => HttpResponse::Ok().json(envelope),
        Err(e) => error_response(&e),
    }
}

/// Render a gateway failure as `{"error": ...}` with its status.
fn error_response(e: &GatewayError) -> HttpResponse {
    let status = StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(json!({ "error": e.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_failures_render_as_bad_requests() {
        let response = error_response(&GatewayError::MissingParameter("ticker"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = error_response(&GatewayError::InvalidParameter {
            given: "dividends".to_string(),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failures_mirror_their_status() {
        let response = error_response(&GatewayError::UpstreamError {
            status: 503,
            message: "upstream responded with status 503".to_string(),
        });
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn configuration_failures_are_internal_errors() {
        let response = error_response(&GatewayError::ConfigurationError);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
