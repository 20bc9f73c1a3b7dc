//! Upstream fetching for single query units with error classification

use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::pipeline::api::urls::events_on_day_url;
use crate::pipeline::models::{ApiEvent, EventsDayResponse};

/// Longest upstream error body carried into an error value
const MAX_UPSTREAM_MESSAGE_CHARS: usize = 200;

/// Fetches the raw fixture records for one calendar date.
///
/// Failure classes are kept distinct because the orchestrator treats them
/// differently: `ApiRateLimit` halts the whole run, everything else is
/// logged and skipped. Retries are not performed here - every outbound
/// attempt must first be recorded against the request budget by the
/// caller.
///
/// An upstream day without fixtures (`{"events": null}`) is a success
/// with an empty batch, not an error.
pub(super) async fn fetch_events_for_day(
    client: &Client,
    config: &Config,
    date: &str,
) -> Result<Vec<ApiEvent>, AppError> {
    let url = events_on_day_url(&config.api_base_url, date);
    info!("Fetching fixtures for {date} from {url}");

    let response = match client
        .get(&url)
        .header("X-API-KEY", &config.api_key)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            error!("Request failed for URL {}: {}", url, e);
            return if e.is_timeout() {
                Err(AppError::network_timeout(&url))
            } else if e.is_connect() {
                Err(AppError::network_connection(&url, e.to_string()))
            } else {
                Err(AppError::ApiFetch(e))
            };
        }
    };

    let status = response.status();
    debug!("Response status for {date}: {status}");

    if !status.is_success() {
        let status_code = status.as_u16();
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        let body = response.text().await.unwrap_or_default();
        let message = upstream_message(&body, reason);

        warn!("HTTP {} - {} (URL: {})", status_code, message, url);

        return Err(match status_code {
            404 => AppError::api_not_found(&url),
            429 => AppError::api_rate_limit(message, &url),
            400..=499 => AppError::api_client_error(status_code, message, &url),
            502 | 503 => AppError::api_service_unavailable(status_code, message, &url),
            _ => AppError::api_server_error(status_code, message, &url),
        });
    }

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length for {date}: {} bytes", response_text.len());

    match serde_json::from_str::<EventsDayResponse>(&response_text) {
        Ok(parsed) => {
            let events = parsed.events.unwrap_or_default();
            info!("Fetched {} raw events for {date}", events.len());
            Ok(events)
        }
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);

            if response_text.trim().is_empty() {
                Err(AppError::api_no_data("Response body is empty", &url))
            } else if !response_text.trim_start().starts_with('{')
                && !response_text.trim_start().starts_with('[')
            {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    &url,
                ))
            } else {
                Err(AppError::api_unexpected_structure(e.to_string(), &url))
            }
        }
    }
}

/// Trims an upstream error body down to something loggable, falling back
/// to the canonical status reason when the body is empty
fn upstream_message(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.chars().take(MAX_UPSTREAM_MESSAGE_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::api::http_client::create_test_http_client;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> Config {
        Config {
            api_base_url: base_url,
            api_key: "test-key".to_string(),
            listen_port: 0,
            lookahead_days: 3,
            http_timeout_seconds: 5,
            log_file_path: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_success_with_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eventsday.php"))
            .and(query_param("d", "2026-08-26"))
            .and(query_param("s", "Soccer"))
            .and(header("X-API-KEY", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "events": [
                    { "idEvent": "1", "strHomeTeam": "A", "strAwayTeam": "B",
                      "dateEvent": "2026-08-26", "strLeague": "Test League" }
                ]
            })))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let config = test_config(server.uri());

        let events = fetch_events_for_day(&client, &config, "2026-08-26")
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id_event.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_fetch_null_events_is_empty_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eventsday.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "events": null })),
            )
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let config = test_config(server.uri());

        let events = fetch_events_for_day(&client, &config, "2026-08-27")
            .await
            .unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_429_maps_to_rate_limit_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eventsday.php"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let config = test_config(server.uri());

        let err = fetch_events_for_day(&client, &config, "2026-08-26")
            .await
            .unwrap_err();
        assert!(err.is_upstream_rate_limit());
        assert_eq!(err.rate_limit_message(), Some("Rate limit exceeded"));
    }

    #[tokio::test]
    async fn test_fetch_500_maps_to_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eventsday.php"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let config = test_config(server.uri());

        let err = fetch_events_for_day(&client, &config, "2026-08-26")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ApiServerError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_fetch_503_maps_to_service_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eventsday.php"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let config = test_config(server.uri());

        let err = fetch_events_for_day(&client, &config, "2026-08-26")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::ApiServiceUnavailable { status: 503, .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eventsday.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let config = test_config(server.uri());

        let err = fetch_events_for_day(&client, &config, "2026-08-26")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ApiMalformedJson { .. }));
    }

    #[test]
    fn test_upstream_message_truncates() {
        let long = "x".repeat(500);
        assert_eq!(upstream_message(&long, "reason").len(), 200);
        assert_eq!(upstream_message("  ", "reason"), "reason");
    }
}
