use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::models::{TrainSearchRequest, TrainSearchResponse};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("journey search returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("journey search request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Executes one journey search. The dispatcher only depends on this seam,
/// so tests can script responses without a network.
#[async_trait]
pub trait JourneySource: Send + Sync {
    async fn search(&self, request: &TrainSearchRequest)
        -> Result<TrainSearchResponse, FetchError>;
}

/// Journey source backed by the Trenitalia HTTP API.
pub struct TrenitaliaClient {
    client: Client,
    endpoint: String,
}

impl TrenitaliaClient {
    pub fn new(endpoint: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("treno-watch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl JourneySource for TrenitaliaClient {
    async fn search(
        &self,
        request: &TrainSearchRequest,
    ) -> Result<TrainSearchResponse, FetchError> {
        log::debug!(
            "Searching journeys for {} ({} -> {})",
            request.departure_time,
            request.departure_location_id,
            request.arrival_location_id
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Cache-Control", "no-cache")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteConfig;
    use crate::query::build_search_request;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn decodes_a_successful_search() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/solutions")
                .header("cache-control", "no-cache")
                .json_body_partial(r#"{ "departureTime": "2024-06-01" }"#);
            then.status(200).json_body(serde_json::json!({
                "searchId": "s-1",
                "solutions": [
                    {
                        "solution": {
                            "id": "1",
                            "origin": "Milano Centrale",
                            "destination": "Roma Termini",
                            "trains": [
                                { "name": "Frecciarossa 9615", "trainCategory": "FR",
                                  "denomination": "Frecciarossa" }
                            ]
                        }
                    }
                ]
            }));
        });

        let client = TrenitaliaClient::new(server.url("/solutions")).unwrap();
        let request = build_search_request("2024-06-01", &RouteConfig::default());
        let response = client.search(&request).await.unwrap();

        mock.assert();
        assert_eq!(response.solutions.len(), 1);
        assert_eq!(
            response.solutions[0].lead_train_name(),
            Some("Frecciarossa 9615")
        );
    }

    #[tokio::test]
    async fn upstream_error_carries_status_and_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/solutions");
            then.status(502).body("upstream unavailable");
        });

        let client = TrenitaliaClient::new(server.url("/solutions")).unwrap();
        let request = build_search_request("2024-06-01", &RouteConfig::default());
        let error = client.search(&request).await.unwrap_err();

        match error {
            FetchError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
