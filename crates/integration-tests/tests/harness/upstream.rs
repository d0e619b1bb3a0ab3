//! Simulated FMP API for integration tests

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// API key the test configuration sends upstream
pub const TEST_API_KEY: &str = "test-key";

/// Wiremock server standing in for `https://financialmodelingprep.com/stable`
pub struct MockFmp {
    server: MockServer,
}

impl MockFmp {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to put in `provider.base_url`
    pub fn base_url(&self) -> String {
        format!("{}/stable", self.server.uri())
    }

    /// Answer `GET /stable/{endpoint}?{name}={value}` with `body`, exactly `times` times
    pub async fn expect_json(&self, endpoint: &str, param: (&str, &str), body: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/stable/{endpoint}")))
            .and(query_param(param.0, param.1))
            .and(query_param("apikey", TEST_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Answer every request to `endpoint` with a raw status and body
    pub async fn fail(&self, endpoint: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/stable/{endpoint}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Reject the test if any request reaches the upstream
    pub async fn expect_no_requests(&self) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }
}
