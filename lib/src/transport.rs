use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::api::Response;
use crate::Error;

/// HTTP capability the client sends through.
///
/// Implementations return every response the server gives, whatever its
/// status; mapping non-2xx to errors is left to the client.
pub trait Transport {
    fn post_json(&self, url: &str, body: String) -> Result<Response, Error>;
}

/// Blocking `reqwest` transport
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// `timeout` is in seconds
    pub fn new(timeout: u64) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: String) -> Result<Response, Error> {
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text()?;

        Ok(Response::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // The blocking client runs its own runtime, so keep it off the test's
    // async workers.
    async fn post(url: String, body: String, timeout: u64) -> Result<Response, Error> {
        tokio::task::spawn_blocking(move || {
            let transport = HttpTransport::new(timeout)?;
            transport.post_json(&url, body)
        })
        .await
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn posts_json_and_keeps_response_intact() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages/send.json"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({"key": "abc123", "message": {"text": "hi"}})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-Request-Id", "req-1")
                    .set_body_string("[{\"email\":\"a@example.com\",\"status\":\"sent\",\"_id\":\"1\"}]"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/messages/send.json", mock_server.uri());
        let body = json!({"key": "abc123", "message": {"text": "hi"}}).to_string();

        let resp = post(url, body, 5).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["x-request-id"], "req-1");
        assert_eq!(
            resp.text(),
            "[{\"email\":\"a@example.com\",\"status\":\"sent\",\"_id\":\"1\"}]"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn server_errors_are_returned_not_raised() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/messages/send.json", mock_server.uri());

        let resp = post(url, "{}".to_string(), 5).await.unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.text(), "Internal Server Error");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn slow_server_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&mock_server)
            .await;

        let url = format!("{}/messages/send.json", mock_server.uri());

        let result = post(url, "{}".to_string(), 1).await;

        assert!(matches!(result, Err(Error::RequestTimeout)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unreachable_server_is_a_request_error() {
        // Nothing listens on the discard port
        let result = post("http://127.0.0.1:9/messages/send.json".to_string(), "{}".to_string(), 5).await;

        assert!(matches!(result, Err(Error::Request(_))));
    }
}
