use std::error::Error as _;
use std::time::Duration;

use reachr_common::error::ProbeError;
use reachr_common::report::{EndpointResult, EndpointStatus, HealthReport};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

pub fn build_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(concat!("reachr/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Sends a single GET. Any response, whatever its status, is `Ok`.
pub async fn get(
    client: &Client,
    url: &str,
    request_timeout: Duration,
) -> Result<Response, ProbeError> {
    debug!("GET {url} (timeout {}s)", request_timeout.as_secs_f64());
    client
        .get(url)
        .timeout(request_timeout)
        .send()
        .await
        .map_err(|e| classify_error(&e, request_timeout))
}

pub async fn probe_endpoint(
    client: &Client,
    url: &str,
    request_timeout: Duration,
) -> EndpointStatus {
    match get(client, url, request_timeout).await {
        Ok(response) => EndpointStatus::from_status(response.status().as_u16()),
        Err(e) => e.into(),
    }
}

/// Requests `base_url + path` for every path, one after another.
pub async fn probe_endpoints(
    client: &Client,
    base_url: &str,
    paths: &[String],
    request_timeout: Duration,
) -> Vec<EndpointResult> {
    let mut results: Vec<EndpointResult> = Vec::with_capacity(paths.len());
    for path in paths {
        let url = reachr_common::config::join_url(base_url, path);
        let status = probe_endpoint(client, &url, request_timeout).await;
        results.push(EndpointResult {
            path: path.clone(),
            url,
            status,
        });
    }
    results
}

/// Requests a health endpoint and reads the `status` field of its JSON body.
pub async fn fetch_health(client: &Client, url: &str, request_timeout: Duration) -> HealthReport {
    let response = match get(client, url, request_timeout).await {
        Ok(response) => response,
        Err(e) => {
            return HealthReport {
                url: url.to_string(),
                status: e.into(),
                service_status: None,
            };
        }
    };

    let status = EndpointStatus::from_status(response.status().as_u16());
    let service_status = match response.json::<Value>().await {
        Ok(body) => Some(service_status(&body)),
        Err(e) => {
            debug!("Health body of {url} is not JSON: {e}");
            None
        }
    };

    HealthReport {
        url: url.to_string(),
        status,
        service_status,
    }
}

fn service_status(body: &Value) -> String {
    match body.get("status") {
        Some(Value::String(status)) => status.clone(),
        Some(other) => other.to_string(),
        None => "unknown".to_string(),
    }
}

/// Sorts a reqwest failure into the categories the report distinguishes.
pub fn classify_error(err: &reqwest::Error, request_timeout: Duration) -> ProbeError {
    if err.is_timeout() {
        ProbeError::Timeout(request_timeout)
    } else if err.is_connect() {
        ProbeError::ConnectionRefused
    } else if let Some(status) = err.status() {
        ProbeError::Status(status.as_u16())
    } else {
        ProbeError::Http(error_chain(err))
    }
}

fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
