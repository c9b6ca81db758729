use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{Result, ShelfError};

/// The JSON body of a GraphQL-over-HTTP POST.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    pub variables: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphQlError {
    pub fn code(&self) -> Option<String> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

impl GraphQlResponse {
    /// The `data` member, or the first reported error.
    pub fn into_data(self) -> Result<Value> {
        if let Some(first) = self.errors.into_iter().next() {
            let code = first.code();
            return Err(ShelfError::GraphQl {
                message: first.message,
                code,
            });
        }
        match self.data {
            Some(Value::Null) | None => Err(ShelfError::UnexpectedResponse(
                "response has neither data nor errors".to_string(),
            )),
            Some(data) => Ok(data),
        }
    }
}

/// Sends one GraphQL request and returns the decoded response envelope.
pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: GraphQlRequest)
    -> impl Future<Output = Result<GraphQlResponse>> + Send;
}

/// GraphQL over HTTP POST to a single endpoint.
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Result<Self> {
        install_crypto_provider();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, endpoint })
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: GraphQlRequest) -> Result<GraphQlResponse> {
        tracing::debug!(
            operation = request.operation_name.as_deref().unwrap_or("anonymous"),
            endpoint = %self.endpoint,
            "Sending GraphQL request"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<GraphQlResponse>(&body) {
            // Servers may answer request errors with a 4xx and a normal error list.
            Ok(parsed) if status.is_success() || !parsed.errors.is_empty() => Ok(parsed),
            Ok(_) => Err(ShelfError::Network(format!("server returned {}", status))),
            Err(_) if !status.is_success() => {
                Err(ShelfError::Network(format!("server returned {}", status)))
            }
            Err(e) => Err(ShelfError::UnexpectedResponse(format!(
                "body is not a GraphQL response: {}",
                e
            ))),
        }
    }
}

/// reqwest is built without a bundled rustls provider; install ring once.
fn install_crypto_provider() {
    // Err means a provider is already installed for this process.
    let _ = rustls::crypto::ring::default_provider().install_default();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GraphQlRequest {
            query: "query AllBooks { allBooks { id } }".to_string(),
            operation_name: Some("AllBooks".to_string()),
            variables: json!({}),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["operationName"], "AllBooks");
        assert_eq!(value["variables"], json!({}));
    }

    #[test]
    fn test_into_data_prefers_first_error() {
        let response: GraphQlResponse = serde_json::from_value(json!({
            "data": null,
            "errors": [
                {
                    "message": "Validation failed: Title has already been taken",
                    "extensions": { "code": "VALIDATION_ERROR" }
                },
                { "message": "second" }
            ]
        }))
        .unwrap();

        let err = response.into_data().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Title has already been taken"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_into_data_requires_data() {
        let response: GraphQlResponse = serde_json::from_value(json!({})).unwrap();
        let result = response.into_data();
        assert!(matches!(result, Err(ShelfError::UnexpectedResponse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) on localhost is essentially never listening.
        let transport = HttpTransport::new(Url::parse("http://127.0.0.1:9/graphql").unwrap())
            .unwrap();
        let err = transport
            .execute(GraphQlRequest {
                query: "{ allBooks { id } }".to_string(),
                operation_name: None,
                variables: json!({}),
            })
            .await
            .unwrap_err();
        assert!(err.is_network());
    }
}
