//! Endpoint failover client
//!
//! Issues one logical query against an ordered endpoint list, advancing to
//! the next endpoint on transport failure, non-2xx status, or a non-empty
//! GraphQL error array. The probe is a bounded loop carrying the last
//! error, and every logical request starts again from index 0.

use crate::error::{QuerierError, Result};
use crate::intent::QueryIntent;
use crate::response::{GraphQlResponse, ResultSet};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// One POST to one endpoint. Implemented over reqwest in production and by
/// scripted fakes in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, endpoint: &str, body: &Value) -> Result<GraphQlResponse>;
}

pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, endpoint: &str, body: &Value) -> Result<GraphQlResponse> {
        let response = self
            .http
            .post(endpoint)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| QuerierError::Transport(format!("POST {} failed: {}", endpoint, e)))?;

        // Non-2xx is a failover trigger, not a distinct error class.
        if !response.status().is_success() {
            return Err(QuerierError::Transport(format!(
                "{} returned status {}",
                endpoint,
                response.status()
            )));
        }

        response
            .json::<GraphQlResponse>()
            .await
            .map_err(|e| {
                QuerierError::Transport(format!("invalid response from {}: {}", endpoint, e))
            })
    }
}

pub struct FailoverClient {
    transport: Arc<dyn Transport>,
    endpoints: Vec<String>,
}

impl FailoverClient {
    pub fn new(transport: Arc<dyn Transport>, endpoints: Vec<String>) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Run one logical query, failing over across the endpoint list with an
    /// identical payload. Succeeds on the first endpoint returning HTTP
    /// success and an empty error list; otherwise fails with
    /// `AllEndpointsExhausted` carrying the last underlying error.
    pub async fn request(&self, intent: QueryIntent, variables: Value) -> Result<ResultSet> {
        let body = json!({
            "query": intent.document(),
            "variables": variables,
        });

        let mut last_error = QuerierError::Transport("no endpoints configured".to_string());

        for endpoint in &self.endpoints {
            match self.transport.execute(endpoint, &body).await {
                Ok(response) => {
                    if !response.errors.is_empty() {
                        let messages: Vec<String> =
                            response.errors.into_iter().map(|e| e.message).collect();
                        warn!(%endpoint, "remote returned errors: {}", messages.join("; "));
                        last_error = QuerierError::RemoteApi(messages.join("; "));
                        continue;
                    }
                    debug!(%endpoint, ?intent, "query succeeded");
                    return ResultSet::decode(intent, response.data);
                }
                Err(err) if err.is_recoverable() => {
                    warn!(%endpoint, "endpoint failed: {}", err);
                    last_error = err;
                }
                Err(err) => return Err(err),
            }
        }

        Err(QuerierError::AllEndpointsExhausted {
            last: Box::new(last_error),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays a scripted outcome per call and records every endpoint hit.
    struct ScriptedTransport {
        script: Mutex<Vec<std::result::Result<Value, String>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<std::result::Result<Value, String>>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, endpoint: &str, _body: &Value) -> Result<GraphQlResponse> {
            self.calls.lock().unwrap().push(endpoint.to_string());
            let step = self.script.lock().unwrap().remove(0);
            match step {
                Ok(raw) => Ok(serde_json::from_value(raw)?),
                Err(message) => Err(QuerierError::Transport(message)),
            }
        }
    }

    fn endpoints(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://api-{}.example/graphql", i)).collect()
    }

    fn ranking_reply() -> Value {
        json!({"data": {"authorRanking": [{"rank": 1, "name": "A", "value": 10.0}]}})
    }

    #[tokio::test]
    async fn test_first_endpoint_success_makes_one_call() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(ranking_reply())]));
        let client = FailoverClient::new(transport.clone(), endpoints(3));

        let result = client
            .request(QueryIntent::AuthorRankInBranch, json!({"baseUrl": null}))
            .await
            .unwrap();

        assert_eq!(result.into_authors().unwrap().len(), 1);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failover_reaches_third_endpoint() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err("connection refused".to_string()),
            Err("connection reset".to_string()),
            Ok(ranking_reply()),
        ]));
        let client = FailoverClient::new(transport.clone(), endpoints(3));

        let result = client
            .request(QueryIntent::AuthorRankInBranch, json!({"baseUrl": null}))
            .await
            .unwrap();

        assert_eq!(result.into_authors().unwrap().len(), 1);
        assert_eq!(transport.call_count(), 3);
        assert_eq!(
            transport.calls.lock().unwrap().as_slice(),
            &[
                "https://api-0.example/graphql".to_string(),
                "https://api-1.example/graphql".to_string(),
                "https://api-2.example/graphql".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_remote_error_array_triggers_failover() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(json!({"data": null, "errors": [{"message": "internal"}]})),
            Ok(ranking_reply()),
        ]));
        let client = FailoverClient::new(transport.clone(), endpoints(2));

        let result = client
            .request(QueryIntent::AuthorRankInBranch, json!({"baseUrl": null}))
            .await
            .unwrap();

        assert_eq!(result.into_authors().unwrap().len(), 1);
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_exhaustion_carries_last_error() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err("refused by api-0".to_string()),
            Err("refused by api-1".to_string()),
            Err("refused by api-2".to_string()),
        ]));
        let client = FailoverClient::new(transport.clone(), endpoints(3));

        let err = client
            .request(QueryIntent::AuthorRankInBranch, json!({"baseUrl": null}))
            .await
            .unwrap_err();

        assert_eq!(transport.call_count(), 3);
        match err {
            QuerierError::AllEndpointsExhausted { last } => {
                assert!(last.to_string().contains("refused by api-2"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_endpoint_list_exhausts_immediately() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let client = FailoverClient::new(transport.clone(), Vec::new());

        let err = client
            .request(QueryIntent::AuthorRankInBranch, json!({"baseUrl": null}))
            .await
            .unwrap_err();

        assert!(matches!(err, QuerierError::AllEndpointsExhausted { .. }));
        assert_eq!(transport.call_count(), 0);
    }
}
