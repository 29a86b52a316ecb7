/// GraphQL HTTP transport
///
/// Every operation is a POST of `{query, variables}` to a single
/// endpoint. The response envelope is `{data, errors}`; a non-empty
/// `errors` array wins over `data`, and its first message is passed
/// through verbatim as a server error.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Error;

/// Used when the `GQL_ADMIN_ENDPOINT` environment variable is unset
const DEFAULT_ENDPOINT: &str = "https://graphqlzero.almansi.me/api";

/// Request body for a GraphQL operation
#[derive(Debug, serde::Serialize)]
struct GqlRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// Response envelope from the endpoint
#[derive(Debug, serde::Deserialize)]
struct GqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GqlError>>,
}

#[derive(Debug, serde::Deserialize)]
struct GqlError {
    message: String,
}

/// Client for the GraphQL endpoint
///
/// Cheap to clone (the inner reqwest client is reference-counted),
/// so async tasks can each carry their own copy.
#[derive(Debug, Clone)]
pub struct GqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GqlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        GqlClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Build a client from the `GQL_ADMIN_ENDPOINT` environment
    /// variable, falling back to the built-in default endpoint
    pub fn from_env() -> Self {
        let endpoint = std::env::var("GQL_ADMIN_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        println!("🌐 GraphQL endpoint: {}", endpoint);
        Self::new(endpoint)
    }

    /// Execute one operation and return its `data` payload
    pub async fn execute(&self, query: &'static str, variables: Value) -> Result<Value, Error> {
        let request = GqlRequest { query, variables };

        let response = self
            .http
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| Error::Network(e.to_string()))?;

        let body: GqlResponse = response
            .json()
            .await
            .map_err(|e| Error::Network(format!("invalid response body: {}", e)))?;

        unwrap_envelope(body)
    }
}

/// Separate the GraphQL envelope into data or a server error
fn unwrap_envelope(body: GqlResponse) -> Result<Value, Error> {
    if let Some(errors) = body.errors {
        if let Some(first) = errors.into_iter().next() {
            return Err(Error::Server(first.message));
        }
    }

    match body.data {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(Error::Server("response contained no data".to_string())),
    }
}

/// Decode a typed value found at a JSON pointer inside `data`
///
/// The operations all select a single root field (sometimes with a
/// nested `data` page wrapper), so callers pass pointers like
/// `"/users/data"` or `"/createAlbum"`.
pub fn decode<T: DeserializeOwned>(data: &Value, pointer: &str) -> Result<T, Error> {
    let node = data
        .pointer(pointer)
        .ok_or_else(|| Error::Server(format!("missing field {} in response", pointer)))?;

    serde_json::from_value(node.clone())
        .map_err(|e| Error::Server(format!("unexpected shape at {}: {}", pointer, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> GqlResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_data_passes_through() {
        let body = envelope(json!({ "data": { "users": { "data": [] } } }));
        let data = unwrap_envelope(body).unwrap();
        assert_eq!(data, json!({ "users": { "data": [] } }));
    }

    #[test]
    fn test_errors_win_with_first_message_verbatim() {
        let body = envelope(json!({
            "data": { "deleteUser": null },
            "errors": [
                { "message": "User with id 99 not found" },
                { "message": "second error" }
            ]
        }));
        assert_eq!(
            unwrap_envelope(body),
            Err(Error::Server("User with id 99 not found".to_string()))
        );
    }

    #[test]
    fn test_missing_data_is_a_server_error() {
        let body = envelope(json!({}));
        assert!(matches!(unwrap_envelope(body), Err(Error::Server(_))));

        let body = envelope(json!({ "data": null }));
        assert!(matches!(unwrap_envelope(body), Err(Error::Server(_))));
    }

    #[test]
    fn test_decode_at_pointer() {
        let data = json!({ "user": { "id": "1", "name": "Leanne" } });

        #[derive(serde::Deserialize)]
        struct Probe {
            id: String,
            name: String,
        }

        let probe: Probe = decode(&data, "/user").unwrap();
        assert_eq!(probe.id, "1");
        assert_eq!(probe.name, "Leanne");

        let missing: Result<Probe, _> = decode(&data, "/album");
        assert!(matches!(missing, Err(Error::Server(_))));
    }
}
