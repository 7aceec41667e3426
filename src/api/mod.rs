use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{ConfigTokenStore, TokenStore};
use crate::config::Config;

mod error;
mod groups;
mod resource;
mod workouts;

pub use error::ApiError;
pub use groups::GroupsApi;
pub use resource::ResourceApi;
pub use workouts::WorkoutsApi;

/// API client for the fitness platform backend
pub struct ApiClient {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &Config, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let base_url = Url::parse(config.base_url())
            .with_context(|| format!("Invalid API base URL: {}", config.api.base_url))?;

        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot be used as a base: {}", base_url);
        }

        let mut builder = Client::builder();
        if let Some(seconds) = config.api.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    /// Create a client whose token persists in the default config file
    pub fn from_config(config: &Config) -> Result<Self> {
        let tokens = ConfigTokenStore::new(Config::config_file()?, config.clone());
        Self::new(config, Arc::new(tokens))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Append percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let builder = self.client.request(method, self.endpoint(segments));
        match self.tokens.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and turn any non-success status into an [`ApiError`]
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build().map_err(ApiError::from_transport)?;
        let method = request.method().clone();
        let url = request.url().clone();

        tracing::debug!("{} {}", method, url);

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let error = ApiError::from_transport(e);
                tracing::warn!(%method, %url, error = %error, "API request failed");
                return Err(error);
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status, &body);
        tracing::warn!(%method, %url, status = status.as_u16(), error = %error, "API request failed");

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.tokens.clear() {
                tracing::warn!("Failed to clear stored token: {:#}", e);
            }
        }

        Err(error)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(ApiError::from_transport)
    }

    pub(crate) async fn get_json<T, Q>(&self, segments: &[&str], query: Option<&Q>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut builder = self.request(Method::GET, segments);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        let response = self.execute(builder).await?;
        Self::decode(response).await
    }

    /// GET a collection; paginated envelopes (`data`, `items`) are unwrapped
    pub(crate) async fn get_list<T, Q>(&self, segments: &[&str], query: Option<&Q>) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let value: Value = self.get_json(segments, query).await?;
        let items = list_payload(value)?;

        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|e| ApiError::InvalidResponse(e.to_string())))
            .collect()
    }

    pub(crate) async fn send_json<T, B>(&self, method: Method, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(method, segments).json(body);
        let response = self.execute(builder).await?;
        Self::decode(response).await
    }

    /// Send a request whose response body is ignored
    pub(crate) async fn send_empty(&self, method: Method, segments: &[&str]) -> Result<(), ApiError> {
        self.execute(self.request(method, segments)).await?;
        Ok(())
    }
}

/// A bare array, or an envelope whose `data`/`items` holds one
fn list_payload(value: Value) -> Result<Vec<Value>, ApiError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match ["data", "items"].iter().find_map(|k| map.remove(*k)) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(ApiError::InvalidResponse(format!(
                "expected a list in the response envelope, got {}",
                other
            ))),
            None => Err(ApiError::InvalidResponse(
                "expected a list or a data/items envelope".to_string(),
            )),
        },
        other => Err(ApiError::InvalidResponse(format!("expected a list, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;

    fn client(base_url: &str) -> Result<ApiClient> {
        let mut config = Config::default();
        config.api.base_url = base_url.to_string();
        ApiClient::new(&config, Arc::new(MemoryTokenStore::default()))
    }

    #[test]
    fn test_api_client_creation() {
        assert!(client("http://localhost:3000/api").is_ok());
        assert!(client("not a url").is_err());
    }

    #[test]
    fn test_list_payload_shapes() {
        assert_eq!(list_payload(serde_json::json!([1, 2])).map(|v| v.len()), Ok(2));
        assert_eq!(list_payload(serde_json::json!({ "items": [1] })).map(|v| v.len()), Ok(1));
        assert!(matches!(
            list_payload(serde_json::json!({ "groups": [1] })),
            Err(ApiError::InvalidResponse(_))
        ));
        assert!(matches!(
            list_payload(serde_json::json!({ "data": { "id": 1 } })),
            Err(ApiError::InvalidResponse(_))
        ));
        assert!(matches!(list_payload(serde_json::json!("ok")), Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_endpoint_encodes_segments() -> Result<()> {
        let client = client("http://localhost:3000/api/")?;
        assert_eq!(
            client.endpoint(&["groups", "Morning HIIT", "join"]).as_str(),
            "http://localhost:3000/api/groups/Morning%20HIIT/join"
        );
        assert_eq!(client.endpoint(&["users"]).as_str(), "http://localhost:3000/api/users");
        Ok(())
    }
}
