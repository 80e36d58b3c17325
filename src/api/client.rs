use super::endpoints::Endpoint;
use super::models::ApiResult;
use super::params::ApiRequest;
use crate::error::ApiError;
use crate::map_api_error;
use crate::utils::error_helpers::convert_request_error;
use log::debug;
use reqwest::{Client, Method, RequestBuilder};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("pug-client/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the pug coordination API.
///
/// Every operation is one independent request/response exchange; the client
/// keeps no state between calls.
#[derive(Debug, Clone)]
pub struct PugClient {
    client: Client,
    pub base_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl PugClient {
    // Create client with default settings
    pub fn new(base_url: String, api_key: String) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(
        base_url: String,
        api_key: String,
        timeout_secs: u64,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init", timeout_secs))?;

        Ok(PugClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout_secs,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    /// GET requests carry the parameters in the query string, POST requests
    /// as a form-encoded body.
    pub fn build_request(&self, request: &ApiRequest) -> RequestBuilder {
        let method = request.endpoint.method();
        let builder = self
            .client
            .request(method.clone(), self.url_for(request.endpoint));

        if method == Method::GET {
            builder.query(request.params())
        } else {
            builder.form(request.params())
        }
    }

    /// Send a request and decode the body into an envelope.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResult, ApiError> {
        let endpoint = request.endpoint.path();
        debug!("{} {}", request.endpoint.method(), self.url_for(request.endpoint));

        let response = map_api_error!(
            self.build_request(request).send().await,
            &endpoint,
            self.timeout_secs
        )?;

        let status = response.status();
        let body = map_api_error!(response.text().await, &endpoint, self.timeout_secs)?;

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                endpoint,
                message: body,
            });
        }

        let result = ApiResult::from_body(&body, &endpoint)?;
        debug!("{} answered {}", endpoint, result.code());
        Ok(result)
    }

    /// Add a player to a pug. Without a pug id the server picks one, creating
    /// a new pug if every existing one is full.
    pub async fn add_player(
        &self,
        steam_id: u64,
        name: &str,
        size: u32,
        pug_id: Option<u64>,
    ) -> Result<ApiResult, ApiError> {
        self.send(&ApiRequest::add_player(
            &self.api_key,
            steam_id,
            name,
            size,
            pug_id,
        ))
        .await
    }

    /// Remove a player from whatever pug they are in.
    pub async fn remove_player(&self, steam_id: u64) -> Result<ApiResult, ApiError> {
        self.send(&ApiRequest::remove_player(&self.api_key, steam_id))
            .await
    }

    /// Create a pug with the given player as its first member and admin.
    pub async fn create_pug(
        &self,
        steam_id: u64,
        name: &str,
        size: u32,
        map: Option<&str>,
    ) -> Result<ApiResult, ApiError> {
        self.send(&ApiRequest::create_pug(
            &self.api_key,
            steam_id,
            name,
            size,
            map,
        ))
        .await
    }

    pub async fn end_pug(&self, pug_id: u64) -> Result<ApiResult, ApiError> {
        self.send(&ApiRequest::end_pug(&self.api_key, pug_id)).await
    }

    pub async fn list_pugs(&self) -> Result<ApiResult, ApiError> {
        self.send(&ApiRequest::list_pugs(&self.api_key)).await
    }

    pub async fn pug_status(&self, pug_id: u64) -> Result<ApiResult, ApiError> {
        self.send(&ApiRequest::pug_status(&self.api_key, pug_id))
            .await
    }

    pub async fn list_pug_players(&self, pug_id: u64) -> Result<ApiResult, ApiError> {
        self.send(&ApiRequest::list_pug_players(&self.api_key, pug_id))
            .await
    }

    /// Only accepted while the player's pug is in map voting and its map is not forced.
    pub async fn add_map_vote(&self, steam_id: u64, map: &str) -> Result<ApiResult, ApiError> {
        self.send(&ApiRequest::add_map_vote(&self.api_key, steam_id, map))
            .await
    }

    /// Force a pug's map before voting starts. An empty map sends no `map` parameter.
    pub async fn force_map(&self, pug_id: u64, map: &str) -> Result<ApiResult, ApiError> {
        self.send(&ApiRequest::force_map(&self.api_key, pug_id, map))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> PugClient {
        PugClient::new("http://example.test/".to_string(), "123abc".to_string())
            .expect("client creation failed")
    }

    #[test]
    fn test_client_creation() {
        let client = test_client();
        assert_eq!(client.base_url, "http://example.test");
        assert_eq!(client.api_key(), "123abc");
        assert_eq!(client.timeout_secs(), DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_url_for() {
        let client = test_client();
        assert_eq!(
            client.url_for(Endpoint::ListPugPlayers),
            "http://example.test/ITF2Pug/Player/List/"
        );
    }

    #[test]
    fn test_build_get_request_uses_query_string() {
        let client = test_client();
        let request = client.build_request(&ApiRequest::pug_status("123abc", 5));
        let built_request = request.build().expect("Failed to build request");

        assert_eq!(built_request.method(), Method::GET);
        assert_eq!(
            built_request.url().as_str(),
            "http://example.test/ITF2Pug/Status/?key=123abc&pugid=5"
        );
        assert!(built_request.body().is_none());
    }

    #[test]
    fn test_build_post_request_uses_form_body() {
        let client = test_client();
        let request =
            client.build_request(&ApiRequest::add_player("123abc", 15, "joe bloggs", 12, None));
        let built_request = request.build().expect("Failed to build request");

        assert_eq!(built_request.method(), Method::POST);
        assert_eq!(
            built_request.url().as_str(),
            "http://example.test/ITF2Pug/Player/Add/"
        );
        assert_eq!(
            built_request
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("application/x-www-form-urlencoded")
        );
        let body = built_request
            .body()
            .and_then(|b| b.as_bytes())
            .expect("form body");
        assert_eq!(
            std::str::from_utf8(body).expect("utf8 body"),
            "key=123abc&steamid=15&name=joe+bloggs&size=12"
        );
    }

    #[test]
    fn test_custom_timeout() {
        let client =
            PugClient::with_timeout("http://example.test".to_string(), "k".to_string(), 5)
                .expect("client creation failed");
        assert_eq!(client.timeout_secs(), 5);
    }
}
