//! Asynchronous user API client implementation.

use crate::dispatcher::UserSource;
use crate::models::{User, UserFilter};
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;
use userlist_core::client::ClientConfig;
use userlist_core::config::{UserListConfig, DEFAULT_API_PATH};
use userlist_core::{Error, FilterForm, RequestUrl};

const USER_AGENT: &str = concat!("userlist-client/", env!("CARGO_PKG_VERSION"));

/// Builder for [`UsersClient`].
#[derive(Debug, Clone)]
pub struct UsersClientBuilder {
    base_url: Url,
    api_path: String,
    http_config: ClientConfig,
}

impl UsersClientBuilder {
    /// Create a new builder from the provided base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(base_url.as_ref()).map_err(|err| {
            Error::ConfigError(format!(
                "Invalid user API base URL `{}`: {err}",
                base_url.as_ref()
            ))
        })?;

        Ok(Self {
            base_url: url,
            api_path: DEFAULT_API_PATH.to_string(),
            http_config: ClientConfig::new(),
        })
    }

    /// Create a builder from a validated endpoint configuration.
    pub fn from_config(config: &UserListConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.parse_base_url()?,
            api_path: config.api_path.clone(),
            http_config: config.client_config(),
        })
    }

    /// Override the collection path filters are appended to.
    #[must_use]
    pub fn with_api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = path.into();
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Build the client instance.
    pub fn build(self) -> Result<UsersClient> {
        let mut builder = ClientBuilder::new()
            .timeout(self.http_config.timeout)
            .user_agent(USER_AGENT)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host)
            .connect_timeout(self.http_config.connect_timeout);

        if !self.http_config.enable_compression {
            builder = builder.no_gzip();
        }

        let http = builder.build().map_err(|err| {
            Error::ConfigError(format!("Failed to build user API HTTP client: {err}"))
        })?;

        Ok(UsersClient {
            http,
            base_url: self.base_url,
            api_path: self.api_path,
            log_requests: self.http_config.enable_logging,
        })
    }
}

/// Asynchronous client for the user API.
///
/// Every call issues exactly one request.
#[derive(Clone)]
pub struct UsersClient {
    http: Client,
    base_url: Url,
    api_path: String,
    log_requests: bool,
}

impl UsersClient {
    /// Construct directly from a base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        UsersClientBuilder::new(base_url)?.build()
    }

    /// Construct from a validated endpoint configuration.
    pub fn from_config(config: &UserListConfig) -> Result<Self> {
        UsersClientBuilder::from_config(config)?.build()
    }

    /// Access the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Collection path filters are appended to.
    #[must_use]
    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    /// Build the filtered request URL for `form` under this client's path.
    #[must_use]
    pub fn request_url(&self, form: &FilterForm) -> RequestUrl {
        RequestUrl::build(&self.api_path, form)
    }

    /// Fetch a prebuilt request URL and return the body as opaque JSON.
    pub async fn fetch_json(&self, request: &RequestUrl) -> Result<Value> {
        self.get_json(request.as_str(), &[]).await
    }

    /// List users matching the typed filter.
    pub async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>> {
        self.get_json(&self.api_path, &filter.to_pairs()).await
    }

    /// Fetch a single user by identifier.
    pub async fn get_user(&self, id: &str) -> Result<User> {
        let path = format!("{}/{id}", self.api_path.trim_end_matches('/'));
        self.get_json(&path, &[]).await
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        let normalized = path.strip_prefix('/').unwrap_or(path);
        self.base_url.join(normalized).map_err(|err| {
            Error::InvalidEndpoint(format!("Invalid user API path `{path}`: {err}"))
        })
    }

    async fn get_json<R>(&self, path: &str, params: &[(&'static str, String)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.build_url(path)?;
        let mut request = self
            .http
            .get(url)
            .header("Accept", "application/json");
        // An empty `query` call would drop the `?` of a prebuilt URL.
        if !params.is_empty() {
            request = request.query(params);
        }

        if self.log_requests {
            info!(path, "user API request");
        } else {
            debug!(path, "user API request");
        }

        let response = request.send().await.map_err(Error::from)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| {
            Error::HttpError(format!("Failed to read user API response body: {err}"))
        })?;

        if status.is_success() {
            return deserialize_body(path, status, &bytes);
        }

        let text = String::from_utf8_lossy(&bytes).into_owned();
        Err(map_status_to_error(status, text))
    }
}

#[async_trait]
impl UserSource for UsersClient {
    async fn fetch_json(&self, request: &RequestUrl) -> Result<Value> {
        UsersClient::fetch_json(self, request).await
    }
}

fn map_status_to_error(status: StatusCode, text: String) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(text),
        StatusCode::BAD_REQUEST => Error::BadRequest(text),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::InvalidRequest(format!("User API authentication failed: {text}"))
        }
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            Error::ServiceUnavailable(format!("User API temporarily unavailable: {text}"))
        }
        status if status.is_server_error() => {
            Error::ServiceUnavailable(format!("User API server error {status}: {text}"))
        }
        _ => Error::HttpError(format!("User API error {status}: {text}")),
    }
}

fn deserialize_body<R>(path: &str, status: StatusCode, bytes: &[u8]) -> Result<R>
where
    R: DeserializeOwned,
{
    if status == StatusCode::NO_CONTENT || bytes.is_empty() {
        serde_json::from_value(Value::Null).map_err(|err| {
            Error::ParseError(format!(
                "Failed to parse empty user API response for `{path}`: {err}"
            ))
        })
    } else {
        serde_json::from_slice(bytes).map_err(|err| {
            Error::ParseError(format!(
                "Failed to parse user API response for `{path}`: {err}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use userlist_core::FilterField;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> UsersClient {
        UsersClient::new(server.uri()).unwrap()
    }

    fn connie() -> serde_json::Value {
        json!({
            "_id": "588935f5c668650dc77df581",
            "name": "Connie Stewart",
            "age": 25,
            "company": "OHMNET",
            "email": "conniestewart@ohmnet.com"
        })
    }

    #[tokio::test]
    async fn fetch_json_sends_filters_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("age", "25"))
            .and(query_param("company", "OHMNET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([connie()])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let form = FilterForm::new()
            .with_value(FilterField::Age, "25")
            .with_value(FilterField::Company, "OHMNET");
        let request = client.request_url(&form);
        assert_eq!(request.as_str(), "/api/users?&age=25&company=OHMNET");

        let body = client.fetch_json(&request).await.unwrap();
        assert_eq!(body[0]["name"], "Connie Stewart");
    }

    #[tokio::test]
    async fn fetch_json_without_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param_is_missing("age"))
            .and(query_param_is_missing("company"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client(&server);
        let body = client
            .fetch_json(&client.request_url(&FilterForm::new()))
            .await
            .unwrap();
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn list_users_typed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("company", "OHMNET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([connie()])))
            .mount(&server)
            .await;

        let client = client(&server);
        let users = client
            .list_users(&UserFilter {
                age: None,
                company: Some("OHMNET".into()),
            })
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].company, "OHMNET");
    }

    #[tokio::test]
    async fn illegal_age_is_bad_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("age", "abc"))
            .respond_with(ResponseTemplate::new(400).set_body_string("age must be a number"))
            .mount(&server)
            .await;

        let client = client(&server);
        let form = FilterForm::new().with_value(FilterField::Age, "abc");
        let err = client
            .fetch_json(&client.request_url(&form))
            .await
            .unwrap_err();
        assert_eq!(err, Error::BadRequest("age must be a number".into()));
    }

    #[tokio::test]
    async fn get_user_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/588935f5c668650dc77df581"))
            .respond_with(ResponseTemplate::new(200).set_body_json(connie()))
            .mount(&server)
            .await;

        let client = client(&server);
        let user = client.get_user("588935f5c668650dc77df581").await.unwrap();
        assert_eq!(user.name, "Connie Stewart");
    }

    #[tokio::test]
    async fn get_user_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/nonexistent"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client.get_user("nonexistent").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn server_error_is_unavailable_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client
            .fetch_json(&client.request_url(&FilterForm::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client
            .fetch_json(&client.request_url(&FilterForm::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[test]
    fn builder_rejects_invalid_url() {
        let err = UsersClientBuilder::new("not a url").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn builder_from_config_uses_api_path() {
        let config = UserListConfig::new("http://users.local:4567")
            .unwrap()
            .with_api_path("/v2/users");
        let client = UsersClient::from_config(&config).unwrap();
        assert_eq!(client.api_path(), "/v2/users");
        assert_eq!(client.base_url().port(), Some(4567));
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            map_status_to_error(StatusCode::FORBIDDEN, String::new()),
            Error::InvalidRequest(_)
        ));
        assert!(matches!(
            map_status_to_error(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            Error::ServiceUnavailable(_)
        ));
        assert!(matches!(
            map_status_to_error(StatusCode::IM_A_TEAPOT, String::new()),
            Error::HttpError(_)
        ));
    }
}
