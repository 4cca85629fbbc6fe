// Dashboard API HTTP client
//
// Wraps `reqwest::Client` with API-base URL construction, uniform JSON
// headers, unconditional JSON body parsing and a single failure path that
// logs, notifies the user and hands the error back. Typed endpoint wrappers
// live in `endpoints.rs`.

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;
use url::form_urlencoded;

use crate::error::{Error, GENERIC_API_FAILURE};
use crate::notify::{Notifier, Severity};
use crate::transport::TransportConfig;

/// Per-request options, merged shallowly over the defaults.
///
/// `headers`, when set, replaces the default header set entirely.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Option<HeaderMap>,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: None,
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }
}

/// Headers applied when the caller supplies none.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// HTTP client for the dashboard API.
///
/// Every request resolves to parsed JSON on success. On any failure the
/// error is logged, shown through the [`Notifier`] as `"Error: <message>"`,
/// and then returned, in that order.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_base: String,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// A cookie jar is attached if the config has none, so session cookies
    /// set by the API are sent back on later calls.
    pub fn new(
        api_base: impl Into<String>,
        transport: &TransportConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self::with_client(http, api_base, notifier))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        api_base: impl Into<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            notifier,
        }
    }

    /// The configured API base (e.g. `http://127.0.0.1:5000/api/v1`).
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// The notifier failures are reported to.
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    // ── Verb helpers ─────────────────────────────────────────────────

    /// `GET` with a URL-encoded query string appended to the endpoint.
    pub async fn get<T, I, K, V>(&self, endpoint: &str, params: I) -> Result<T, Error>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query = encode_query(params);
        let endpoint = if query.is_empty() {
            endpoint.to_owned()
        } else {
            format!("{endpoint}?{query}")
        };
        self.request(&endpoint, RequestOptions::default()).await
    }

    /// `POST` with a JSON body.
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let body = self.encode_body(body)?;
        self.request(endpoint, RequestOptions::method(Method::POST).with_body(body))
            .await
    }

    /// `PUT` with a JSON body.
    pub async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let body = self.encode_body(body)?;
        self.request(endpoint, RequestOptions::method(Method::PUT).with_body(body))
            .await
    }

    /// `DELETE` without a body.
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        self.request(endpoint, RequestOptions::method(Method::DELETE))
            .await
    }

    // ── Core request ─────────────────────────────────────────────────

    /// Issue a request against `{api_base}{endpoint}`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, Error> {
        match self.send(endpoint, options).await {
            Ok(data) => Ok(data),
            Err(err) => Err(self.report(endpoint, err)),
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, Error> {
        let url = self.endpoint_url(endpoint)?;
        debug!(method = %options.method, %url, "api request");

        let headers = options.headers.unwrap_or_else(default_headers);
        let mut builder = self.http.request(options.method, url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body.to_string());
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        // Parsed before the status check so error bodies can supply a message.
        let data: Value = serde_json::from_str(&body).map_err(|e| parse_error(&e, &body))?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: server_message(&data).unwrap_or_else(|| GENERIC_API_FAILURE.into()),
            });
        }

        serde_json::from_value(data).map_err(|e| parse_error(&e, &body))
    }

    /// Log the failure and surface it to the user before it is returned.
    pub(crate) fn report(&self, endpoint: &str, err: Error) -> Error {
        error!(endpoint, error = %err, "API request failed");
        self.notifier
            .notify(&format!("Error: {err}"), Severity::Error);
        err
    }

    fn encode_body(&self, body: &(impl Serialize + Sync)) -> Result<Value, Error> {
        serde_json::to_value(body).map_err(|e| self.report("<request body>", Error::Encode(e)))
    }

    /// Build `{api_base}{endpoint}` by plain concatenation.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}{endpoint}", self.api_base))?)
    }
}

/// Encode key/value pairs as `application/x-www-form-urlencoded`.
pub fn encode_query<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Extract `error.message` from a failure body.
fn server_message(data: &Value) -> Option<String> {
    data.get("error")?
        .get("message")?
        .as_str()
        .filter(|m| !m.is_empty())
        .map(String::from)
}

fn parse_error(err: &serde_json::Error, body: &str) -> Error {
    let preview: String = body.chars().take(200).collect();
    Error::Parse {
        message: format!("{err} (body preview: {preview:?})"),
        body: body.to_owned(),
    }
}
