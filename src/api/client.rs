//! HTTP client for the content API.

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::{Envelope, Reply};
use crate::auth::Session;
use crate::config::Config;
use crate::errors::ApiError;

/// Thin wrapper over `reqwest` that speaks the API's envelope convention.
#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    http: Client,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base)
            .field("token", &self.token.as_ref().map(|_| "<present>"))
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        // `Url::join` drops the last path segment unless the base ends with '/'.
        let mut raw = config.api_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw)?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("dss-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base,
            http,
            token: None,
        })
    }

    /// Copy of this client that sends `Authorization: Bearer <token>`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            base: self.base.clone(),
            http: self.http.clone(),
            token: Some(token.into()),
        }
    }

    pub fn authenticated(&self, session: &Session) -> Self {
        self.with_token(session.token.clone())
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.base.join(path.trim_start_matches('/'))?;
        debug!("{} {}", method, url);

        let mut req = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    /// Send the request and read the envelope, whatever the HTTP status.
    pub(super) async fn dispatch(&self, req: RequestBuilder) -> Result<Envelope, ApiError> {
        let res = req.send().await?;
        let status = res.status();
        let body = res.text().await?;

        match serde_json::from_str::<Envelope>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(e) if status.is_success() => Err(ApiError::Decode(e.to_string())),
            Err(_) => Err(ApiError::Status {
                status: status.as_u16(),
                body,
            }),
        }
    }

    pub(super) async fn get<T>(&self, path: &str) -> Result<Reply<Option<T>>, ApiError>
    where
        T: DeserializeOwned,
    {
        let req = self.request(Method::GET, path)?;
        self.dispatch(req).await?.into_reply()
    }

    pub(super) async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Reply<Option<T>>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.request(method, path)?.json(body);
        self.dispatch(req).await?.into_reply()
    }

    pub(super) async fn ack_json<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Reply<()>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let req = self.request(method, path)?.json(body);
        self.dispatch(req).await?.into_ack()
    }

    pub(super) async fn delete(&self, path: &str) -> Result<Reply<()>, ApiError> {
        let req = self.request(Method::DELETE, path)?;
        self.dispatch(req).await?.into_ack()
    }

    pub(super) async fn post_multipart<T>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Reply<Option<T>>, ApiError>
    where
        T: DeserializeOwned,
    {
        let req = self.request(Method::POST, path)?.multipart(form);
        self.dispatch(req).await?.into_reply()
    }
}
