use std::time::Duration;

use client_logging::{client_debug, client_warn};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{ApiError, FailureKind, LinkRecord, TokenResponse};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The four backend endpoints the client talks to.
#[async_trait::async_trait]
pub trait LinkApi: Send + Sync {
    /// `POST /register` with a JSON body. Any 2xx is success.
    async fn register(&self, username: &str, password: &str) -> Result<(), ApiError>;

    /// `POST /token` with a form-encoded body. Returns the access token.
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;

    /// `POST /shorten` with bearer auth and a JSON `{original_url}` body.
    async fn shorten(&self, token: &str, original_url: &str) -> Result<LinkRecord, ApiError>;

    /// `GET /links` with bearer auth.
    async fn list_links(&self, token: &str) -> Result<Vec<LinkRecord>, ApiError>;
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ShortenRequest<'a> {
    original_url: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`: the base always has path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }
}

#[async_trait::async_trait]
impl LinkApi for ReqwestApi {
    async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let url = self.endpoint("register");
        client_debug!("POST {} username={}", url, username);
        let response = self
            .client
            .post(url)
            .json(&Credentials { username, password })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(response)?;
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let url = self.endpoint("token");
        client_debug!("POST {} username={}", url, username);
        let response = self
            .client
            .post(url)
            .form(&Credentials { username, password })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body: TokenResponse = decode_json(ensure_success(response)?).await?;
        Ok(body.access_token)
    }

    async fn shorten(&self, token: &str, original_url: &str) -> Result<LinkRecord, ApiError> {
        let url = self.endpoint("shorten");
        client_debug!("POST {} original_url={}", url, original_url);
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&ShortenRequest { original_url })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(ensure_success(response)?).await
    }

    async fn list_links(&self, token: &str) -> Result<Vec<LinkRecord>, ApiError> {
        let url = self.endpoint("links");
        client_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(ensure_success(response)?).await
    }
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    client_warn!("{} answered {}", response.url().path(), status);
    Err(ApiError::new(
        FailureKind::HttpStatus(status.as_u16()),
        status.to_string(),
    ))
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
