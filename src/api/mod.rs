//! REST client for the SmartMarket backend.
//!
//! DESIGN
//! ======
//! `ApiService` is the single point of HTTP access. Every operation builds
//! a request through [`ApiService::request`] (base URL, JSON content type,
//! optional bearer token) and finishes through [`ApiService::send`], which
//! normalizes transport failures and hands the response to
//! [`response::classify`]. No operation adds error semantics of its own.
//!
//! ERROR HANDLING
//! ==============
//! Callers receive either the decoded payload or an [`ApiError`] whose
//! message is ready to show. Transport errors are logged with their cause
//! and surfaced as the canned [`ApiError::Connectivity`]. No retries and no
//! timeouts: a failed call is re-triggered by the user.

pub mod error;
pub mod response;

use hyper::ext::ReasonPhrase;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

pub use error::ApiError;
use response::RawResponse;

use crate::config::ClientConfig;
use crate::session::Session;
use crate::types::{
    AnalysisRequest, AnalysisResponse, AnalysisResult, HealthStatus, Product, ProductRequest, ReviewList,
    SearchResult, StatusMessage,
};

pub const DEFAULT_LIST_LIMIT: u32 = 10;
pub const DEFAULT_REVIEW_LIMIT: u32 = 50;

pub struct ApiService {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiService {
    /// Build a client for `config.base_url` that reads its token from
    /// `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self::with_http_client(config, session, http))
    }

    /// Build a client around a preconfigured `reqwest::Client` (proxy or TLS
    /// settings the defaults do not cover).
    #[must_use]
    pub fn with_http_client(config: &ClientConfig, session: Session, http: reqwest::Client) -> Self {
        Self { http, base_url: config.base_url.clone(), session }
    }

    /// Build a client from `API_URL` with the token file from
    /// `SMARTMARKET_TOKEN_FILE`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self, ApiError> {
        let config = ClientConfig::from_env();
        let session = Session::from_file(&config.token_file);
        Self::new(&config, session)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    // =========================================================================
    // PRODUCTS
    // =========================================================================

    /// `GET /api/products/search`, one `platforms` pair per platform.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn search_products(&self, product_name: &str, platforms: &[String]) -> Result<Vec<SearchResult>, ApiError> {
        let query = search_query(product_name, platforms);
        let request = self.request(Method::GET, "/api/products/search")?.query(&query);
        self.send(request).await
    }

    /// `GET /api/products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn get_product(&self, product_id: i64) -> Result<Product, ApiError> {
        let request = self.request(Method::GET, &format!("/api/products/{product_id}"))?;
        self.send(request).await
    }

    /// `GET /api/products/?limit=N`.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn list_products(&self, limit: u32) -> Result<Vec<Product>, ApiError> {
        let request = self.request(Method::GET, "/api/products/")?.query(&[("limit", limit)]);
        self.send(request).await
    }

    /// `GET /api/products/?skip=S&limit=N`.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn list_products_page(&self, skip: u32, limit: u32) -> Result<Vec<Product>, ApiError> {
        let request = self
            .request(Method::GET, "/api/products/")?
            .query(&[("skip", skip), ("limit", limit)]);
        self.send(request).await
    }

    /// `POST /api/products/`. The backend returns the existing product when
    /// the URL is already known.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn create_product(&self, product: &ProductRequest) -> Result<Product, ApiError> {
        let request = self.request(Method::POST, "/api/products/")?.json(product);
        self.send(request).await
    }

    /// `DELETE /api/products/{id}`; the backend cascades to reviews and
    /// analyses.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn delete_product(&self, product_id: i64) -> Result<StatusMessage, ApiError> {
        let request = self.request(Method::DELETE, &format!("/api/products/{product_id}"))?;
        self.send(request).await
    }

    // =========================================================================
    // ANALYSIS
    // =========================================================================

    /// `POST /api/analysis/analyze`. Returns a receipt; the analysis runs
    /// in the background server-side.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn analyze_product(&self, analysis: &AnalysisRequest) -> Result<AnalysisResponse, ApiError> {
        let request = self.request(Method::POST, "/api/analysis/analyze")?.json(analysis);
        self.send(request).await
    }

    /// `GET /api/analysis/{product_id}`: the latest analysis of a product.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn get_analysis(&self, product_id: i64) -> Result<AnalysisResult, ApiError> {
        let request = self.request(Method::GET, &format!("/api/analysis/{product_id}"))?;
        self.send(request).await
    }

    /// `GET /api/analysis/?limit=N`, newest first.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn list_analyses(&self, limit: u32) -> Result<Vec<AnalysisResult>, ApiError> {
        let request = self.request(Method::GET, "/api/analysis/")?.query(&[("limit", limit)]);
        self.send(request).await
    }

    /// `GET /api/analysis/?skip=S&limit=N`.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn list_analyses_page(&self, skip: u32, limit: u32) -> Result<Vec<AnalysisResult>, ApiError> {
        let request = self
            .request(Method::GET, "/api/analysis/")?
            .query(&[("skip", skip), ("limit", limit)]);
        self.send(request).await
    }

    /// `DELETE /api/analysis/{analysis_id}`.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn delete_analysis(&self, analysis_id: i64) -> Result<StatusMessage, ApiError> {
        let request = self.request(Method::DELETE, &format!("/api/analysis/{analysis_id}"))?;
        self.send(request).await
    }

    /// `DELETE /api/analysis/`: clears the whole history.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn delete_all_analyses(&self) -> Result<StatusMessage, ApiError> {
        let request = self.request(Method::DELETE, "/api/analysis/")?;
        self.send(request).await
    }

    // =========================================================================
    // REVIEWS / HEALTH
    // =========================================================================

    /// `GET /api/reviews/{product_id}?skip=S&limit=N`.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn get_reviews(&self, product_id: i64, skip: u32, limit: u32) -> Result<ReviewList, ApiError> {
        let request = self
            .request(Method::GET, &format!("/api/reviews/{product_id}"))?
            .query(&[("skip", skip), ("limit", limit)]);
        self.send(request).await
    }

    /// `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns the normalized request error.
    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let request = self.request(Method::GET, "/health")?;
        self.send(request).await
    }

    // =========================================================================
    // PLUMBING
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self.http.request(method, url).headers(self.headers()?))
    }

    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.bearer_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::Client(format!("invalid bearer token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let reason_phrase = response
            .extensions()
            .get::<ReasonPhrase>()
            .and_then(|r| std::str::from_utf8(r.as_bytes()).ok())
            .map(ToOwned::to_owned);
        let url = response.url().clone();
        let body = response.bytes().await.map_err(|e| self.transport_error(&e))?;
        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "backend response");

        let raw = RawResponse {
            status: status.as_u16(),
            status_text: reason_phrase.as_deref().or(status.canonical_reason()),
            content_type: content_type.as_deref(),
            body: &body,
        };
        response::classify(&raw).inspect_err(|e| {
            tracing::warn!(%url, status = status.as_u16(), error = %e, "backend request failed");
        })
    }

    fn transport_error(&self, error: &reqwest::Error) -> ApiError {
        if error.is_builder() {
            return ApiError::Client(error.to_string());
        }
        tracing::warn!(base_url = %self.base_url, error = %error, "backend unreachable");
        ApiError::Connectivity
    }
}

impl std::fmt::Debug for ApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiService").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

fn search_query(product_name: &str, platforms: &[String]) -> Vec<(&'static str, String)> {
    let mut query = Vec::with_capacity(platforms.len() + 1);
    query.push(("product_name", product_name.to_owned()));
    query.extend(platforms.iter().map(|p| ("platforms", p.clone())));
    query
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
