use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::facts::FactsPage;

pub const DEFAULT_FACTS_URL: &str = "http://cat-facts-api.std-900.ist.mospolytech.ru/api/facts";
pub const DEFAULT_AUTOCOMPLETE_URL: &str =
    "http://cat-facts-api.std-900.ist.mospolytech.ru/autocomplete";
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("factpager/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid URL: {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("invalid header '{header}', expected 'Key: Value'")]
    InvalidHeader { header: String },

    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactsQuery {
    pub page: u64,
    pub per_page: u32,
    pub query: Option<String>,
}

impl FactsQuery {
    pub fn first_page(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            query: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub timeout_seconds: u64,
    pub proxy: Option<String>,
    pub header: Option<String>,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            proxy: None,
            header: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

pub fn parse_url(raw: &str) -> Result<Url, ClientError> {
    Url::parse(raw.trim()).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })
}

pub fn build_facts_url(base: &Url, query: &FactsQuery) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("page", &query.page.to_string());
        pairs.append_pair("per-page", &query.per_page.to_string());
        if let Some(q) = query.query.as_deref().filter(|q| !q.trim().is_empty()) {
            pairs.append_pair("q", q);
        }
    }
    url
}

pub fn build_autocomplete_url(endpoint: &Url, prefix: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut().append_pair("q", prefix);
    url
}

pub fn parse_header(raw: &str) -> Result<(reqwest::header::HeaderName, reqwest::header::HeaderValue), ClientError> {
    let invalid = || ClientError::InvalidHeader {
        header: raw.to_string(),
    };
    let (key, value) = raw.split_once(':').ok_or_else(invalid)?;
    let key = reqwest::header::HeaderName::from_str(key.trim()).map_err(|_| invalid())?;
    let value = reqwest::header::HeaderValue::from_str(value.trim()).map_err(|_| invalid())?;
    Ok((key, value))
}

fn build_http_client(options: &ClientOptions) -> Result<reqwest::Client, ClientError> {
    let mut headers = reqwest::header::HeaderMap::new();
    let user_agent = reqwest::header::HeaderValue::from_str(&options.user_agent).map_err(|_| {
        ClientError::InvalidHeader {
            header: format!("User-Agent: {}", options.user_agent),
        }
    })?;
    headers.insert(reqwest::header::USER_AGENT, user_agent);
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    if let Some(raw) = options.header.as_deref().filter(|h| !h.trim().is_empty()) {
        let (key, value) = parse_header(raw)?;
        headers.append(key, value);
    }

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(options.timeout_seconds.max(1)));
    if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        let p = reqwest::Proxy::all(proxy).map_err(|e| ClientError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(p);
    }
    builder
        .build()
        .map_err(|e| ClientError::ClientBuild { source: e })
}

#[derive(Clone, Debug)]
pub struct FactsClient {
    http: reqwest::Client,
    facts_url: Url,
    autocomplete_url: Url,
}

impl FactsClient {
    pub fn new(
        facts_url: &str,
        autocomplete_url: &str,
        options: &ClientOptions,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            http: build_http_client(options)?,
            facts_url: parse_url(facts_url)?,
            autocomplete_url: parse_url(autocomplete_url)?,
        })
    }

    pub fn facts_url(&self) -> &Url {
        &self.facts_url
    }

    pub fn autocomplete_url(&self) -> &Url {
        &self.autocomplete_url
    }

    pub async fn fetch_page(&self, query: &FactsQuery) -> Result<FactsPage, ClientError> {
        let url = build_facts_url(&self.facts_url, query);
        self.get_json(url).await
    }

    /// Fetch autocomplete candidates. A blank prefix returns nothing without
    /// touching the network.
    pub async fn fetch_suggestions(&self, prefix: &str) -> Result<Vec<String>, ClientError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        let url = build_autocomplete_url(&self.autocomplete_url, prefix);
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        tracing::debug!(%url, "GET");
        let url_str = url.to_string();
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                url: url_str.clone(),
                source: e,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url_str,
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().await.map_err(|e| ClientError::Transport {
            url: url_str.clone(),
            source: e,
        })?;
        tracing::trace!(%url_str, bytes = body.len(), "response body received");
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode {
            url: url_str,
            source: e,
        })
    }
}
