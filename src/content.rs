pub mod proxy;

use std::fmt;

use serde_json::Value;

/// Remote content kinds reachable through the proxy routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Clients,
    Events,
    Galleries,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Clients, ContentKind::Events, ContentKind::Galleries];

    /// Route segment, and the array field in the upstream document.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Clients => "clients",
            ContentKind::Events => "events",
            ContentKind::Galleries => "galleries",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Network, DNS, bad URL, undecodable body.
    Transport(String),
    /// Upstream answered with a non-2xx status.
    Upstream(u16),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "transport failure: {}", e),
            FetchError::Upstream(status) => write!(f, "upstream returned {}", status),
        }
    }
}

/// Outcome of a GET that reached the upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(Value),
    Status(u16),
}

/// Outbound JSON GET. Implemented over reqwest in production.
#[rocket::async_trait]
pub trait Fetcher: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Reply, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("brandsite/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("HTTP client error: {}", e))?;
        Ok(HttpFetcher { client })
    }
}

#[rocket::async_trait]
impl Fetcher for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Reply, FetchError> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Ok(Reply::Status(status.as_u16()));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| FetchError::Transport(format!("JSON parse error: {}", e.without_url())))?;
        Ok(Reply::Json(body))
    }
}

/// Append the server-held key to the configured base URL.
pub fn upstream_url(base_url: &str, api_key: &str) -> Result<String, String> {
    if base_url.is_empty() || api_key.is_empty() {
        return Err("upstream not configured".into());
    }
    let mut url = url::Url::parse(base_url).map_err(|e| format!("Invalid upstream URL: {}", e))?;
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_appended_as_query() {
        let url = upstream_url("https://api.example.com/API/gallery", "s3cret").unwrap();
        assert_eq!(url, "https://api.example.com/API/gallery?key=s3cret");
    }

    #[test]
    fn key_joins_existing_query() {
        let url = upstream_url("https://api.example.com/list?lang=en", "a b").unwrap();
        assert_eq!(url, "https://api.example.com/list?lang=en&key=a+b");
    }

    #[test]
    fn missing_or_bad_base_is_an_error() {
        assert!(upstream_url("", "k").is_err());
        assert!(upstream_url("https://api.example.com", "").is_err());
        assert!(upstream_url("not a url", "k").is_err());
    }

    #[test]
    fn kind_names() {
        let names: Vec<&str> = ContentKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["clients", "events", "galleries"]);
    }
}
