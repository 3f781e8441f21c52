use rocket::http::Status;
use serde_json::{json, Value};

use super::{upstream_url, ContentKind, FetchError, Fetcher, Reply};
use crate::config::UpstreamConfig;

/// Forward a read-only content query upstream with the server-held key.
///
/// Success passes the upstream document through untouched. A non-2xx
/// upstream status is mirrored with a generic body; anything else is a 500.
pub async fn forward(fetcher: &dyn Fetcher, upstream: &UpstreamConfig, kind: ContentKind) -> (Status, Value) {
    match fetch(fetcher, upstream, kind).await {
        Ok(body) => (Status::Ok, body),
        Err(FetchError::Upstream(code)) => (
            Status::new(code),
            json!({ "error": format!("Failed to fetch {}", kind) }),
        ),
        Err(FetchError::Transport(_)) => (
            Status::InternalServerError,
            json!({ "error": format!("Server error while fetching {}", kind) }),
        ),
    }
}

/// The upstream call behind [`forward`], with the failure kept typed.
pub async fn fetch(fetcher: &dyn Fetcher, upstream: &UpstreamConfig, kind: ContentKind) -> Result<Value, FetchError> {
    let url = upstream_url(&upstream.base_url, &upstream.api_key).map_err(|e| {
        log::error!("[proxy] {} API error: {}", kind, e);
        FetchError::Transport(e)
    })?;

    match fetcher.get_json(&url).await {
        Ok(Reply::Json(body)) => Ok(body),
        Ok(Reply::Status(code)) => {
            log::warn!("[proxy] {} upstream returned {}", kind, code);
            Err(FetchError::Upstream(code))
        }
        Err(e) => {
            log::error!("[proxy] {} API error: {}", kind, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubFetcher;

    fn upstream() -> UpstreamConfig {
        UpstreamConfig {
            base_url: "https://api.example.com/clients".into(),
            api_key: "secret-key".into(),
        }
    }

    #[rocket::async_test]
    async fn success_passes_body_verbatim() {
        let body = json!({"clients": [{"clientname": "Acme", "status": "1"}], "extra": true});
        let fetcher = StubFetcher::new(Ok(Reply::Json(body.clone())));
        let (status, out) = forward(&fetcher, &upstream(), ContentKind::Clients).await;
        assert_eq!(status, Status::Ok);
        assert_eq!(out, body);
        assert_eq!(
            fetcher.requested(),
            vec!["https://api.example.com/clients?key=secret-key".to_string()]
        );
    }

    #[rocket::async_test]
    async fn upstream_status_is_mirrored() {
        let fetcher = StubFetcher::new(Ok(Reply::Status(404)));
        let (status, out) = forward(&fetcher, &upstream(), ContentKind::Events).await;
        assert_eq!(status.code, 404);
        assert_eq!(out, json!({"error": "Failed to fetch events"}));
    }

    #[rocket::async_test]
    async fn transport_failure_is_500() {
        let fetcher = StubFetcher::new(Err(FetchError::Transport("dns".into())));
        let (status, out) = forward(&fetcher, &upstream(), ContentKind::Galleries).await;
        assert_eq!(status, Status::InternalServerError);
        assert_eq!(out, json!({"error": "Server error while fetching galleries"}));
    }

    #[rocket::async_test]
    async fn unconfigured_upstream_never_calls_out() {
        let fetcher = StubFetcher::new(Ok(Reply::Json(json!({}))));
        let (status, _) = forward(&fetcher, &UpstreamConfig::default(), ContentKind::Clients).await;
        assert_eq!(status, Status::InternalServerError);
        assert!(fetcher.requested().is_empty());
    }
}
