use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, Uri};
use axum::Json;
use axum_extra::extract::Host;
use serde::Serialize;

use crate::config::Config;

/// Path suffix the OAuth provider redirects back to after sign-in.
const CALLBACK_PATH: &str = "/accounts/google/login/callback/";

/// JSON payload returned by the debug endpoint. Query parameters and
/// headers are echoed verbatim, with no filtering or redaction.
#[derive(Debug, Serialize)]
pub struct DebugOauthResponse {
    pub site_domain: String,
    pub site_name: String,
    pub callback_url: String,
    pub request_path: String,
    pub request_host: String,
    pub query_params: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
}

/// Build the provider redirect target for the given site domain.
fn callback_url(domain: &str) -> String {
    format!("http://{domain}{CALLBACK_PATH}")
}

/// GET /debug/oauth/ — echo the site's OAuth configuration plus the
/// incoming request's query parameters and headers.
pub async fn debug_oauth(
    State(config): State<Arc<Config>>,
    Host(host): Host,
    uri: Uri,
    Query(query_params): Query<BTreeMap<String, String>>,
    header_map: HeaderMap,
) -> Json<DebugOauthResponse> {
    // Header names arrive lowercased from the HTTP layer; values are copied
    // through lossily when not valid UTF-8.
    let headers: BTreeMap<String, String> = header_map
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    tracing::debug!(
        host = %host,
        params = query_params.len(),
        "Serving OAuth debug snapshot"
    );

    Json(DebugOauthResponse {
        site_domain: config.site.domain.clone(),
        site_name: config.site.name.clone(),
        callback_url: callback_url(&config.site.domain),
        request_path: uri.path().to_string(),
        request_host: host,
        query_params,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_url_wraps_site_domain() {
        assert_eq!(
            callback_url("example.com"),
            "http://example.com/accounts/google/login/callback/"
        );
    }

    #[test]
    fn test_callback_url_keeps_domain_port() {
        assert_eq!(
            callback_url("localhost:8000"),
            "http://localhost:8000/accounts/google/login/callback/"
        );
    }
}
