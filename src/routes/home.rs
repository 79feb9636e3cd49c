use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

/// Backend version surfaced on the home page.
const BACKEND_VERSION: &str = "5.2.6";

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate<'a> {
    version: &'a str,
}

/// GET / — home page
pub async fn home() -> impl IntoResponse {
    let page = HomeTemplate {
        version: BACKEND_VERSION,
    };

    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render home page: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
