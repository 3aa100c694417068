use axum::{
    body::Body,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "movio-ui/dist"]
struct Asset;

fn embedded(path: &str) -> Option<Response> {
    let content = Asset::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Some(
        (
            [(header::CONTENT_TYPE, mime.as_ref())],
            Body::from(content.data),
        )
            .into_response(),
    )
}

/// Serves the embedded front-end. Unknown paths get `index.html` so the
/// client-side router can resolve them; unknown `/api` paths stay 404.
pub async fn serve_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if path == "api" || path.starts_with("api/") {
        return super::ApiError::NotFound(format!("No route for {}", uri.path())).into_response();
    }

    let path = if path.is_empty() { "index.html" } else { path };

    embedded(path)
        .or_else(|| embedded("index.html"))
        .unwrap_or_else(|| (StatusCode::NOT_FOUND, "404 Not Found").into_response())
}
