use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};

use user_registry::AssetStore;

/// Read-only serving of stored photos, intended to be nested under
/// [`user_registry::ASSET_ROUTE_PREFIX`]
pub fn asset_router(assets: AssetStore) -> Router {
    Router::new()
        .route("/{reference}", get(serve_asset))
        .with_state(assets)
}

async fn serve_asset(State(assets): State<AssetStore>, Path(reference): Path<String>) -> Response {
    // file_path rejects anything that is not a bare file name
    let path = match assets.file_path(&reference) {
        Ok(path) => path,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(CONTENT_TYPE, content_type_for(&reference))], bytes).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

// Stored files come from the image allow-list; anything else falls back
// to an opaque content type.
fn content_type_for(reference: &str) -> &'static str {
    match reference.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("1700-abc.jpg"), "image/jpeg");
        assert_eq!(content_type_for("1700-abc.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("1700-abc.png"), "image/png");
        assert_eq!(content_type_for("1700-abc.gif"), "image/gif");
    }

    #[test]
    fn test_content_type_for_unknown_extension() {
        assert_eq!(content_type_for("1700-abc.webp"), "application/octet-stream");
        assert_eq!(content_type_for("no-extension"), "application/octet-stream");
    }
}
