use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use pagesmith_core::upload::MAX_UPLOAD_BYTES;

/// CORS for the editor frontend. Permissive for development; tighten for
/// production deployments.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Request/response logging.
pub fn trace_layer(
) -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
}

/// Global body ceiling: the largest legitimate request is an image upload,
/// capped at 5 MiB by the upload validator; allow a little headroom for the
/// surrounding request body.
pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES + 64 * 1024)
}
