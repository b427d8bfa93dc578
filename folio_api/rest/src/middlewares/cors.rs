use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;
use url::Url;

pub fn add<S: Clone + Send + Sync + 'static>(
    allowed_origins: &[Url],
) -> impl FnOnce(Router<S>) -> Router<S> {
    let origins = allowed_origins
        .iter()
        .filter_map(|url| {
            let origin = url.origin().ascii_serialization();
            HeaderValue::from_str(&origin)
                .inspect_err(|_| warn!(%url, "ignoring invalid cors origin"))
                .ok()
        })
        .collect::<Vec<_>>();

    move |router| {
        if origins.is_empty() {
            return router;
        }

        router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
    }
}
