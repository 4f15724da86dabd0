use axum::{
    body::{to_bytes, Body, Bytes, HttpBody},
    extract::Request,
    middleware::Next,
    response::Response,
};
use tracing_subscriber::prelude::*;

/// Largest body the request logger buffers, matching axum's default JSON limit.
const MAX_LOGGED_BODY: usize = 2 * 1024 * 1024;

pub fn init(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "notes_api=debug,tower_http=debug,axum::rejection=trace".into());

    let compact = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .compact()
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_target(false)
    });
    let json = json.then(|| tracing_subscriber::fmt::layer().json().with_current_span(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json)
        .try_init()
        .ok();
}

/// Logs method, path and body of every request, then hands the body on.
/// Bodies that may exceed [`MAX_LOGGED_BODY`] pass through unread so the router answers them.
pub async fn log_request(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let fits = body.size_hint().upper().is_some_and(|len| len <= MAX_LOGGED_BODY as u64);
    if !fits {
        tracing::info!(
            method = %parts.method,
            path = %parts.uri.path(),
            "incoming request, body not logged"
        );
        return next.run(Request::from_parts(parts, body)).await;
    }

    let bytes = match to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("request body unreadable: {e}");
            Bytes::new()
        }
    };

    tracing::info!(
        method = %parts.method,
        path = %parts.uri.path(),
        body = %String::from_utf8_lossy(&bytes),
        "incoming request"
    );

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
