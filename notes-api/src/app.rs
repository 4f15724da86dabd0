use axum::{
    middleware::{self},
    response::{Html, IntoResponse},
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::{
    config,
    ctx::BaseParams,
    errors::{self, on_error, unknown_endpoint},
    logging::log_request,
    notes::{NoteFilter, NoteStore},
};

pub struct AppParams<Router>
where
    Router: FnOnce() -> axum::Router,
{
    pub store: NoteStore,
    pub router: Router,
}

pub async fn create<R>(AppParams { store, router }: AppParams<R>) -> errors::Result<Router>
where
    R: FnOnce() -> axum::Router,
{
    let app = Router::new()
        .route("/", get(index))
        .route("/__version__", get(version))
        .route("/__heartbeat__", get(heartbeat))
        .route("/__lbheartbeat__", get(lbheartbeat))
        .merge(router())
        .fallback(unknown_endpoint)
        .method_not_allowed_fallback(unknown_endpoint)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(on_error))
                .layer(middleware::from_fn(log_request))
                .layer(Extension(store)),
        );

    Ok(app)
}

async fn index() -> impl IntoResponse {
    Html("<h1>Hello World!</h1>")
}

async fn version() -> impl IntoResponse {
    let config = config();
    Json(json!({
        "source" : config.source,
        "version": config.version,
        "commit" : config.git_commit,
        "build"  : config.pipeline_id
    }))
}

async fn heartbeat(BaseParams { store }: BaseParams) -> errors::Result<impl IntoResponse> {
    let notes = store.list(NoteFilter::default()).await?.len();

    Ok(Json(json!({
        "status" : "ok",
        "store": store.kind().as_str(),
        "notes": notes,
    })))
}

async fn lbheartbeat() -> impl IntoResponse {
    ""
}
