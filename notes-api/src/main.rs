mod config;

mod app;
mod ctx;
mod db;
mod errors;
mod extract;
mod logging;
mod notes;

use std::net::SocketAddr;

use app::AppParams;
use axum::body::Body;
pub use config::config;
use config::StoreKind;
use db::init_db;
pub use errors::{Error, Result};
use notes::{MemoryStore, NoteStore, SqliteStore};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::{self, TraceLayer};

#[tokio::main]
async fn main() -> errors::Result<()> {
    let config = config::load()?;

    logging::init(config.log_json);

    let store: NoteStore = match config.store {
        StoreKind::Memory => MemoryStore::new().into(),
        StoreKind::Sqlite => SqliteStore::new(init_db(&config.database_url).await?).into(),
    };
    tracing::info!("using {} note store", store.kind().as_str());

    if config.seed_notes {
        store.seed().await?;
    }

    let app = app::create(AppParams {
        store,
        router: notes::router,
    })
    .await?;

    let app = app.layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<Body>| {
                    let headers = request.headers();
                    let request_id = headers
                        .get("x-request-id")
                        .map(|v| v.to_str().unwrap_or_default())
                        .unwrap_or_default();
                    let method = request.method().to_string();
                    tracing::span!(
                        tracing::Level::DEBUG,
                        "request",
                        method = method,
                        request_id = request_id,
                        uri = request.uri().to_string(),
                    )
                })
                .on_request(trace::DefaultOnRequest::new())
                .on_response(trace::DefaultOnResponse::new().include_headers(false))
                .on_failure(trace::DefaultOnFailure::new()),
        ),
    );

    let listener = TcpListener::bind(format!("{}:{}", config.host, config.port))
        .await
        .map_err(|e| Error::Unexpected(e.to_string()))?;

    match listener.local_addr() {
        Ok(addr) => tracing::info!("listening on http://{addr}"),
        Err(e) => tracing::warn!("listening on an unknown address: {e}"),
    }

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|e| Error::Unexpected(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
pub mod tests {
    use crate::{
        app::{create, AppParams},
        errors::Result,
        notes::{self, NoteStore},
    };
    use axum_test::{TestServer, TestServerConfig};

    pub async fn test_server(store: NoteStore) -> Result<TestServer> {
        let app = create(AppParams {
            store,
            router: notes::router,
        })
        .await?;

        let config = TestServer::builder().mock_transport().into_config();

        Ok(TestServer::new_with_config(app, config).unwrap())
    }
}
