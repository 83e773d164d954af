use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use catalog_client::{FetchError, GraphqlClient};
use pages::{PageContext, PageOutcome};
use shared::{
    domain::{PageLink, RoutablePath},
    error::{ApiError, ErrorCode},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod render;

use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = load_settings();
    let client =
        GraphqlClient::with_timeout(&settings.graphql_endpoint, settings.request_timeout())?;
    info!(endpoint = %settings.graphql_endpoint, "using catalog mesh");

    let state = AppState {
        pages: PageContext::new(Arc::new(client)),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "storefront listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(home))
        .route("/catalog/category/*path", get(category))
        .route("/catalog/product/:url_key", get(product))
        .fallback(home)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn home(State(state): State<Arc<AppState>>) -> Response {
    page_response(pages::home_page(&state.pages).await, render::home_page)
}

async fn category(State(state): State<Arc<AppState>>, Path(path): Path<String>) -> Response {
    let path = RoutablePath::parse(&path);
    page_response(
        pages::category_page(&state.pages, &path).await,
        render::category_page,
    )
}

async fn product(State(state): State<Arc<AppState>>, Path(url_key): Path<String>) -> Response {
    page_response(
        pages::product_page(&state.pages, &url_key).await,
        render::product_page,
    )
}

fn page_response<T>(
    result: Result<PageOutcome<T>, FetchError>,
    view: fn(&T, &[PageLink]) -> String,
) -> Response {
    match result {
        Ok(PageOutcome::Ready { pages, model }) => Html(view(&model, &pages)).into_response(),
        Ok(PageOutcome::Absent { pages }) => (
            StatusCode::NOT_FOUND,
            Html(render::not_found_page(&pages)),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, operation = ?err.operation(), "page data could not be loaded");
            let api_error = ApiError::new(
                ErrorCode::Upstream,
                "The catalog is temporarily unavailable.",
            );
            (
                StatusCode::BAD_GATEWAY,
                Html(render::error_page(&api_error)),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
