use std::future::Future;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    response::Html,
    routing::{get, post_service},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerSettings;
use crate::error::{Result, ShelfError};

use super::schema::BookshelfSchema;

/// Build the HTTP router: one GraphQL path plus `/healthz`.
pub fn build_router(schema: BookshelfSchema, settings: &ServerSettings) -> Result<Router> {
    let mut graphql_route = post_service(GraphQL::new(schema));
    if settings.graphiql {
        let page = GraphiQLSource::build().endpoint(&settings.path).finish();
        graphql_route = graphql_route.get(move || {
            let page = page.clone();
            async move { Html(page) }
        });
    }

    Ok(Router::new()
        .route(&settings.path, graphql_route)
        .route("/healthz", get(health_check))
        .layer(cors_layer(settings)?)
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(settings: &ServerSettings) -> Result<CorsLayer> {
    settings.check_allowed_origins()?;
    let origins = settings
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                ShelfError::Config(format!("Invalid allowed origin '{}': {}", origin, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true))
}

async fn health_check() -> &'static str {
    "ok"
}

/// Serve `router` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn run_server(schema: BookshelfSchema, settings: &ServerSettings) -> Result<()> {
    let router = build_router(schema, settings)?;
    let listener = TcpListener::bind(settings.bind_address()).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        path = %settings.path,
        origins = ?settings.allowed_origins,
        "GraphQL server listening"
    );

    serve(listener, router, shutdown_signal()).await?;
    tracing::info!("GraphQL server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::build_schema;
    use crate::storage::BookRepository;

    #[tokio::test]
    async fn test_wildcard_origin_is_a_config_error() {
        let repo = BookRepository::in_memory().await.unwrap();
        let settings = ServerSettings {
            allowed_origins: vec!["*".to_string()],
            ..ServerSettings::default()
        };

        let err = build_router(build_schema(repo), &settings).unwrap_err();
        assert!(matches!(err, ShelfError::Config(_)));
    }

    #[tokio::test]
    async fn test_unparseable_origin_is_a_config_error() {
        let repo = BookRepository::in_memory().await.unwrap();
        let settings = ServerSettings {
            allowed_origins: vec!["http://bad\norigin".to_string()],
            ..ServerSettings::default()
        };

        let err = build_router(build_schema(repo), &settings).unwrap_err();
        assert!(matches!(err, ShelfError::Config(_)));
    }
}
